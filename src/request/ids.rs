//! Station identifiers and weather element codes.

use crate::request::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element codes this crate knows a description for, see
/// <http://eklima.met.no/Help/Stations/toDay/all/en_e18700.html>.
///
/// Any other well-formed code is accepted as well; this table only feeds
/// [`ElementCode::description`].
pub const KNOWN_ELEMENTS: &[(&str, &str)] = &[
    ("TA", "Air temperature"),
    ("TAX", "Maximum air temperature since last observation"),
    ("TAX_12", "Maximum air temperature last 12 hours"),
    ("TAN", "Minimum air temperature since last observation"),
    ("TAN_12", "Minimum air temperature last 12 hours"),
    ("TD", "Dew point temperature"),
    ("UU", "Relative air humidity"),
    ("PO", "Air pressure at station level"),
    ("PR", "Air pressure reduced to sea level"),
    ("RA", "Accumulated precipitation"),
    ("RR_12", "Precipitation last 12 hours"),
    ("RR_24", "Precipitation last 24 hours"),
    ("FF", "Wind speed"),
    ("FG", "Maximum wind gust"),
    ("DD", "Wind direction"),
    ("SA", "Snow depth"),
    ("SD", "Degree of snow cover"),
    ("NN", "Cloud cover"),
];

/// Numeric id of a weather station (the service calls it `St.no`).
///
/// # Examples
///
/// ```
/// use metno::StationId;
///
/// let blindern: StationId = "18700".parse().unwrap();
/// assert_eq!(blindern.to_string(), "18700");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub u32);

impl StationId {
    /// Parses a comma separated list such as `"18700,68860"`.
    pub fn parse_list(list: &str) -> Result<Vec<StationId>, ValidationError> {
        let stations = split_list(list)
            .map(str::parse)
            .collect::<Result<Vec<StationId>, _>>()?;
        if stations.is_empty() {
            return Err(ValidationError::NoStations);
        }
        Ok(stations)
    }
}

impl FromStr for StationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<u32>() {
            Ok(id) if id > 0 => Ok(StationId(id)),
            _ => Err(ValidationError::InvalidStation(trimmed.to_string())),
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Code of a measured weather variable, e.g. `TA` for air temperature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementCode(String);

impl ElementCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable description, if the code is in [`KNOWN_ELEMENTS`].
    pub fn description(&self) -> Option<&'static str> {
        KNOWN_ELEMENTS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, description)| *description)
    }

    /// Parses a comma separated list such as `"TA,TAX"`. Whitespace around codes is ignored.
    pub fn parse_list(list: &str) -> Result<Vec<ElementCode>, ValidationError> {
        let elements = split_list(list)
            .map(str::parse)
            .collect::<Result<Vec<ElementCode>, _>>()?;
        if elements.is_empty() {
            return Err(ValidationError::NoElements);
        }
        Ok(elements)
    }
}

impl FromStr for ElementCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let well_formed = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !well_formed {
            return Err(ValidationError::InvalidElement(trimmed.to_string()));
        }
        Ok(ElementCode(trimmed.to_string()))
    }
}

impl fmt::Display for ElementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a comma separated list, skipping blank entries.
pub(crate) fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|part| !part.is_empty())
}
