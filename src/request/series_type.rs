//! The time series types understood by the eKlima `getMetData` operation.

use crate::request::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Selects which kind of time series the service returns.
///
/// eKlima knows several series types (daily, monthly, ...), but the response layout
/// differs between them and only the observation series is parsed by this crate.
///
/// # Examples
///
/// ```
/// use metno::SeriesType;
///
/// let series: SeriesType = "2".parse().unwrap();
/// assert_eq!(series, SeriesType::Observations);
/// assert!("0".parse::<SeriesType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeriesType {
    /// Series type `2`: all available observations at the requested hours.
    #[default]
    Observations,
}

impl SeriesType {
    /// The id sent as `timeserietypeid`.
    pub fn id(&self) -> &'static str {
        match self {
            SeriesType::Observations => "2",
        }
    }
}

impl FromStr for SeriesType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2" => Ok(SeriesType::Observations),
            other => Err(ValidationError::UnsupportedSeriesType(other.to_string())),
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
