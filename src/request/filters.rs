//! Hour and month filters.
//!
//! Both filters are interpreted by the service in UTC. Asking for hour `11` with an
//! `Europe/Oslo` output timezone returns rows indexed at 13:00 local time in summer.

use crate::request::error::ValidationError;
use crate::request::ids::split_list;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Restricts observations to a set of UTC hours (0-23).
///
/// # Examples
///
/// ```
/// use metno::HourFilter;
///
/// assert_eq!("".parse::<HourFilter>().unwrap(), HourFilter::All);
/// let filter: HourFilter = "18,6,12".parse().unwrap();
/// assert_eq!(filter.to_param(), "6,12,18");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HourFilter {
    #[default]
    All,
    Only(BTreeSet<u8>),
}

/// Restricts observations to a set of months (1-12).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(BTreeSet<u8>),
}

const HOURS: RangeInclusive<u8> = 0..=23;
const MONTHS: RangeInclusive<u8> = 1..=12;

impl HourFilter {
    pub fn only(hours: impl IntoIterator<Item = u8>) -> Result<Self, ValidationError> {
        let hours = collect_in_range(hours, HOURS, |h| {
            ValidationError::InvalidHour(h.to_string())
        })?;
        Ok(Self::from_set(hours))
    }

    /// Query parameter value: comma joined hours, or empty for all hours.
    pub fn to_param(&self) -> String {
        match self {
            HourFilter::All => String::new(),
            HourFilter::Only(hours) => join(hours),
        }
    }

    fn from_set(hours: BTreeSet<u8>) -> Self {
        if hours.is_empty() {
            HourFilter::All
        } else {
            HourFilter::Only(hours)
        }
    }
}

impl MonthFilter {
    pub fn only(months: impl IntoIterator<Item = u8>) -> Result<Self, ValidationError> {
        let months = collect_in_range(months, MONTHS, |m| {
            ValidationError::InvalidMonth(m.to_string())
        })?;
        Ok(Self::from_set(months))
    }

    /// Query parameter value: comma joined months, or empty for all months.
    pub fn to_param(&self) -> String {
        match self {
            MonthFilter::All => String::new(),
            MonthFilter::Only(months) => join(months),
        }
    }

    fn from_set(months: BTreeSet<u8>) -> Self {
        if months.is_empty() {
            MonthFilter::All
        } else {
            MonthFilter::Only(months)
        }
    }
}

impl FromStr for HourFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours = parse_set(s, HOURS, |raw| ValidationError::InvalidHour(raw.to_string()))?;
        Ok(Self::from_set(hours))
    }
}

impl FromStr for MonthFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let months = parse_set(s, MONTHS, |raw| {
            ValidationError::InvalidMonth(raw.to_string())
        })?;
        Ok(Self::from_set(months))
    }
}

impl fmt::Display for HourFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourFilter::All => f.write_str("all hours"),
            HourFilter::Only(_) => f.write_str(&self.to_param()),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Only(_) => f.write_str(&self.to_param()),
        }
    }
}

fn parse_set(
    list: &str,
    range: RangeInclusive<u8>,
    invalid: impl Fn(&str) -> ValidationError,
) -> Result<BTreeSet<u8>, ValidationError> {
    split_list(list)
        .map(|raw| match raw.parse::<u8>() {
            Ok(value) if range.contains(&value) => Ok(value),
            _ => Err(invalid(raw)),
        })
        .collect()
}

fn collect_in_range(
    values: impl IntoIterator<Item = u8>,
    range: RangeInclusive<u8>,
    invalid: impl Fn(u8) -> ValidationError,
) -> Result<BTreeSet<u8>, ValidationError> {
    values
        .into_iter()
        .map(|value| {
            if range.contains(&value) {
                Ok(value)
            } else {
                Err(invalid(value))
            }
        })
        .collect()
}

fn join(values: &BTreeSet<u8>) -> String {
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_means_all() {
        assert_eq!("".parse::<HourFilter>(), Ok(HourFilter::All));
        assert_eq!("  ".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!(HourFilter::All.to_param(), "");
        assert_eq!(MonthFilter::All.to_param(), "");
    }

    #[test]
    fn parses_sorted_and_deduplicated() {
        let hours: HourFilter = "18, 0,6,12,6".parse().unwrap();
        assert_eq!(hours.to_param(), "0,6,12,18");

        let months: MonthFilter = "12,1,2".parse().unwrap();
        assert_eq!(months.to_param(), "1,2,12");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            "24".parse::<HourFilter>(),
            Err(ValidationError::InvalidHour("24".to_string()))
        );
        assert_eq!(
            "0".parse::<MonthFilter>(),
            Err(ValidationError::InvalidMonth("0".to_string()))
        );
        assert_eq!(
            "13".parse::<MonthFilter>(),
            Err(ValidationError::InvalidMonth("13".to_string()))
        );
        assert!("noon".parse::<HourFilter>().is_err());
        assert!(HourFilter::only([0, 25]).is_err());
        assert!(MonthFilter::only([6, 7]).is_ok());
    }

    #[test]
    fn empty_iterator_means_all() {
        assert_eq!(HourFilter::only(std::iter::empty::<u8>()), Ok(HourFilter::All));
        assert_eq!(MonthFilter::only(Vec::<u8>::new()), Ok(MonthFilter::All));
    }
}
