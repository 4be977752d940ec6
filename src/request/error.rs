use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported time series type id '{0}', only '2' is supported")]
    UnsupportedSeriesType(String),

    #[error("At least one station id is required")]
    NoStations,

    #[error("Invalid station id '{0}', expected a positive integer")]
    InvalidStation(String),

    #[error("At least one element code is required")]
    NoElements,

    #[error("Invalid element code '{0}'")]
    InvalidElement(String),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Start date {from} is after end date {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },

    #[error("Invalid hour '{0}', expected an integer from 0 to 23")]
    InvalidHour(String),

    #[error("Invalid month '{0}', expected an integer from 1 to 12")]
    InvalidMonth(String),
}
