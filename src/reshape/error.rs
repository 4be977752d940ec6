use crate::request::ids::{ElementCode, StationId};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Response body is not valid XML")]
    Xml(#[source] roxmltree::Error),

    #[error("Unexpected root element '{0}', expected 'Envelope'")]
    UnexpectedRoot(String),

    #[error("Missing element '{element}' inside '{parent}'")]
    MissingElement {
        element: &'static str,
        parent: String,
    },

    #[error("Element '{0}' has no text")]
    MissingText(&'static str),

    #[error("Malformed timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Malformed station id '{0}'")]
    InvalidStation(String),

    #[error("Malformed element code '{0}'")]
    InvalidElement(String),

    #[error("Value '{value}' of {element} at station {station} is not a number")]
    InvalidValue {
        station: StationId,
        element: ElementCode,
        value: String,
    },

    #[error("Malformed quality flag '{0}'")]
    InvalidQuality(String),

    #[error("Duplicate observation of {element} at station {station} for {timestamp}")]
    DuplicateObservation {
        timestamp: DateTime<Utc>,
        station: StationId,
        element: ElementCode,
    },
}
