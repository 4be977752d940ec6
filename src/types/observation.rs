//! A single reading as reported by the service.

use crate::request::ids::{ElementCode, StationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value the service uses for "no value".
pub const MISSING_VALUE_MARKER: &str = "-99999";

/// One reading of one element at one station, with its timestamp still in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation time (UTC).
    pub timestamp: DateTime<Utc>,
    pub station: StationId,
    pub element: ElementCode,
    /// `None` when the service reported the value as missing.
    pub value: Option<f64>,
    /// Quality flag reported next to the value, if any.
    pub quality: Option<u8>,
}
