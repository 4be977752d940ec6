//! Moves observation timestamps from UTC into the caller's timezone.
//!
//! Only the presentation changes: the same instants are kept, so hour filters sent to the
//! service (always UTC) show up shifted by the zone's offset in the result.

use crate::types::long_table::{LongRow, LongTable};
use crate::types::observation::Observation;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Converts a UTC timestamp into `timezone`, honouring daylight saving time.
pub fn localize(timestamp: DateTime<Utc>, timezone: Tz) -> DateTime<Tz> {
    timestamp.with_timezone(&timezone)
}

/// Builds the long table, keeping the parse order of `observations`.
pub fn into_long_table(observations: Vec<Observation>, timezone: Tz) -> LongTable {
    let rows = observations
        .into_iter()
        .map(|observation| LongRow {
            date: localize(observation.timestamp, timezone),
            station: observation.station,
            value: observation.value,
            variable: observation.element,
        })
        .collect();
    LongTable::new(timezone, rows)
}
