//! Long to wide and back, by explicit grouping on (variable, station).

use crate::request::ids::{ElementCode, StationId};
use crate::reshape::error::ParseError;
use crate::types::long_table::{LongRow, LongTable};
use crate::types::wide_table::{Cell, WideColumn, WideTable};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

type Series = BTreeMap<DateTime<Tz>, Option<f64>>;

/// Pivots a long table so every (variable, station) pair becomes one column.
///
/// Rows are keyed by instant, so two local wall-clock times that coincide around a
/// daylight saving switch still get separate rows.
///
/// # Errors
///
/// A repeated (timestamp, station, variable) key fails with
/// [`ParseError::DuplicateObservation`]; no value is silently overwritten.
pub fn pivot(long: &LongTable) -> Result<WideTable, ParseError> {
    let mut grouped: BTreeMap<(ElementCode, StationId), Series> = BTreeMap::new();
    let mut index = BTreeSet::new();

    for row in long.rows() {
        let series = grouped
            .entry((row.variable.clone(), row.station))
            .or_default();
        match series.entry(row.date) {
            Entry::Occupied(_) => {
                return Err(ParseError::DuplicateObservation {
                    timestamp: row.date.with_timezone(&Utc),
                    station: row.station,
                    element: row.variable.clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(row.value);
            }
        }
        index.insert(row.date);
    }

    let index: Vec<DateTime<Tz>> = index.into_iter().collect();
    let columns: Vec<WideColumn> = grouped
        .into_iter()
        .map(|((variable, station), series)| {
            let cells = index
                .iter()
                .map(|ts| match series.get(ts) {
                    None => Cell::Absent,
                    Some(None) => Cell::Missing,
                    Some(Some(v)) => Cell::Value(*v),
                })
                .collect();
            WideColumn::new(variable, station, cells)
        })
        .collect();

    debug!(
        "Pivoted {} rows into {} timestamps x {} columns",
        long.len(),
        index.len(),
        columns.len()
    );
    Ok(WideTable::new(long.timezone(), index, columns))
}

/// Turns a wide table back into long rows, ordered by timestamp then column.
pub fn melt(wide: &WideTable) -> LongTable {
    let mut rows = Vec::new();
    for (i, date) in wide.index().iter().enumerate() {
        for column in wide.columns() {
            let cell = column.cells()[i];
            if !cell.is_observed() {
                continue;
            }
            rows.push(LongRow {
                date: *date,
                station: column.station(),
                value: cell.value(),
                variable: column.variable().clone(),
            });
        }
    }
    LongTable::new(wide.timezone(), rows)
}
