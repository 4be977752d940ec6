//! Contains the [`LongTable`], one row per (timestamp, station, variable) observation.

use crate::request::ids::{ElementCode, StationId};
use crate::reshape::error::ParseError;
use crate::reshape::pivot::pivot;
use crate::types::wide_table::WideTable;
use chrono::DateTime;
use chrono_tz::Tz;
use polars::prelude::{
    DataFrame, DatetimeChunked, IntoSeries, NamedFrom, PolarsResult, Series, TimeUnit,
};

/// Column names of [`LongTable::to_dataframe`], in order.
pub const LONG_COLUMNS: [&str; 4] = ["date", "st.no", "value", "variable"];

/// One row of a [`LongTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    /// Observation time in the table's timezone.
    pub date: DateTime<Tz>,
    pub station: StationId,
    /// `None` when the service reported the value as missing.
    pub value: Option<f64>,
    pub variable: ElementCode,
}

/// Observations in long form, in the order the service returned them.
///
/// This is the canonical intermediate form: [`WideTable`]s are built from it and can be
/// turned back into it with [`WideTable::to_long`].
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    timezone: Tz,
    rows: Vec<LongRow>,
}

impl LongTable {
    pub fn new(timezone: Tz, rows: Vec<LongRow>) -> Self {
        Self { timezone, rows }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn rows(&self) -> &[LongRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pivots into one column per (variable, station) pair.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateObservation`] if a (timestamp, station, variable)
    /// key occurs more than once.
    pub fn to_wide(&self) -> Result<WideTable, ParseError> {
        pivot(self)
    }

    /// Materializes the table as a polars `DataFrame` with columns
    /// `date`, `st.no`, `value`, `variable`.
    ///
    /// The `date` column holds the local wall-clock time in the table's timezone
    /// (millisecond precision, no timezone attached), like the index of the wide frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use metno::LongTable;
    ///
    /// let empty = LongTable::new(chrono_tz::Tz::UTC, Vec::new());
    /// let df = empty.to_dataframe().unwrap();
    /// assert_eq!(df.get_column_names(), ["date", "st.no", "value", "variable"]);
    /// ```
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let [date_name, station_name, value_name, variable_name] = LONG_COLUMNS;

        let dates = DatetimeChunked::from_naive_datetime(
            date_name.into(),
            self.rows.iter().map(|row| row.date.naive_local()),
            TimeUnit::Milliseconds,
        )
        .into_series();
        let stations = Series::new(
            station_name.into(),
            self.rows.iter().map(|row| row.station.0).collect::<Vec<u32>>(),
        );
        let values = Series::new(
            value_name.into(),
            self.rows.iter().map(|row| row.value).collect::<Vec<Option<f64>>>(),
        );
        let variables = Series::new(
            variable_name.into(),
            self.rows
                .iter()
                .map(|row| row.variable.as_str())
                .collect::<Vec<&str>>(),
        );

        DataFrame::new(vec![
            dates.into(),
            stations.into(),
            values.into(),
            variables.into(),
        ])
    }
}
