//! Contains the [`WideTable`], one row per timestamp and one column per
//! (variable, station) pair.

use crate::request::ids::{ElementCode, StationId};
use crate::reshape::pivot::melt;
use crate::types::long_table::LongTable;
use chrono::DateTime;
use chrono_tz::Tz;
use polars::prelude::{
    DataFrame, DatetimeChunked, IntoSeries, NamedFrom, PolarsResult, Series, TimeUnit,
};

/// Name of the index column in [`WideTable::to_dataframe`].
pub const INDEX_COLUMN: &str = "date";

/// Content of one cell of a [`WideTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// The service returned nothing for this timestamp, station and variable.
    Absent,
    /// The service returned the observation but marked its value as missing.
    Missing,
    Value(f64),
}

impl Cell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Value(v) => Some(*v),
            Cell::Absent | Cell::Missing => None,
        }
    }

    /// Whether the service reported this observation at all.
    pub fn is_observed(&self) -> bool {
        !matches!(self, Cell::Absent)
    }
}

/// The values of one (variable, station) pair, aligned with [`WideTable::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct WideColumn {
    variable: ElementCode,
    station: StationId,
    cells: Vec<Cell>,
}

impl WideColumn {
    pub(crate) fn new(variable: ElementCode, station: StationId, cells: Vec<Cell>) -> Self {
        Self {
            variable,
            station,
            cells,
        }
    }

    /// Column name, `"{variable}_{station}"`, e.g. `TA_18700`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.variable, self.station)
    }

    pub fn variable(&self) -> &ElementCode {
        &self.variable
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::value).collect()
    }
}

/// Observations pivoted to one row per timestamp.
///
/// The index is strictly ascending and unique. Columns are ordered by variable, then
/// station, and only exist for pairs that occur in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    timezone: Tz,
    index: Vec<DateTime<Tz>>,
    columns: Vec<WideColumn>,
}

impl WideTable {
    pub(crate) fn new(timezone: Tz, index: Vec<DateTime<Tz>>, columns: Vec<WideColumn>) -> Self {
        Self {
            timezone,
            index,
            columns,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Row timestamps in the table's timezone.
    pub fn index(&self) -> &[DateTime<Tz>] {
        &self.index
    }

    pub fn columns(&self) -> &[WideColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(WideColumn::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&WideColumn> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// `(rows, value columns)`; the index is not counted as a column.
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The cell at `timestamp` in column `name`, if both exist.
    pub fn get(&self, timestamp: &DateTime<Tz>, name: &str) -> Option<Cell> {
        let row = self.index.binary_search(timestamp).ok()?;
        self.column(name).map(|column| column.cells[row])
    }

    /// Melts back into long form, ordered by timestamp and then column order.
    /// Absent cells produce no row; missing values are kept as `None`.
    pub fn to_long(&self) -> LongTable {
        melt(self)
    }

    /// Materializes the table as a polars `DataFrame`: a `date` column with local
    /// wall-clock times, followed by one `f64` column per (variable, station) pair.
    ///
    /// In zones with daylight saving time the `date` column can repeat a value: the two
    /// instants of the autumn fall-back hour are separate rows here but share one local
    /// wall-clock time.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates = DatetimeChunked::from_naive_datetime(
            INDEX_COLUMN.into(),
            self.index.iter().map(|ts| ts.naive_local()),
            TimeUnit::Milliseconds,
        )
        .into_series();

        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(dates.into());
        for column in &self.columns {
            columns.push(Series::new(column.name().into(), column.values()).into());
        }
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Oslo;

    fn table() -> WideTable {
        let index = vec![
            Oslo.with_ymd_and_hms(2015, 6, 10, 13, 0, 0).unwrap(),
            Oslo.with_ymd_and_hms(2015, 6, 11, 13, 0, 0).unwrap(),
        ];
        let ta = "TA".parse::<ElementCode>().unwrap();
        let columns = vec![
            WideColumn::new(
                ta.clone(),
                StationId(18700),
                vec![Cell::Value(17.2), Cell::Value(15.8)],
            ),
            WideColumn::new(ta, StationId(68860), vec![Cell::Value(12.9), Cell::Missing]),
        ];
        WideTable::new(Oslo, index, columns)
    }

    #[test]
    fn names_columns_by_variable_and_station() {
        let table = table();
        assert_eq!(table.column_names(), ["TA_18700", "TA_68860"]);
        assert_eq!(table.shape(), (2, 2));
        assert!(table.column("TA_99999").is_none());
    }

    #[test]
    fn looks_up_cells() {
        let table = table();
        let second_day = Oslo.with_ymd_and_hms(2015, 6, 11, 13, 0, 0).unwrap();
        let unknown_day = Oslo.with_ymd_and_hms(2015, 6, 12, 13, 0, 0).unwrap();

        assert_eq!(table.get(&second_day, "TA_18700"), Some(Cell::Value(15.8)));
        assert_eq!(table.get(&second_day, "TA_68860"), Some(Cell::Missing));
        assert_eq!(table.get(&unknown_day, "TA_18700"), None);
    }

    #[test]
    fn cell_values() {
        assert_eq!(Cell::Value(1.5).value(), Some(1.5));
        assert_eq!(Cell::Missing.value(), None);
        assert!(Cell::Missing.is_observed());
        assert!(!Cell::Absent.is_observed());
    }

    #[test]
    fn dataframe_has_index_and_value_columns() -> Result<(), Box<dyn std::error::Error>> {
        let df = table().to_dataframe()?;

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.get_column_names(), ["date", "TA_18700", "TA_68860"]);
        let trondheim = df.column("TA_68860")?.f64()?;
        assert_eq!(trondheim.get(0), Some(12.9));
        assert_eq!(trondheim.get(1), None);
        Ok(())
    }

    #[test]
    fn dataframe_dates_repeat_at_autumn_fall_back() -> Result<(), Box<dyn std::error::Error>> {
        use chrono::Utc;

        // 00:00 and 01:00 UTC on 2015-10-25 are both 02:00 local in Oslo
        let index: Vec<DateTime<Tz>> = [0, 1]
            .into_iter()
            .map(|h| {
                Utc.with_ymd_and_hms(2015, 10, 25, h, 0, 0)
                    .unwrap()
                    .with_timezone(&Oslo)
            })
            .collect();
        let column = WideColumn::new(
            "TA".parse()?,
            StationId(18700),
            vec![Cell::Value(5.0), Cell::Value(4.0)],
        );
        let table = WideTable::new(Oslo, index, vec![column]);

        let dates = table.to_dataframe()?.column("date")?.datetime()?.clone();
        assert_eq!(table.shape(), (2, 1));
        assert_eq!(dates.get(0), dates.get(1));
        Ok(())
    }
}
