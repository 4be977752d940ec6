use crate::types::long_table::LongTable;
use crate::types::wide_table::WideTable;
use polars::prelude::{DataFrame, PolarsResult};

/// The result of [`get_met_data`](crate::get_met_data), in the requested layout.
#[derive(Debug, Clone, PartialEq)]
pub enum MetTable {
    /// One row per timestamp, one column per (variable, station) pair.
    Wide(WideTable),
    /// One row per (timestamp, station, variable).
    Long(LongTable),
}

impl MetTable {
    pub fn as_wide(&self) -> Option<&WideTable> {
        match self {
            MetTable::Wide(wide) => Some(wide),
            MetTable::Long(_) => None,
        }
    }

    pub fn as_long(&self) -> Option<&LongTable> {
        match self {
            MetTable::Long(long) => Some(long),
            MetTable::Wide(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MetTable::Wide(wide) => wide.is_empty(),
            MetTable::Long(long) => long.is_empty(),
        }
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        match self {
            MetTable::Wide(wide) => wide.to_dataframe(),
            MetTable::Long(long) => long.to_dataframe(),
        }
    }
}

impl From<WideTable> for MetTable {
    fn from(wide: WideTable) -> Self {
        MetTable::Wide(wide)
    }
}

impl From<LongTable> for MetTable {
    fn from(long: LongTable) -> Self {
        MetTable::Long(long)
    }
}
