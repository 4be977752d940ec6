mod error;
mod met_client;
mod request;
mod reshape;
mod transport;
mod types;

pub use error::MetDataError;
pub use met_client::*;

pub use request::filters::{HourFilter, MonthFilter};
pub use request::ids::{ElementCode, StationId, KNOWN_ELEMENTS};
pub use request::params::{QueryParams, DEFAULT_BASE_URL};
pub use request::query::Query;
pub use request::series_type::SeriesType;

pub use reshape::parser::{parse_response, ParsedResponse};
pub use reshape::pivot::{melt, pivot};
pub use reshape::timezone::{into_long_table, localize};

pub use types::long_table::{LongRow, LongTable, LONG_COLUMNS};
pub use types::met_table::MetTable;
pub use types::observation::{Observation, MISSING_VALUE_MARKER};
pub use types::wide_table::{Cell, WideColumn, WideTable, INDEX_COLUMN};

pub use request::error::ValidationError;
pub use reshape::error::ParseError;
pub use transport::error::NetworkError;
