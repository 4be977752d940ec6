pub mod long_table;
pub mod met_table;
pub mod observation;
pub mod wide_table;
