//! Building and validating `getMetData` requests. Nothing in here touches the network.

pub mod error;
pub mod filters;
pub mod ids;
pub mod params;
pub mod query;
pub mod series_type;
