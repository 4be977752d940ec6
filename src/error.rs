use crate::request::error::ValidationError;
use crate::reshape::error::ParseError;
use crate::transport::error::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetDataError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("The service rejected the query: {0}")]
    QueryRejected(String),
}
