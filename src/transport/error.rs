use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Request to {0} timed out")]
    Timeout(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),
}
