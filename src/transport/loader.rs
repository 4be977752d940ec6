use crate::request::params::QueryParams;
use crate::transport::error::NetworkError;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use std::time::Duration;

/// Issues the single blocking GET of a `getMetData` call.
///
/// A fresh client without idle connection pooling is built for every request, so calls
/// never share connections. There is no retry: the first failure is returned.
#[derive(Debug, Clone)]
pub struct MetDataLoader {
    base_url: String,
    timeout: Option<Duration>,
}

impl MetDataLoader {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> MetDataLoader {
        MetDataLoader {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads the raw response body for `params`. Any status outside 2xx is an error.
    pub fn fetch(&self, params: &QueryParams) -> Result<String, NetworkError> {
        let url = params.url(&self.base_url);
        info!("Requesting observations from {}", self.base_url);
        debug!("Full request url: {}", url);

        let response = self
            .client()?
            .get(&url)
            .send()
            .map_err(|e| Self::request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: status {}", url, status);
            return Err(NetworkError::HttpStatus { url, status });
        }

        let body = response.text().map_err(|e| {
            warn!("Reading body from {} failed: {}", url, e);
            if e.is_timeout() {
                NetworkError::Timeout(url.clone(), e)
            } else {
                NetworkError::Body(url.clone(), e)
            }
        })?;
        info!("Received {} bytes from {}", body.len(), self.base_url);
        Ok(body)
    }

    fn client(&self) -> Result<Client, NetworkError> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(NetworkError::ClientBuild)
    }

    fn request_error(url: &str, e: reqwest::Error) -> NetworkError {
        warn!("Request to {} failed: {}", url, e);
        if e.is_timeout() {
            NetworkError::Timeout(url.to_string(), e)
        } else {
            NetworkError::NetworkRequest(url.to_string(), e)
        }
    }
}
