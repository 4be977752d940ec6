//! This module provides the main entry point for fetching observations from the eKlima
//! `MetDataService`, either through a configured [`MetClient`] or the [`get_met_data`]
//! shortcut that uses the default endpoint.

use crate::error::MetDataError;
use crate::request::filters::{HourFilter, MonthFilter};
use crate::request::ids::{ElementCode, StationId};
use crate::request::params::{QueryParams, DEFAULT_BASE_URL};
use crate::request::query::{parse_date, Query};
use crate::request::series_type::SeriesType;
use crate::reshape::parser::parse_response;
use crate::reshape::timezone::into_long_table;
use crate::transport::loader::MetDataLoader;
use crate::types::long_table::LongTable;
use crate::types::met_table::MetTable;
use crate::types::observation::Observation;
use crate::types::wide_table::WideTable;
use bon::bon;
use chrono_tz::Tz;
use log::{info, warn};
use std::time::Duration;

/// Client for the eKlima `getMetData` operation.
///
/// Every call issues exactly one blocking HTTP GET; nothing is cached or retried, and
/// no state is shared between calls, so one client can be used from several threads.
///
/// # Examples
///
/// ```
/// use metno::MetClient;
/// use std::time::Duration;
///
/// let client = MetClient::builder()
///     .base_url("http://localhost:8080/metdata/MetDataService")
///     .timeout(Duration::from_secs(30))
///     .build();
/// assert_eq!(client.base_url(), "http://localhost:8080/metdata/MetDataService");
/// ```
#[derive(Debug, Clone)]
pub struct MetClient {
    loader: MetDataLoader,
}

#[bon]
impl MetClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(impl Into<String>)`: Optional. Service URL without query string.
    ///   Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Total request timeout. When not set, the HTTP
    ///   client's default applies.
    #[builder]
    pub fn new(#[builder(into)] base_url: Option<String>, timeout: Option<Duration>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            loader: MetDataLoader::new(base_url, timeout),
        }
    }

    /// Fetches observations using plain string arguments, the way the service itself
    /// takes them.
    ///
    /// All arguments are validated before the request is sent, so malformed input never
    /// reaches the network.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.series_type_id(&str)`: **Required.** Time series type; only `"2"` is supported.
    /// * `.stations(&str)`: **Required.** Comma separated station ids, e.g. `"18700,68860"`.
    /// * `.elements(&str)`: **Required.** Comma separated element codes, e.g. `"TA,RR_24"`.
    /// * `.from_date(&str)` / `.to_date(&str)`: **Required.** Inclusive range, `YYYY-MM-DD`.
    /// * `.hours(&str)`: Optional. Comma separated UTC hours (0-23). Empty means all.
    /// * `.months(&str)`: Optional. Comma separated months (1-12). Empty means all.
    /// * `.timezone(Tz)`: Optional. Timezone of the returned timestamps, defaults to UTC.
    /// * `.long_format(bool)`: Optional. Return a [`MetTable::Long`] instead of the default
    ///   [`MetTable::Wide`].
    ///
    /// Hour and month filters are evaluated by the service in UTC, whatever `timezone`
    /// is. With `hours("11")` and `Europe/Oslo` the summer rows come back at 13:00.
    ///
    /// # Errors
    ///
    /// * [`MetDataError::Validation`] for malformed arguments (nothing is sent).
    /// * [`MetDataError::Network`] for connection failures, timeouts and non-success statuses.
    /// * [`MetDataError::Parse`] when the body does not match the expected layout.
    /// * [`MetDataError::QueryRejected`] when the service answers with an error message
    ///   instead of data.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use metno::{MetClient, MetDataError};
    /// # fn main() -> Result<(), MetDataError> {
    /// let client = MetClient::default();
    /// let table = client
    ///     .get_met_data()
    ///     .series_type_id("2")
    ///     .stations("18700,68860")
    ///     .elements("TA")
    ///     .from_date("2015-06-10")
    ///     .to_date("2015-06-15")
    ///     .hours("11")
    ///     .timezone(chrono_tz::Europe::Oslo)
    ///     .call()?;
    ///
    /// println!("{:?}", table.to_dataframe());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn get_met_data(
        &self,
        series_type_id: &str,
        stations: &str,
        elements: &str,
        from_date: &str,
        to_date: &str,
        hours: Option<&str>,
        months: Option<&str>,
        timezone: Option<Tz>,
        long_format: Option<bool>,
    ) -> Result<MetTable, MetDataError> {
        let query = Query::builder()
            .series_type(series_type_id.parse::<SeriesType>()?)
            .stations(StationId::parse_list(stations)?)
            .elements(ElementCode::parse_list(elements)?)
            .from_date(parse_date(from_date)?)
            .to_date(parse_date(to_date)?)
            .hours(hours.unwrap_or_default().parse::<HourFilter>()?)
            .months(months.unwrap_or_default().parse::<MonthFilter>()?)
            .timezone(timezone.unwrap_or(Tz::UTC))
            .build()?;

        if long_format.unwrap_or(false) {
            self.long(&query).map(MetTable::Long)
        } else {
            self.wide(&query).map(MetTable::Wide)
        }
    }
}

impl MetClient {
    pub fn base_url(&self) -> &str {
        self.loader.base_url()
    }

    /// Runs `query` and returns the parsed observations in document order, timestamps
    /// still in UTC.
    pub fn observations(&self, query: &Query) -> Result<Vec<Observation>, MetDataError> {
        let params = QueryParams::from_query(query);
        let body = self.loader.fetch(&params)?;
        let parsed = parse_response(&body)?;

        if let Some(message) = parsed.rejection() {
            warn!("Query rejected by service: {}", message);
            return Err(MetDataError::QueryRejected(message.to_string()));
        }
        Ok(parsed.observations)
    }

    /// Runs `query` and returns one row per observation, in the query's timezone.
    pub fn long(&self, query: &Query) -> Result<LongTable, MetDataError> {
        let observations = self.observations(query)?;
        Ok(into_long_table(observations, query.timezone()))
    }

    /// Runs `query` and pivots the result to one column per (variable, station) pair.
    pub fn wide(&self, query: &Query) -> Result<WideTable, MetDataError> {
        let wide = self.long(query)?.to_wide()?;
        let (rows, columns) = wide.shape();
        info!("Built wide table with {} rows and {} columns", rows, columns);
        Ok(wide)
    }
}

impl Default for MetClient {
    fn default() -> Self {
        MetClient::builder().build()
    }
}

/// [`MetClient::get_met_data`] against the public eKlima endpoint.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), metno::MetDataError> {
/// let table = metno::get_met_data()
///     .series_type_id("2")
///     .stations("18700")
///     .elements("TA,RR_24")
///     .from_date("2015-06-10")
///     .to_date("2015-06-15")
///     .long_format(true)
///     .call()?;
/// assert!(table.as_long().is_some());
/// # Ok(())
/// # }
/// ```
#[bon::builder]
#[allow(clippy::too_many_arguments)]
pub fn get_met_data(
    series_type_id: &str,
    stations: &str,
    elements: &str,
    from_date: &str,
    to_date: &str,
    hours: Option<&str>,
    months: Option<&str>,
    timezone: Option<Tz>,
    long_format: Option<bool>,
) -> Result<MetTable, MetDataError> {
    MetClient::default()
        .get_met_data()
        .series_type_id(series_type_id)
        .stations(stations)
        .elements(elements)
        .from_date(from_date)
        .to_date(to_date)
        .maybe_hours(hours)
        .maybe_months(months)
        .maybe_timezone(timezone)
        .maybe_long_format(long_format)
        .call()
}
