use crate::request::query::Query;
use std::fmt;

/// Base URL of the eKlima `MetDataService`, including the fixed `invoke` parameter.
pub const DEFAULT_BASE_URL: &str = "http://eklima.met.no/metdata/MetDataService";

const INVOKE: &str = "invoke=getMetData";

/// Query-string parameters of a `getMetData` call, in the order the service documents them.
///
/// Values are kept verbatim. The service expects literal commas in the list parameters,
/// so nothing is percent-encoded; [`crate::ElementCode`] and [`crate::StationId`] only
/// admit characters that are safe in a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn from_query(query: &Query) -> Self {
        let stations = query
            .stations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let elements = query
            .elements()
            .iter()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let pairs = vec![
            ("timeserietypeid", query.series_type().id().to_string()),
            ("format", String::new()),
            ("from", query.from_date().format("%Y-%m-%d").to_string()),
            ("to", query.to_date().format("%Y-%m-%d").to_string()),
            ("stations", stations),
            ("elements", elements),
            ("hours", query.hours().to_param()),
            ("months", query.months().to_param()),
            ("username", String::new()),
        ];
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Full request URL for the given service base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}?{}&{}", base_url.trim_end_matches('?'), INVOKE, self)
    }
}

/// Formats as `key=value&key=value...` without the `invoke` prefix.
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::filters::{HourFilter, MonthFilter};
    use crate::request::ids::{ElementCode, StationId};
    use chrono::NaiveDate;
    use chrono_tz::Europe::Oslo;

    fn example_query() -> Query {
        Query::builder()
            .stations(StationId::parse_list("18700,68860").unwrap())
            .elements(ElementCode::parse_list("TA, TAX").unwrap())
            .from_date(NaiveDate::from_ymd_opt(2015, 6, 10).unwrap())
            .to_date(NaiveDate::from_ymd_opt(2015, 6, 15).unwrap())
            .hours("11".parse::<HourFilter>().unwrap())
            .timezone(Oslo)
            .build()
            .unwrap()
    }

    #[test]
    fn encodes_every_parameter() {
        let params = QueryParams::from_query(&example_query());

        assert_eq!(
            params.to_string(),
            "timeserietypeid=2&format=&from=2015-06-10&to=2015-06-15&stations=18700,68860\
             &elements=TA,TAX&hours=11&months=&username="
        );
        assert_eq!(params.get("stations"), Some("18700,68860"));
        assert_eq!(params.get("months"), Some(""));
        assert_eq!(params.get("nope"), None);
    }

    #[test]
    fn timezone_does_not_change_the_request() {
        let oslo = QueryParams::from_query(&example_query());
        let utc_query = Query::builder()
            .stations(StationId::parse_list("18700,68860").unwrap())
            .elements(ElementCode::parse_list("TA,TAX").unwrap())
            .from_date(NaiveDate::from_ymd_opt(2015, 6, 10).unwrap())
            .to_date(NaiveDate::from_ymd_opt(2015, 6, 15).unwrap())
            .hours("11".parse::<HourFilter>().unwrap())
            .build()
            .unwrap();

        assert_eq!(oslo, QueryParams::from_query(&utc_query));
    }

    #[test]
    fn joins_month_filter() {
        let query = Query::builder()
            .stations(vec![StationId(18700)])
            .elements(ElementCode::parse_list("RR_24").unwrap())
            .from_date(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap())
            .to_date(NaiveDate::from_ymd_opt(2012, 1, 1).unwrap())
            .months(MonthFilter::only([12, 1, 2]).unwrap())
            .build()
            .unwrap();
        let params = QueryParams::from_query(&query);

        assert_eq!(params.get("months"), Some("1,2,12"));
        assert_eq!(params.get("hours"), Some(""));
    }

    #[test]
    fn builds_full_url() {
        let params = QueryParams::from_query(&example_query());
        let url = params.url(DEFAULT_BASE_URL);

        assert!(url.starts_with(
            "http://eklima.met.no/metdata/MetDataService?invoke=getMetData&timeserietypeid=2&"
        ));
        assert!(url.ends_with("&username="));
    }
}
