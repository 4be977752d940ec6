//! The validated, immutable description of one `getMetData` request.

use crate::request::error::ValidationError;
use crate::request::filters::{HourFilter, MonthFilter};
use crate::request::ids::{ElementCode, StationId};
use crate::request::series_type::SeriesType;
use bon::bon;
use chrono::NaiveDate;
use chrono_tz::Tz;

/// Everything needed to fetch and reshape one batch of observations.
///
/// A `Query` can only be obtained through [`Query::builder`], which validates the
/// station and element lists and the date range, so every `Query` in hand is one the
/// service can be asked for.
///
/// The hour and month filters are applied by the service in UTC. The `timezone` only
/// affects how returned timestamps are presented.
///
/// # Examples
///
/// ```
/// use metno::{ElementCode, HourFilter, Query, StationId};
/// use chrono::NaiveDate;
/// use chrono_tz::Europe::Oslo;
///
/// let query = Query::builder()
///     .stations(StationId::parse_list("18700,68860")?)
///     .elements(ElementCode::parse_list("TA")?)
///     .from_date(NaiveDate::from_ymd_opt(2015, 6, 10).unwrap())
///     .to_date(NaiveDate::from_ymd_opt(2015, 6, 15).unwrap())
///     .hours("11".parse::<HourFilter>()?)
///     .timezone(Oslo)
///     .build()?;
///
/// assert_eq!(query.stations().len(), 2);
/// # Ok::<(), metno::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    series_type: SeriesType,
    stations: Vec<StationId>,
    elements: Vec<ElementCode>,
    from_date: NaiveDate,
    to_date: NaiveDate,
    hours: HourFilter,
    months: MonthFilter,
    timezone: Tz,
}

#[bon]
impl Query {
    /// Builds a validated query.
    ///
    /// # Arguments
    ///
    /// * `.stations(Vec<StationId>)`: **Required.** Stations in the order they should be requested.
    /// * `.elements(Vec<ElementCode>)`: **Required.** Element codes to request.
    /// * `.from_date(NaiveDate)` / `.to_date(NaiveDate)`: **Required.** Inclusive date range.
    /// * `.series_type(SeriesType)`: Optional. Defaults to [`SeriesType::Observations`].
    /// * `.hours(HourFilter)` / `.months(MonthFilter)`: Optional. Default to all.
    /// * `.timezone(Tz)`: Optional. Output timezone, defaults to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoStations`] or [`ValidationError::NoElements`] for
    /// empty lists and [`ValidationError::InvertedDateRange`] when `from_date > to_date`.
    #[builder]
    pub fn new(
        series_type: Option<SeriesType>,
        stations: Vec<StationId>,
        elements: Vec<ElementCode>,
        from_date: NaiveDate,
        to_date: NaiveDate,
        hours: Option<HourFilter>,
        months: Option<MonthFilter>,
        timezone: Option<Tz>,
    ) -> Result<Self, ValidationError> {
        if stations.is_empty() {
            return Err(ValidationError::NoStations);
        }
        if elements.is_empty() {
            return Err(ValidationError::NoElements);
        }
        if from_date > to_date {
            return Err(ValidationError::InvertedDateRange {
                from: from_date,
                to: to_date,
            });
        }

        Ok(Self {
            series_type: series_type.unwrap_or_default(),
            stations,
            elements,
            from_date,
            to_date,
            hours: hours.unwrap_or_default(),
            months: months.unwrap_or_default(),
            timezone: timezone.unwrap_or(Tz::UTC),
        })
    }
}

impl Query {
    pub fn series_type(&self) -> SeriesType {
        self.series_type
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn elements(&self) -> &[ElementCode] {
        &self.elements
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    pub fn hours(&self) -> &HourFilter {
        &self.hours
    }

    pub fn months(&self) -> &MonthFilter {
        &self.months
    }

    /// Timezone the returned timestamps are converted to.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// Parses a `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|source| {
        ValidationError::InvalidDate {
            value: trimmed.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Oslo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_with_defaults() {
        let query = Query::builder()
            .stations(vec![StationId(18700)])
            .elements(ElementCode::parse_list("TA").unwrap())
            .from_date(date(2015, 6, 10))
            .to_date(date(2015, 6, 10))
            .build()
            .unwrap();

        assert_eq!(query.series_type(), SeriesType::Observations);
        assert_eq!(query.hours(), &HourFilter::All);
        assert_eq!(query.months(), &MonthFilter::All);
        assert_eq!(query.timezone(), Tz::UTC);
    }

    #[test]
    fn keeps_station_order() {
        let query = Query::builder()
            .stations(vec![StationId(68860), StationId(18700)])
            .elements(ElementCode::parse_list("TA,FF").unwrap())
            .from_date(date(2015, 6, 10))
            .to_date(date(2015, 6, 15))
            .timezone(Oslo)
            .build()
            .unwrap();

        assert_eq!(query.stations(), &[StationId(68860), StationId(18700)]);
        assert_eq!(query.timezone(), Oslo);
    }

    #[test]
    fn rejects_inverted_range() {
        let result = Query::builder()
            .stations(vec![StationId(18700)])
            .elements(ElementCode::parse_list("TA").unwrap())
            .from_date(date(2015, 6, 15))
            .to_date(date(2015, 6, 10))
            .build();

        assert_eq!(
            result,
            Err(ValidationError::InvertedDateRange {
                from: date(2015, 6, 15),
                to: date(2015, 6, 10),
            })
        );
    }

    #[test]
    fn rejects_empty_lists() {
        let no_stations = Query::builder()
            .stations(Vec::new())
            .elements(ElementCode::parse_list("TA").unwrap())
            .from_date(date(2015, 6, 10))
            .to_date(date(2015, 6, 10))
            .build();
        assert_eq!(no_stations, Err(ValidationError::NoStations));

        let no_elements = Query::builder()
            .stations(vec![StationId(18700)])
            .elements(Vec::new())
            .from_date(date(2015, 6, 10))
            .to_date(date(2015, 6, 10))
            .build();
        assert_eq!(no_elements, Err(ValidationError::NoElements));
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date(" 2015-06-10 "), Ok(date(2015, 6, 10)));
        assert!(matches!(
            parse_date("2015-02-30"),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(parse_date("10.06.2015").is_err());
        assert!(parse_date("").is_err());
    }
}
