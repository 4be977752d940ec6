//! Parses the SOAP/XML body returned by `getMetData` into [`Observation`]s.
//!
//! Expected layout (namespace prefixes are ignored, elements are matched by local name):
//!
//! ```text
//! Envelope/Body/getMetDataResponse/return
//!   timeStamp/item*
//!     from                      2015-06-10T11:00:00.000Z
//!     location/item*
//!       id                      18700
//!       weatherElement/item*
//!         id                    TA
//!         quality               0
//!         value                 13.1    (-99999 means missing)
//! ```

use crate::reshape::error::ParseError;
use crate::request::ids::{ElementCode, StationId};
use crate::types::observation::{Observation, MISSING_VALUE_MARKER};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, info, warn};
use roxmltree::{Document, Node};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// What a `getMetData` response contained.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Observations in document order.
    pub observations: Vec<Observation>,
    /// Free text the service put next to the time series, if any.
    pub message: Option<String>,
}

impl ParsedResponse {
    /// The service's error message, when it answered with no data and an error text.
    pub fn rejection(&self) -> Option<&str> {
        if !self.observations.is_empty() {
            return None;
        }
        self.message
            .as_deref()
            .filter(|message| message.contains("Error"))
    }
}

pub fn parse_response(body: &str) -> Result<ParsedResponse, ParseError> {
    let document = Document::parse(body).map_err(ParseError::Xml)?;

    let envelope = document.root_element();
    if envelope.tag_name().name() != "Envelope" {
        return Err(ParseError::UnexpectedRoot(
            envelope.tag_name().name().to_string(),
        ));
    }
    let body_node = required_child(envelope, "Body")?;
    let response = required_child(body_node, "getMetDataResponse")?;
    let result = required_child(response, "return")?;
    let time_stamps = required_child(result, "timeStamp")?;

    let message = result
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() != "timeStamp")
        .filter_map(|n| n.text())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string);

    let mut observations = Vec::new();
    for item in elements(time_stamps, "item") {
        parse_time_stamp(item, &mut observations)?;
    }

    info!("Parsed {} observations", observations.len());
    if let Some(message) = &message {
        warn!("Service message: {}", message);
    }

    Ok(ParsedResponse {
        observations,
        message,
    })
}

fn parse_time_stamp(item: Node, out: &mut Vec<Observation>) -> Result<(), ParseError> {
    let from = required_text(item, "from")?;
    let timestamp = parse_timestamp(from)?;

    let location = required_child(item, "location")?;
    for location_item in elements(location, "item") {
        let raw_station = required_text(location_item, "id")?;
        let station: StationId = raw_station
            .parse()
            .map_err(|_| ParseError::InvalidStation(raw_station.to_string()))?;

        let weather_elements = required_child(location_item, "weatherElement")?;
        for element_item in elements(weather_elements, "item") {
            out.push(parse_weather_element(element_item, timestamp, station)?);
        }
    }
    Ok(())
}

fn parse_weather_element(
    item: Node,
    timestamp: DateTime<Utc>,
    station: StationId,
) -> Result<Observation, ParseError> {
    let raw_element = required_text(item, "id")?;
    let element: ElementCode = raw_element
        .parse()
        .map_err(|_| ParseError::InvalidElement(raw_element.to_string()))?;

    let quality = match optional_text(item, "quality") {
        Some(raw) => Some(
            raw.parse::<u8>()
                .map_err(|_| ParseError::InvalidQuality(raw.to_string()))?,
        ),
        None => None,
    };

    let raw_value = required_text(item, "value")?;
    let value = if raw_value == MISSING_VALUE_MARKER {
        debug!("Missing {} at station {} for {}", element, station, timestamp);
        None
    } else {
        match raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                return Err(ParseError::InvalidValue {
                    station,
                    element,
                    value: raw_value.to_string(),
                })
            }
        }
    };

    Ok(Observation {
        timestamp,
        station,
        element,
        value,
        quality,
    })
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ParseError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn required_child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, ParseError> {
    elements(node, name)
        .next()
        .ok_or_else(|| ParseError::MissingElement {
            element: name,
            parent: node.tag_name().name().to_string(),
        })
}

fn optional_text<'a>(node: Node<'a, '_>, name: &'static str) -> Option<&'a str> {
    elements(node, name)
        .next()
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn required_text<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, ParseError> {
    let child = required_child(node, name)?;
    child
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ParseError::MissingText(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIXTURE: &str = include_str!("../../tests/fixtures/ta_18700_68860.xml");

    fn envelope(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <ns2:getMetDataResponse xmlns:ns2="http://no/met/metdata/service">
      <return>{}</return>
    </ns2:getMetDataResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#,
            inner
        )
    }

    fn single_item(from: &str, value: &str) -> String {
        envelope(&format!(
            "<timeStamp><item><from>{}</from><location><item><id>18700</id>\
             <weatherElement><item><id>TA</id><quality>0</quality><value>{}</value></item>\
             </weatherElement></item></location></item></timeStamp>",
            from, value
        ))
    }

    #[test]
    fn parses_fixture_in_document_order() {
        let parsed = parse_response(FIXTURE).unwrap();

        // 6 days, 2 stations, 1 element
        assert_eq!(parsed.observations.len(), 12);
        assert_eq!(parsed.message, None);

        let first = &parsed.observations[0];
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2015, 6, 10, 11, 0, 0).unwrap());
        assert_eq!(first.station, StationId(18700));
        assert_eq!(first.element.as_str(), "TA");
        assert_eq!(first.value, Some(17.2));
        assert_eq!(first.quality, Some(0));

        assert_eq!(parsed.observations[1].station, StationId(68860));
        let last = parsed.observations.last().unwrap();
        assert_eq!(last.timestamp, Utc.with_ymd_and_hms(2015, 6, 15, 11, 0, 0).unwrap());
    }

    #[test]
    fn missing_marker_becomes_none() {
        let parsed = parse_response(&single_item("2015-06-10T11:00:00.000Z", "-99999")).unwrap();

        assert_eq!(parsed.observations.len(), 1);
        assert_eq!(parsed.observations[0].value, None);
    }

    #[test]
    fn fixture_keeps_missing_values() {
        let parsed = parse_response(FIXTURE).unwrap();
        let missing: Vec<_> = parsed
            .observations
            .iter()
            .filter(|o| o.value.is_none())
            .collect();

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].station, StationId(68860));
    }

    #[test]
    fn accepts_timestamps_without_fraction() {
        let parsed = parse_response(&single_item("2015-06-10T11:00:00Z", "1.5")).unwrap();
        assert_eq!(
            parsed.observations[0].timestamp,
            Utc.with_ymd_and_hms(2015, 6, 10, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let result = parse_response(&single_item("10.06.2015 11:00", "1.5"));
        assert!(matches!(result, Err(ParseError::InvalidTimestamp { .. })));
    }

    #[test]
    fn rejects_non_numeric_value() {
        let result = parse_response(&single_item("2015-06-10T11:00:00.000Z", "warm"));
        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));

        let empty = parse_response(&single_item("2015-06-10T11:00:00.000Z", ""));
        assert!(matches!(empty, Err(ParseError::MissingText("value"))));
    }

    #[test]
    fn rejects_missing_header() {
        let result = parse_response(&envelope("<somethingElse/>"));
        assert!(matches!(
            result,
            Err(ParseError::MissingElement {
                element: "timeStamp",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_soap_documents() {
        assert!(matches!(
            parse_response("<html><body>Service down</body></html>"),
            Err(ParseError::UnexpectedRoot(root)) if root == "html"
        ));
        assert!(matches!(parse_response("not xml at all"), Err(ParseError::Xml(_))));
        assert!(matches!(parse_response(""), Err(ParseError::Xml(_))));
    }

    #[test]
    fn reads_every_location_of_a_time_stamp() {
        let body = envelope(
            "<timeStamp><item><from>2015-06-10T11:00:00.000Z</from><location>\
             <item><id>18700</id><weatherElement><item><id>TA</id><value>1</value></item>\
             <item><id>FF</id><value>2</value></item></weatherElement></item>\
             <item><id>68860</id><weatherElement><item><id>TA</id><value>3</value></item>\
             </weatherElement></item></location></item></timeStamp>",
        );
        let parsed = parse_response(&body).unwrap();

        let tuples: Vec<(u32, &str, Option<f64>, Option<u8>)> = parsed
            .observations
            .iter()
            .map(|o| (o.station.0, o.element.as_str(), o.value, o.quality))
            .collect();
        assert_eq!(
            tuples,
            [
                (18700, "TA", Some(1.0), None),
                (18700, "FF", Some(2.0), None),
                (68860, "TA", Some(3.0), None),
            ]
        );
    }

    #[test]
    fn reports_service_errors() {
        let body = envelope(
            "<timeStamp/><message>Error: station 99999999 does not exist</message>",
        );
        let parsed = parse_response(&body).unwrap();

        assert!(parsed.observations.is_empty());
        assert_eq!(
            parsed.rejection(),
            Some("Error: station 99999999 does not exist")
        );
    }

    #[test]
    fn empty_result_without_error_is_not_a_rejection() {
        let parsed = parse_response(&envelope("<timeStamp/>")).unwrap();
        assert!(parsed.observations.is_empty());
        assert_eq!(parsed.rejection(), None);
    }
}
