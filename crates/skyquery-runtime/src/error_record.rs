//! Error body parsing
//!
//! The upstream API has answered failures in several conventions over time:
//! XML, a v1 `errors[]`/`request` shape, and v2 problem documents (`title`,
//! `type`, `detail`) including an OAuth2 `error`/`error_description` pair.
//! `ErrorRecord::parse` folds all of them into one record and never fails.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNPARSABLE_XML_TITLE: &str = "Unable to Parse Response - please examine Detail property";
pub const UNHANDLED_TITLE: &str = "Unhandled Error - please examine Detail property";

/// Normalized error body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub status: Option<i64>,
    pub errors: Vec<ErrorEntry>,
}

/// One error within a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    pub request: Option<String>,
    pub code: Option<i64>,
    pub parameters: Option<BTreeMap<String, Vec<String>>>,
}

/// Every field any known JSON convention uses
#[derive(Debug, Deserialize)]
struct RawBody {
    title: Option<String>,
    detail: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    status: Option<i64>,
    errors: Option<Vec<RawEntry>>,
    error: Option<String>,
    error_description: Option<String>,
    request: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    message: String,
    code: Option<i64>,
    parameters: Option<BTreeMap<String, Vec<String>>>,
}

impl From<RawEntry> for ErrorEntry {
    fn from(raw: RawEntry) -> Self {
        ErrorEntry {
            message: raw.message,
            request: None,
            code: raw.code,
            parameters: raw.parameters,
        }
    }
}

/// An `<error>` element found anywhere in an XML body
#[derive(Debug, Default)]
struct XmlError {
    code: i64,
    message: String,
}

impl XmlError {
    /// A missing or non-numeric `code` attribute reads as 0
    fn open(element: &BytesStart) -> Self {
        let code = element
            .try_get_attribute("code")
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok()?.trim().parse().ok())
            .unwrap_or(0);

        XmlError {
            code,
            message: String::new(),
        }
    }
}

/// Collect every `<error>` element, at any depth, with its text content
fn scan_xml_errors(body: &str) -> Result<Vec<XmlError>, quick_xml::Error> {
    let mut reader = Reader::from_str(body);
    let mut errors = Vec::new();
    // The error being read and how many child elements deep we are inside it
    let mut open: Option<(XmlError, usize)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match open.as_mut() {
                Some((_, depth)) => *depth += 1,
                None if e.name().as_ref() == b"error" => open = Some((XmlError::open(&e), 0)),
                None => {}
            },
            Event::Empty(e) if open.is_none() && e.name().as_ref() == b"error" => {
                errors.push(XmlError::open(&e));
            }
            Event::Text(t) => {
                if let Some((error, _)) = open.as_mut() {
                    error.message.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some((error, _)) = open.as_mut() {
                    error.message.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => match open.take() {
                Some((error, 0)) => errors.push(error),
                Some((error, depth)) => open = Some((error, depth - 1)),
                None => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(errors)
}

impl ErrorRecord {
    /// Parse an error body of any known shape
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with("<?xml") || trimmed.starts_with("<!DOCTYPE") {
            return Self::parse_xml(body);
        }

        match serde_json::from_str::<RawBody>(body) {
            Ok(raw) => Self::from_json(raw, body),
            Err(e) => {
                tracing::debug!("error body is not a recognized JSON shape: {}", e);
                Self::unhandled(body)
            }
        }
    }

    fn parse_xml(body: &str) -> Self {
        match scan_xml_errors(body) {
            Ok(mut errors) if errors.len() == 1 => {
                let error = errors.remove(0);
                ErrorRecord {
                    detail: Some(body.to_string()),
                    errors: vec![ErrorEntry {
                        message: error.message.trim().to_string(),
                        code: Some(error.code),
                        ..ErrorEntry::default()
                    }],
                    ..ErrorRecord::default()
                }
            }
            Ok(errors) => {
                tracing::debug!("XML error body has {} error elements", errors.len());
                Self::unparsable_xml(body)
            }
            Err(e) => {
                tracing::debug!("XML error body is malformed: {}", e);
                Self::unparsable_xml(body)
            }
        }
    }

    fn unparsable_xml(body: &str) -> Self {
        ErrorRecord {
            title: Some(UNPARSABLE_XML_TITLE.to_string()),
            detail: Some(body.to_string()),
            error_type: Some("XML Formatted Error".to_string()),
            ..ErrorRecord::default()
        }
    }

    fn from_json(raw: RawBody, body: &str) -> Self {
        let is_v2 = (raw.title.is_some() && raw.error_type.is_some())
            || (raw.error.is_some() && raw.error_description.is_some());

        if is_v2 {
            if let Some(entries) = raw.errors {
                return ErrorRecord {
                    title: raw.title,
                    detail: raw.detail,
                    error_type: raw.error_type,
                    status: raw.status,
                    errors: entries.into_iter().map(ErrorEntry::from).collect(),
                };
            }

            if let Some(error) = raw.error {
                let description = raw.error_description.unwrap_or_default();
                return ErrorRecord {
                    title: Some(error.clone()),
                    detail: Some(description.clone()),
                    error_type: Some("OAuth2".to_string()),
                    status: raw.status,
                    errors: vec![ErrorEntry {
                        message: description,
                        request: Some(error),
                        code: Some(0),
                        parameters: None,
                    }],
                };
            }

            if let Some(detail) = raw.detail {
                return ErrorRecord {
                    errors: vec![ErrorEntry {
                        message: raw.title.clone().unwrap_or_default(),
                        request: Some(detail.clone()),
                        code: raw.status,
                        parameters: None,
                    }],
                    title: raw.title,
                    detail: Some(detail),
                    error_type: raw.error_type,
                    status: raw.status,
                };
            }

            return Self::unhandled(body);
        }

        if let Some(request) = raw.request {
            let Some(message) = raw.error else {
                return Self::unhandled(body);
            };
            return ErrorRecord {
                errors: vec![ErrorEntry {
                    message,
                    request: Some(request),
                    code: None,
                    parameters: None,
                }],
                ..ErrorRecord::default()
            };
        }

        match raw.errors {
            Some(entries) => ErrorRecord {
                errors: entries.into_iter().map(ErrorEntry::from).collect(),
                ..ErrorRecord::default()
            },
            None => Self::unhandled(body),
        }
    }

    /// Degraded record for a body no convention matches
    pub fn unhandled(body: &str) -> Self {
        ErrorRecord {
            title: Some(UNHANDLED_TITLE.to_string()),
            detail: Some(body.to_string()),
            error_type: Some("Unhandled".to_string()),
            ..ErrorRecord::default()
        }
    }

    /// True if this record came from the degraded path
    pub fn is_unhandled(&self) -> bool {
        self.title.as_deref() == Some(UNHANDLED_TITLE)
    }

    /// Best single-line description: detail, then first message, then title
    pub fn summary(&self) -> String {
        self.detail
            .clone()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| self.errors.first().map(|e| e.message.clone()))
            .or_else(|| self.title.clone())
            .unwrap_or_default()
    }
}
