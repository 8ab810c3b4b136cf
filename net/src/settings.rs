//! Declarative request settings and their normalization.
//!
//! A [`Settings`] value is built once per call, normalized into a
//! [`Prepared`] request (data→body translation, content-type inference,
//! query-string construction), handed to the transport, and discarded.

use core::fmt;

use serde_json::Value;

use crate::Error;
use crate::encode::{append_query, form_encode};

/// HTTP methods supported by the request helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// HTTP GET (the default).
    #[default]
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
    /// HTTP PATCH.
    Patch,
    /// HTTP HEAD.
    Head,
}

impl Method {
    /// The method name on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }

    /// Whether a request with this method may carry a body.
    #[must_use]
    pub const fn takes_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

/// Request data, translated into a query string or body during
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Key/value pairs.
    Params(Vec<(String, String)>),
    /// A JSON value.
    Json(Value),
    /// A string passed through unchanged.
    Raw(String),
}

impl From<Vec<(String, String)>> for Data {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Params(pairs)
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Data {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_owned())
    }
}

impl From<String> for Data {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

type BeforeSend = Box<dyn FnOnce(&mut Settings) -> bool>;
type OnError = Box<dyn FnMut(&Error)>;

/// Declarative settings for one request.
///
/// Only the URL is required; everything else has a default (GET, no
/// headers, no data, no timeout).
pub struct Settings {
    /// The request URL.
    pub url: String,
    /// The HTTP method.
    pub method: Method,
    /// Header name/value pairs sent with the request.
    pub headers: Vec<(String, String)>,
    /// Request data, serialized during normalization.
    pub data: Option<Data>,
    /// Timeout in milliseconds; 0 disables the timeout race.
    pub timeout_ms: u32,
    before_send: Option<BeforeSend>,
    on_error: Option<OnError>,
}

impl Settings {
    /// Creates settings for a GET request to the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            headers: Vec::new(),
            data: None,
            timeout_ms: 0,
            before_send: None,
            on_error: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches request data.
    #[must_use]
    pub fn data(mut self, data: impl Into<Data>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Races the request against a timer; the timeout is disabled when 0.
    #[must_use]
    pub const fn timeout(mut self, ms: u32) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Runs a hook synchronously before dispatch. Returning `false` aborts
    /// the request without touching the network.
    #[must_use]
    pub fn before_send(mut self, hook: impl FnOnce(&mut Self) -> bool + 'static) -> Self {
        self.before_send = Some(Box::new(hook));
        self
    }

    /// Observes every failure before it is returned to the caller.
    #[must_use]
    pub fn on_error(mut self, hook: impl FnMut(&Error) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub(crate) fn take_before_send(&mut self) -> Option<BeforeSend> {
        self.before_send.take()
    }

    pub(crate) fn take_on_error(&mut self) -> Option<OnError> {
        self.on_error.take()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("timeout_ms", &self.timeout_ms)
            .field("before_send", &self.before_send.as_ref().map(|_| ".."))
            .field("on_error", &self.on_error.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A normalized request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Prepared {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<PreparedBody>,
}

/// The body a normalized request carries.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PreparedBody {
    /// Sent as a string body.
    Text(String),
    /// Sent as a multipart form; the transport supplies the content type
    /// and boundary.
    Form(Vec<(String, String)>),
}

const CONTENT_TYPE: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";

fn content_type_of(headers: &[(String, String)]) -> Option<String> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
        .map(|(_, value)| value.to_ascii_lowercase())
}

fn remove_content_type(headers: &mut Vec<(String, String)>) {
    headers.retain(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE));
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Key/value view of structured data; `None` for data that has no
/// natural entry list.
fn entries(data: &Data) -> Option<Vec<(String, String)>> {
    match data {
        Data::Params(pairs) => Some(pairs.clone()),
        Data::Json(Value::Object(map)) => Some(
            map.iter()
                .map(|(name, value)| (name.clone(), value_to_string(value)))
                .collect(),
        ),
        _ => None,
    }
}

fn json_body(data: &Data) -> String {
    match data {
        Data::Params(pairs) => {
            let map: serde_json::Map<String, Value> = pairs
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect();
            Value::Object(map).to_string()
        }
        Data::Json(value) => value.to_string(),
        Data::Raw(raw) => raw.clone(),
    }
}

fn query_string(data: &Data) -> String {
    entries(data).map_or_else(
        || match data {
            Data::Raw(raw) => raw.clone(),
            other => json_body(other),
        },
        |pairs| form_encode(&pairs),
    )
}

/// Normalizes settings into a dispatchable request.
///
/// GET/HEAD data is appended to the URL as a query string. For other
/// methods, structured data defaults to a JSON body (with the matching
/// content-type header) unless the caller's explicit content type selects
/// form or multipart encoding; a multipart content-type header is removed
/// so the transport can set its own boundary. Raw data passes through
/// unchanged.
pub(crate) fn prepare(settings: &Settings) -> Result<Prepared, Error> {
    if settings.url.trim().is_empty() {
        return Err(Error::MissingUrl);
    }

    let mut url = settings.url.clone();
    let mut headers = settings.headers.clone();
    let mut body = None;

    if let Some(data) = &settings.data {
        if settings.method.takes_body() {
            match data {
                Data::Raw(raw) => body = Some(PreparedBody::Text(raw.clone())),
                data => match (entries(data), content_type_of(&headers)) {
                    (Some(pairs), Some(content_type))
                        if content_type.contains("application/x-www-form-urlencoded") =>
                    {
                        body = Some(PreparedBody::Text(form_encode(&pairs)));
                    }
                    (Some(pairs), Some(content_type))
                        if content_type.contains("multipart/form-data") =>
                    {
                        remove_content_type(&mut headers);
                        body = Some(PreparedBody::Form(pairs));
                    }
                    (_, None) => {
                        headers.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
                        body = Some(PreparedBody::Text(json_body(data)));
                    }
                    _ => body = Some(PreparedBody::Text(json_body(data))),
                },
            }
        } else {
            url = append_query(&url, &query_string(data));
        }
    }

    Ok(Prepared {
        url,
        method: settings.method,
        headers,
        body,
    })
}
