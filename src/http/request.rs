//! Calcd HTTP request type, decoupled from the transport.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    /// Any method outside the modeled set (TRACE, CONNECT, extensions).
    /// Never equal to a routable method, so it cannot match a route.
    Other,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
            Method::Other => write!(f, "OTHER"),
        }
    }
}

impl From<&hyper::Method> for Method {
    fn from(method: &hyper::Method) -> Self {
        match *method {
            hyper::Method::GET => Method::Get,
            hyper::Method::POST => Method::Post,
            hyper::Method::PUT => Method::Put,
            hyper::Method::DELETE => Method::Delete,
            hyper::Method::PATCH => Method::Patch,
            hyper::Method::HEAD => Method::Head,
            hyper::Method::OPTIONS => Method::Options,
            _ => Method::Other,
        }
    }
}

/// An owned HTTP request as seen by calcd handlers.
///
/// The query string is pre-parsed into a multi-value map so handlers never
/// touch the raw URL; repeated keys collect their values in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Decoded query parameters.
    pub query: HashMap<String, Vec<String>>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
}

impl CalcRequest {
    /// Create a new CalcRequest with no query parameters and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            body: None,
        }
    }

    /// Parse a raw (percent-encoded) query string into the query map.
    pub fn query_string(mut self, raw: &str) -> Self {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            self.query
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        self
    }

    /// Add a single query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the first value of a query parameter.
    pub fn query_first(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }

    /// Parse the body as JSON if present.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.body.as_ref().map(|b| serde_json::from_slice(b))
    }
}

impl Default for CalcRequest {
    fn default() -> Self {
        Self::new(Method::Get, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_parsing() {
        let request = CalcRequest::new(Method::Get, "/factorial").query_string("n=10&n=20&x=kek");

        assert_eq!(request.query_first("n"), Some("10"));
        assert_eq!(request.query["n"], vec!["10", "20"]);
        assert_eq!(request.query_first("x"), Some("kek"));
        assert_eq!(request.query_first("missing"), None);
    }

    #[test]
    fn test_query_string_percent_decoding() {
        let request = CalcRequest::new(Method::Get, "/factorial").query_string("n=%2D1");

        assert_eq!(request.query_first("n"), Some("-1"));
    }

    #[test]
    fn test_query_string_blank_value() {
        let request = CalcRequest::new(Method::Get, "/factorial").query_string("n=");

        assert_eq!(request.query_first("n"), Some(""));
    }

    #[test]
    fn test_unrecognized_hyper_methods_map_to_other() {
        assert_eq!(Method::from(&hyper::Method::GET), Method::Get);
        assert_eq!(Method::from(&hyper::Method::TRACE), Method::Other);
        assert_eq!(Method::from(&hyper::Method::CONNECT), Method::Other);
    }

    #[test]
    fn test_body_text() {
        let request = CalcRequest::new(Method::Get, "/mean").body("[1, 2, 3]");

        assert_eq!(request.text(), Some("[1, 2, 3]".to_string()));
    }
}
