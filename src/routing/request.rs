//! Borrowed view of an inbound request.
//!
//! The router only needs the method, path, host, headers and query string.
//! `RequestView` borrows those from an `http::Request` and only allocates
//! when the path is percent-encoded or a header is not valid UTF-8.

use std::borrow::Cow;

use axum::http::{header, HeaderMap, HeaderValue, Method, Request};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// The routing-relevant parts of a request.
#[derive(Debug, Clone)]
pub struct RequestView<'a> {
    method: &'a Method,
    path: Cow<'a, str>,
    host: Cow<'a, str>,
    headers: &'a HeaderMap,
    query: Option<&'a str>,
}

impl<'a> RequestView<'a> {
    /// Build a view from an HTTP request.
    ///
    /// The host comes from the `Host` header, falling back to the URI
    /// authority (HTTP/2 requests carry it there). The path is
    /// percent-decoded, so routing sees the path the backend will see.
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let host = match req.headers().get(header::HOST) {
            Some(value) => header_text(value),
            None => Cow::Borrowed(req.uri().authority().map_or("", |a| a.as_str())),
        };

        Self {
            method: req.method(),
            path: percent_decode_str(req.uri().path()).decode_utf8_lossy(),
            host,
            headers: req.headers(),
            query: req.uri().query(),
        }
    }

    pub fn method(&self) -> &'a Method {
        self.method
    }

    /// Decoded request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Host value, possibly including a `:port` suffix.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn headers(&self) -> &'a HeaderMap {
        self.headers
    }

    /// Value of a header, or `""` when absent.
    pub fn header(&self, name: impl header::AsHeaderName) -> Cow<'a, str> {
        self.headers
            .get(name)
            .map_or(Cow::Borrowed(""), header_text)
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Header bytes as text. Opaque (non-ASCII) bytes are kept as UTF-8 and
/// only invalid sequences are replaced.
fn header_text(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}
