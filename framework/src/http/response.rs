//! Response building
//!
//! `ResponseSink` is the response object handlers can write to directly;
//! the dispatcher turns the accumulated body into an `HttpResponse`, which
//! converts to a hyper response at the transport edge.

use bytes::Bytes;
use http_body_util::Full;

/// The response object bound to a handler's response-sentinel position.
/// Collects body text written before/instead of template rendering.
#[derive(Debug, Default)]
pub struct ResponseSink {
    body: String,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the response body.
    pub fn write(&mut self, text: impl AsRef<str>) {
        self.body.push_str(text.as_ref());
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

/// HTTP response builder.
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// A plain-text response with status 200.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        }
    }

    /// Set the HTTP status code.
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header to the response.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Convert to a hyper response at the transport edge.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|_| hyper::Response::new(Full::new(Bytes::new())))
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sink_accumulates_writes() {
        let mut sink = ResponseSink::new();
        sink.write("hello ");
        sink.write("world");
        assert_eq!(sink.into_body(), "hello world");
    }

    #[test]
    fn text_response_defaults_to_200() {
        let response = HttpResponse::text("ok");
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "ok");
    }

    #[test]
    fn status_is_chainable() {
        let response = HttpResponse::text("404 Not Found").status(404);
        assert_eq!(response.status_code(), 404);
    }
}
