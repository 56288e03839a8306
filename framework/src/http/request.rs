//! Incoming request data as the dispatcher sees it
//!
//! `RequestInfo` carries the method, the path, and the request parameters:
//! URL query pairs, merged with form-body pairs for POST. Multi-value
//! binding is out of scope, so reads return the first occurrence of a name.

use hyper::Method;

/// Decode `a=1&b=2` pairs; a malformed query yields no parameters rather
/// than an error, matching the transport's lenient behavior.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}

/// The request object handed to handlers and the dispatcher.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append parameters decoded from a query string.
    pub fn with_query(mut self, query: &str) -> Self {
        self.params.extend(parse_pairs(query));
        self
    }

    /// Append pre-decoded parameters (form body pairs for POST).
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// All parameters in arrival order (query first, then form body).
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First occurrence of a named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_pairs_are_decoded() {
        let request = RequestInfo::get("/web/hello.json").with_query("name=Alice&addr=NYC");
        assert_eq!(request.param("name"), Some("Alice"));
        assert_eq!(request.param("addr"), Some("NYC"));
        assert_eq!(request.param("other"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let request = RequestInfo::get("/p").with_query("x=1&x=2");
        assert_eq!(request.param("x"), Some("1"));
    }

    #[test]
    fn percent_encoding_is_decoded() {
        let request = RequestInfo::get("/p").with_query("name=A%20B");
        assert_eq!(request.param("name"), Some("A B"));
    }

    #[test]
    fn empty_query_yields_no_params() {
        assert!(parse_pairs("").is_empty());
    }
}
