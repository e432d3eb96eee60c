//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the host executes the actual I/O.

/// HTTP method for a request. The backend only accepts POSTs from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Live2dClient::build_*` methods. `url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name).map(String::as_str)
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`. Header values
/// and body are the bytes received, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Raw value of the first `name` header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        find_header(&self.headers, name).map(Vec::as_slice)
    }

    /// The body as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a, V>(headers: &'a [(String, V)], name: &str) -> Option<&'a V> {
    headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("X-Raw".to_string(), vec![b'c', b'a', b'f', 0xe9])],
            body: vec![0xff, 0xfe, b'o', b'k'],
        }
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }

    #[test]
    fn request_header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost/x".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn response_keeps_raw_bytes() {
        let resp = response(200);
        assert_eq!(resp.header("x-raw"), Some(&[b'c', b'a', b'f', 0xe9][..]));
        assert_eq!(resp.text(), None);
        assert_eq!(resp.body, [0xff, 0xfe, b'o', b'k']);
    }

    #[test]
    fn success_range() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(404).is_success());
    }
}
