use anyhow::{Context, Result};
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api/";

/// The one message shown for transport failures and unparseable bodies.
pub const API_ERROR_MESSAGE: &str = "Error calling API";

/// Issues GET requests against the probe backend and renders the responses
/// for display. The response schema is opaque to the client; whatever JSON
/// comes back is pretty-printed as-is.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// One GET, rendered for display. Backend error payloads are still JSON
    /// and render like any other response; only transport and parse failures
    /// collapse to the fixed message. No retry, no timeout.
    pub fn call(&self, endpoint: &str) -> String {
        match self.fetch_json(endpoint) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| API_ERROR_MESSAGE.to_string()),
            Err(err) => {
                log::warn!("call to {endpoint} failed: {err:#}");
                API_ERROR_MESSAGE.to_string()
            }
        }
    }

    fn fetch_json(&self, endpoint: &str) -> Result<Value> {
        let url = self.url_for(endpoint);
        log::debug!("GET {url}");
        let response = reqwest::blocking::get(url.as_str())
            .with_context(|| format!("request to {url} failed"))?;
        response
            .json::<Value>()
            .with_context(|| format!("response from {url} was not JSON"))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/api/")
    }

    #[test]
    fn json_response_is_pretty_printed() {
        let base = serve_once("HTTP/1.1 200 OK", r#"{"alive":true,"host":"8.8.8.8"}"#);
        let client = ApiClient::new(base);
        let shown = client.call("ping/icmp?host=8.8.8.8");
        assert!(shown.contains("\"alive\": true"), "got: {shown}");
        assert!(shown.contains("\"host\": \"8.8.8.8\""), "got: {shown}");
    }

    #[test]
    fn backend_error_payload_renders_like_any_response() {
        let base = serve_once(
            "HTTP/1.1 400 Bad Request",
            r#"{"error":"Host parameter is required"}"#,
        );
        let client = ApiClient::new(base);
        let shown = client.call("ping/icmp");
        assert!(shown.contains("Host parameter is required"), "got: {shown}");
    }

    #[test]
    fn non_json_body_collapses_to_the_fixed_message() {
        let base = serve_once("HTTP/1.1 200 OK", "pong");
        let client = ApiClient::new(base);
        assert_eq!(client.call("status"), API_ERROR_MESSAGE);
    }

    #[test]
    fn refused_connection_collapses_to_the_fixed_message() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/api/", listener.local_addr().unwrap());
        drop(listener);

        let client = ApiClient::new(base);
        assert_eq!(client.call("status"), API_ERROR_MESSAGE);
    }

    #[test]
    fn base_url_gains_a_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:9999/api");
        assert_eq!(client.url_for("status"), "http://127.0.0.1:9999/api/status");
    }
}
