//! Default HTTP transport.
//!
//! A minimal HTTP/1.1 client over tokio TCP sockets; no external HTTP
//! client dependency. Unlike the SDK layer above it, the transport owns
//! timeouts and HTTP-status handling. It performs no retries.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{ErrorCode, SdkError, SdkResult};
use crate::transport::{BoxFuture, GraphQLError, Headers, RawEnvelope, Transport};

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// GraphQL endpoint URL (http only).
    pub url: String,
    /// Timeout applied to connect, write, and read individually.
    pub timeout: Duration,
    /// Headers applied to every request, underneath per-call headers.
    pub headers: Headers,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: Duration::from_secs(30),
            headers: Headers::new(),
        }
    }
}

impl HttpTransportConfig {
    /// Creates a config pointing at an endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP transport over raw tokio TCP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Creates a transport with default configuration.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            config: HttpTransportConfig::new(url),
        }
    }

    /// Creates a transport with custom configuration.
    pub fn with_config(config: HttpTransportConfig) -> Self {
        Self { config }
    }

    async fn post(&self, body: &str, headers: &Headers) -> SdkResult<HttpResponseParts> {
        let (host, port, path) = parse_url(&self.config.url)?;

        let connect = TcpStream::connect(format!("{}:{}", host, port));
        let mut stream = timeout(self.config.timeout, connect)
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| {
                SdkError::new(
                    ErrorCode::ConnectionRefused,
                    format!("Connection failed: {}", e),
                )
            })?;

        let mut request = format!(
            "POST {} HTTP/1.1\r\n\
             Host: {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n",
            path,
            host,
            body.len()
        );
        for (key, value) in headers {
            request.push_str(&format!("{}: {}\r\n", key, value));
        }
        request.push_str("\r\n");
        request.push_str(body);

        timeout(self.config.timeout, stream.write_all(request.as_bytes()))
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| SdkError::network(format!("Write failed: {}", e)))?;

        let mut response_bytes = Vec::new();
        timeout(self.config.timeout, stream.read_to_end(&mut response_bytes))
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| SdkError::network(format!("Read failed: {}", e)))?;

        let response = String::from_utf8_lossy(&response_bytes);
        let parts = parse_response(&response)?;

        if !(200..300).contains(&parts.status) {
            return Err(SdkError::new(
                ErrorCode::HttpError,
                format!("HTTP {}: {}", parts.status, truncate_body(&parts.body)),
            ));
        }

        Ok(parts)
    }
}

impl Transport for HttpTransport {
    fn raw_request(
        &self,
        query: &'static str,
        variables: serde_json::Value,
        headers: Headers,
    ) -> BoxFuture<'_, SdkResult<RawEnvelope>> {
        Box::pin(async move {
            let body = serde_json::json!({
                "query": query,
                "variables": variables,
            });
            let body = serde_json::to_string(&body).map_err(|e| {
                SdkError::serialize(format!("Failed to serialize request body: {}", e))
            })?;

            let mut merged = self.config.headers.clone();
            merged.extend(headers);

            debug!("POST {} ({} bytes)", self.config.url, body.len());
            let parts = self.post(&body, &merged).await?;

            let wire: WireBody = serde_json::from_str(&parts.body).map_err(|e| {
                SdkError::parse(format!(
                    "Failed to parse response: {}. Body: {}",
                    e,
                    truncate_body(&parts.body)
                ))
            })?;

            Ok(RawEnvelope {
                data: wire.data,
                errors: wire.errors,
                extensions: wire.extensions,
                headers: parts.headers,
                status: parts.status,
            })
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct WireBody {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
    #[serde(default)]
    extensions: Option<serde_json::Value>,
}

#[derive(Debug)]
struct HttpResponseParts {
    status: u16,
    headers: Headers,
    body: String,
}

/// Truncates a response body for error messages, never splitting a
/// multi-byte character.
fn truncate_body(body: &str) -> &str {
    const MAX_LEN: usize = 200;
    if body.len() <= MAX_LEN {
        return body;
    }
    let mut end = MAX_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Parses a URL into host, port, and path.
fn parse_url(url: &str) -> SdkResult<(String, u16, String)> {
    let url = url.trim();

    let without_protocol = if url.starts_with("https://") {
        return Err(SdkError::new(
            ErrorCode::HttpsNotSupported,
            "HTTPS is not supported by the built-in transport. Supply a custom Transport.",
        ));
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else {
        url
    };

    let (host_port, path) = match without_protocol.find('/') {
        Some(slash) => (
            &without_protocol[..slash],
            &without_protocol[slash..],
        ),
        None => (without_protocol, "/"),
    };

    let (host, port) = match host_port.rfind(':') {
        Some(colon) => {
            let host = &host_port[..colon];
            let port_str = &host_port[colon + 1..];
            let port = port_str.parse().map_err(|_| {
                SdkError::new(ErrorCode::InvalidUrl, format!("Invalid port: {}", port_str))
            })?;
            (host.to_string(), port)
        }
        None => (host_port.to_string(), 80),
    };

    Ok((host, port, path.to_string()))
}

/// Splits a raw HTTP response into status, headers, and (decoded) body.
fn parse_response(response: &str) -> SdkResult<HttpResponseParts> {
    let (separator, width) = match response.find("\r\n\r\n") {
        Some(i) => (i, 4),
        None => match response.find("\n\n") {
            Some(i) => (i, 2),
            None => {
                return Err(SdkError::new(
                    ErrorCode::InvalidResponse,
                    "Could not find response body",
                ))
            }
        },
    };
    let head = &response[..separator];
    let body = &response[separator + width..];

    let mut lines = head.lines();
    let status_line = lines
        .next()
        .ok_or_else(|| SdkError::new(ErrorCode::InvalidResponse, "Empty response"))?;
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| {
            SdkError::new(
                ErrorCode::InvalidResponse,
                format!("Malformed status line: {}", status_line),
            )
        })?;

    let mut headers = Headers::new();
    let mut chunked = false;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("transfer-encoding")
                && value.to_ascii_lowercase().contains("chunked")
            {
                chunked = true;
            }
            headers.insert(name.to_string(), value.to_string());
        }
    }

    let body = if chunked {
        decode_chunked(body)?
    } else {
        body.to_string()
    };

    Ok(HttpResponseParts {
        status,
        headers,
        body,
    })
}

/// Decodes a chunked transfer encoding body.
fn decode_chunked(body: &str) -> SdkResult<String> {
    let mut out = String::new();
    let mut rest = body;

    loop {
        let (size_line, tail) = match rest.split_once("\r\n").or_else(|| rest.split_once('\n')) {
            Some(parts) => parts,
            None => break,
        };
        let size = usize::from_str_radix(size_line.trim(), 16).map_err(|_| {
            SdkError::new(
                ErrorCode::InvalidResponse,
                format!("Bad chunk size: {}", size_line.trim()),
            )
        })?;
        if size == 0 {
            break;
        }
        if tail.len() < size {
            out.push_str(tail);
            break;
        }
        out.push_str(&tail[..size]);
        rest = &tail[size..];
        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        let (host, port, path) = parse_url("http://localhost:4000/graphql").unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 4000);
        assert_eq!(path, "/graphql");

        let (host, port, path) = parse_url("http://example.com/api/graphql").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 80);
        assert_eq!(path, "/api/graphql");
    }

    #[test]
    fn test_parse_url_rejects_https() {
        let err = parse_url("https://example.com/graphql").unwrap_err();
        assert_eq!(err.code, ErrorCode::HttpsNotSupported);
    }

    #[test]
    fn test_parse_response_captures_status_and_headers() {
        let response = "HTTP/1.1 200 OK\r\n\
                        Content-Type: application/json\r\n\
                        X-Request-Id: r42\r\n\
                        \r\n\
                        {\"data\":{\"hello\":\"world\"}}";
        let parts = parse_response(response).unwrap();
        assert_eq!(parts.status, 200);
        assert_eq!(
            parts.headers.get("X-Request-Id").map(String::as_str),
            Some("r42")
        );
        assert_eq!(parts.body, "{\"data\":{\"hello\":\"world\"}}");
    }

    #[test]
    fn test_parse_response_chunked() {
        let response = "HTTP/1.1 200 OK\r\n\
                        Transfer-Encoding: chunked\r\n\
                        \r\n\
                        5\r\nhello\r\n5\r\nworld\r\n0\r\n\r\n";
        let parts = parse_response(response).unwrap();
        assert_eq!(parts.body, "helloworld");
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Byte 200 lands inside the two-byte 'é'; truncation must back up
        // to the previous boundary instead of panicking.
        let mut body = "a".repeat(199);
        body.push('é');
        body.push_str(" service unavailable");
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 199);
        assert!(truncated.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_truncate_body_short_input_untouched() {
        assert_eq!(truncate_body("café"), "café");
    }

    #[test]
    fn test_parse_response_error_status() {
        let response = "HTTP/1.1 503 Service Unavailable\r\n\r\nbusy";
        let parts = parse_response(response).unwrap();
        assert_eq!(parts.status, 503);
        assert_eq!(parts.body, "busy");
    }
}
