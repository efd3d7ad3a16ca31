//! Transport abstraction.
//!
//! The [`Client`](crate::Client) builds a fully formed [`TransportRequest`]
//! (URL, headers, encoded body) and hands it to a [`Transport`] to perform the
//! exchange. The transport only moves bytes: it never inspects the status code,
//! never retries and never decodes JSON. Status translation happens in the
//! client so that every transport reports errors the same way.
//!
//! [`HttpTransport`] is the production implementation. Tests plug in their
//! own implementations to observe exactly what would be sent.
//!
//! # Examples
//!
//! ```rust,no_run
//! use qvo::transport::{HttpConfig, HttpMethod, HttpTransport, Transport, TransportRequest};
//!
//! # async fn example() -> qvo::error::Result<()> {
//! let transport = HttpTransport::with_config(&HttpConfig::default())?;
//!
//! let request = TransportRequest {
//!     method: HttpMethod::Get,
//!     url: "https://playground.qvo.cl/customers".to_owned(),
//!     headers: vec![("Authorization", "Bearer token".to_owned())],
//!     body: None,
//! };
//!
//! let response = transport.send(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::{fmt, str::FromStr, sync::Arc};

use crate::error::{QvoError, Result};

pub mod config;
pub mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// HTTP verbs accepted by the QVO API.
///
/// Parsing any other verb fails with [`QvoError::UnsupportedMethod`].
///
/// # Examples
///
/// ```
/// use qvo::transport::HttpMethod;
///
/// let method: HttpMethod = "patch".parse().unwrap();
/// assert_eq!(method, HttpMethod::Patch);
/// assert!(method.has_body());
/// assert!("TRACE".parse::<HttpMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET: parameters travel in the query string.
    Get,
    /// POST: parameters travel in a form body.
    Post,
    /// PUT: parameters travel in a form body.
    Put,
    /// PATCH: parameters travel in a form body.
    Patch,
    /// DELETE: parameters travel in the query string.
    Delete,
}

impl HttpMethod {
    /// Canonical upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters are sent as a form-encoded body rather than a query string.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = QvoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(QvoError::UnsupportedMethod(s.to_owned())),
        }
    }
}

/// A fully built request, ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Request headers, in the order they were added.
    pub headers: Vec<(&'static str, String)>,
    /// Encoded body for POST, PUT and PATCH.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response from a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must not retry and must return every status code as a
/// [`TransportResponse`]; only failures to complete the exchange are errors.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`QvoError::Timeout`] when the request exceeds its deadline and
    /// [`QvoError::Transport`] for any other connection failure.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        (**self).send(request)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_method_parse_unsupported() {
        for verb in ["HEAD", "OPTIONS", "TRACE", "CONNECT", ""] {
            let err = verb.parse::<HttpMethod>().unwrap_err();
            assert!(matches!(err, QvoError::UnsupportedMethod(ref m) if m == verb));
        }
    }

    #[test]
    fn test_method_has_body() {
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_request_header_lookup() {
        let request = TransportRequest {
            method: HttpMethod::Post,
            url: "https://example.com".to_owned(),
            headers: vec![("Content-Length", "3".to_owned())],
            body: Some(b"a=1".to_vec()),
        };
        assert_eq!(request.header("content-length"), Some("3"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_response_is_success() {
        assert!(TransportResponse { status: 200, body: vec![] }.is_success());
        assert!(TransportResponse { status: 204, body: vec![] }.is_success());
        assert!(!TransportResponse { status: 199, body: vec![] }.is_success());
        assert!(!TransportResponse { status: 302, body: vec![] }.is_success());
        assert!(!TransportResponse { status: 422, body: vec![] }.is_success());
    }
}
