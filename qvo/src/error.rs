//! Error types for the QVO client.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is [`QvoError`]. Errors are never retried or recovered internally; they are
//! handed back to the caller exactly as they were detected.
//!
//! # Error Categories
//!
//! - **Local errors** ([`QvoError::Validation`], [`QvoError::UnsupportedMethod`],
//!   [`QvoError::Config`]): detected before any network I/O
//! - **Network errors** ([`QvoError::Timeout`], [`QvoError::Transport`]): the request could
//!   not be completed
//! - **Remote errors** ([`QvoError::RemoteApi`], [`QvoError::MalformedErrorResponse`]): QVO
//!   answered with a non-2xx status
//! - **Decode errors** ([`QvoError::Decode`]): QVO answered 2xx but the body did not match the
//!   expected resource shape
//!
//! # Examples
//!
//! ```
//! use qvo::error::{QvoError, Result};
//!
//! fn require_amount(amount: i64) -> Result<i64> {
//!     if amount <= 0 {
//!         return Err(QvoError::Validation("amount must be positive".to_owned()));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(require_amount(0).unwrap_err().is_validation());
//! ```

use thiserror::Error;

/// Maximum number of body bytes kept in [`QvoError::MalformedErrorResponse`].
pub(crate) const MAX_ERROR_BODY_LEN: usize = 512;

/// Result type alias for QVO operations.
pub type Result<T> = std::result::Result<T, QvoError>;

/// Errors that can occur while talking to the QVO API.
///
/// # Error Recovery
///
/// - **Validation errors** ([`Validation`](Self::Validation)): fix the input; no request was sent
/// - **Timeouts and transport errors** ([`Timeout`](Self::Timeout),
///   [`Transport`](Self::Transport)): the caller may retry, this crate never does
/// - **Remote errors** ([`RemoteApi`](Self::RemoteApi)): inspect `kind` and `param` to see which
///   field QVO rejected
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum QvoError {
    /// A required field is missing or invalid.
    ///
    /// Raised before any network call is made.
    ///
    /// # Examples
    ///
    /// ```
    /// use qvo::error::QvoError;
    ///
    /// let err = QvoError::Validation("plan name is required".to_owned());
    /// assert_eq!(err.to_string(), "Validation failed: plan name is required");
    /// ```
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The HTTP verb is not one of GET, POST, PUT, PATCH or DELETE.
    ///
    /// Raised before any network call is made.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Client configuration is invalid.
    ///
    /// Common causes include an empty API token, an unparsable base URL override or
    /// timeouts outside the accepted range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// HTTP transport failed.
    ///
    /// This wraps [`reqwest::Error`] for connection refused, DNS, TLS and similar failures.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// QVO returned a non-2xx status with a well-formed error envelope.
    ///
    /// The envelope has the shape `{"error": {"type", "message", "param"}}`.
    #[error("QVO API error ({status}) {kind}: {}", .message.as_deref().unwrap_or("no message"))]
    RemoteApi {
        /// HTTP status code.
        status: u16,
        /// Error type reported by QVO (e.g. `invalid_request`).
        kind: String,
        /// Human readable message, if QVO sent one.
        message: Option<String>,
        /// Name of the offending parameter, if any.
        param: Option<String>,
    },

    /// QVO returned a non-2xx status whose body is not a valid error envelope.
    #[error("Malformed error response ({status}): {body}")]
    MalformedErrorResponse {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },

    /// A 2xx response body did not match the expected resource shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl QvoError {
    /// Returns `true` for errors detected locally before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedMethod(_))
    }

    /// Returns `true` when the error came from a non-2xx QVO response.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteApi { .. } | Self::MalformedErrorResponse { .. })
    }

    /// Returns `true` when the request exceeded its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status code of the response that produced this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } | Self::MalformedErrorResponse { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Builds a [`QvoError::MalformedErrorResponse`], truncating the body on a char boundary.
    pub(crate) fn malformed(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let body = if text.len() > MAX_ERROR_BODY_LEN {
            let mut end = MAX_ERROR_BODY_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &text[..end])
        } else {
            text.into_owned()
        };
        Self::MalformedErrorResponse { status, body }
    }
}
