//! Resource accessors.
//!
//! Each submodule adds methods to [`Client`](crate::Client) for one QVO
//! resource. Accessors check what can be checked locally before touching the
//! network: a failed check returns [`QvoError::Validation`] and the transport
//! is never called.

mod cards;
mod customers;
mod events;
mod plans;
mod subscriptions;
mod transactions;
mod webpay;
mod withdrawals;

use url::Url;

use crate::error::{QvoError, Result};

/// Checks an identifier that goes into a path segment.
pub(crate) fn validate_id<'a>(field: &str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(QvoError::Validation(format!("{field} is required")));
    }
    if id.contains('/') || id == "." || id == ".." {
        return Err(QvoError::Validation(format!("{field} is not a valid path segment: {id}")));
    }
    Ok(id)
}

/// Checks a required free-text field.
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(QvoError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Checks that an amount in minor units is strictly positive.
pub(crate) fn require_positive(field: &str, amount: i64) -> Result<i64> {
    if amount <= 0 {
        return Err(QvoError::Validation(format!("{field} must be greater than zero, got {amount}")));
    }
    Ok(amount)
}

/// Checks that a redirect target is an absolute http(s) URL.
pub(crate) fn require_absolute_url<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    require(field, value)?;
    let url = Url::parse(value)
        .map_err(|e| QvoError::Validation(format!("{field} is not an absolute URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(QvoError::Validation(format!("{field} must use http or https")));
    }
    Ok(value)
}
