//! Field checks run before anything is written.

use crate::errors::{Error, Result};
use validator::{ValidateEmail, ValidateIp, ValidateUrl};

/// Requires a syntactically valid email address.
pub fn email(field: &'static str, value: &str) -> Result<()> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("'{value}' is not a valid email address")))
    }
}

/// Requires an absolute URL.
pub fn url(field: &'static str, value: &str) -> Result<()> {
    if value.validate_url() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("'{value}' is not a valid URL")))
    }
}

/// Accepts an empty value or an absolute URL.
pub fn optional_url(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Ok(())
    } else {
        url(field, value)
    }
}

/// Requires an IPv4 or IPv6 address.
pub fn ip(field: &'static str, value: &str) -> Result<()> {
    if value.validate_ip() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("'{value}' is not a valid IP address")))
    }
}

/// Requires a value that is not blank.
pub fn required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::invalid(field, "may not be blank"))
    } else {
        Ok(())
    }
}
