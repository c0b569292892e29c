//! HTTP Basic credential parsing

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::AuthError;

/// Identity presented by a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No Authorization header
    Anonymous,
    /// Decoded Basic credentials
    Basic { username: String, password: String },
}

impl Caller {
    /// Build a caller from an optional `Authorization` header value.
    pub fn from_header(header: Option<&str>) -> Result<Self, AuthError> {
        match header {
            None => Ok(Self::Anonymous),
            Some(value) => parse_basic(value),
        }
    }
}

/// Parse `Basic <base64(username:password)>`.
pub fn parse_basic(value: &str) -> Result<Caller, AuthError> {
    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader("missing credentials"))?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MalformedHeader("unsupported scheme"));
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedHeader("invalid base64"))?;
    let decoded =
        String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader("invalid utf-8"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedHeader("missing ':' separator"))?;

    Ok(Caller::Basic {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}
