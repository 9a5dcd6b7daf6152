use std::fmt::{self, Debug, Formatter};

use reqwest::header::HeaderValue;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::api::client::{ApiClientError, ApiError};

/// Bearer token attached to every request. Immutable once validated and wiped from memory when
/// dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// The value of the `Authorization` header sent with every request.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(crate) fn header_value(&self) -> Result<HeaderValue, ApiError> {
        let mut value = HeaderValue::from_str(&self.authorization_header())
            .map_err(|_| ApiError::InvalidArgument("credential is not a valid header value"))?;
        value.set_sensitive(true);

        Ok(value)
    }

    pub fn validate(token: impl Into<String>) -> Result<Self, ApiClientError> {
        let credential = Self {
            token: token.into(),
        };

        if credential.token.is_empty() {
            return Err(ApiClientError::InvalidCredential);
        }

        if HeaderValue::from_str(&credential.authorization_header()).is_err() {
            return Err(ApiClientError::InvalidCredential);
        }

        Ok(credential)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
