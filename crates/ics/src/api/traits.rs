//! Error taxonomy and credential abstraction for the ICS API.

use thiserror::Error;

/// Errors that can occur while talking to the ICS API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API token is available; no request was attempted.
    #[error("not logged in. Please run 'ics-cli auth login' to authenticate")]
    Unauthenticated,

    /// The API rejected the token (HTTP 401).
    #[error("API key is invalid or expired")]
    InvalidCredentials,

    /// Connection failure, timeout, or body read failure.
    #[error("error connecting to API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-2xx status.
    #[error("API returned error status code: {code}")]
    UnexpectedStatus { code: u16 },

    /// A 2xx response whose body did not match the expected shape.
    #[error("error parsing API response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// User input was rejected before (or instead of) reaching the API.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Build a [`ApiError::NotFound`] for a human-readable resource description.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether this is a [`ApiError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Input validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("--{0} flag is required")]
    MissingField(&'static str),

    /// An SSH key label did not resolve to a key in the account.
    #[error("SSH Key with name {0} not found")]
    UnknownSshKey(String),

    /// An argument was present but malformed.
    #[error("{0}")]
    InvalidArgument(String),
}

/// Source of the API token.
///
/// Injected into [`crate::api::ApiClient`] so the client never reads global state.
pub trait CredentialProvider: Send + Sync {
    /// The current API token, or `None` when the user is not logged in.
    fn api_token(&self) -> Option<String>;
}

/// A fixed token, typically from a flag or environment variable.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn api_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for std::sync::Arc<T> {
    fn api_token(&self) -> Option<String> {
        (**self).api_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_api_error() {
        let err: ApiError = ValidationError::UnknownSshKey("no-such-key".into()).into();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownSshKey(ref label)) if label == "no-such-key"
        ));
        assert_eq!(err.to_string(), "SSH Key with name no-such-key not found");
    }

    #[test]
    fn test_not_found_helper() {
        let err = ApiError::not_found("/servers/42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "resource not found: /servers/42");
    }
}
