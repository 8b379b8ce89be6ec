//! Ingenuity Cloud Services REST API.

mod client;
mod endpoints;
pub mod models;
mod traits;

pub use client::{
    ApiClient, ACTION_TIMEOUT_SECS, API_BASE_URL, AUTH_TIMEOUT_SECS, LIST_TIMEOUT_SECS,
};
pub use endpoints::{ConsoleKind, PowerAction};
pub use traits::{ApiError, CredentialProvider, StaticToken, ValidationError};
