//! Error types for the todo client.
//!
//! # Design
//! The three labeled variants (`Auth`, `Fetch`, `Create`) carry only the
//! message shown to the user; their `Display` is exactly that message. HTTP
//! status codes are not distinguished and are logged, not stored.

use thiserror::Error;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const FETCH_FAILED: &str = "Failed to fetch todos";
pub const CREATE_FAILED: &str = "Create todo failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Login or signup was rejected.
    #[error("{0}")]
    Auth(String),

    /// Listing todos was rejected.
    #[error("{0}")]
    Fetch(String),

    /// Creating a todo was rejected.
    #[error("{0}")]
    Create(String),

    /// The host could not complete the HTTP round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response body did not have the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn login_failed() -> Self {
        ApiError::Auth(LOGIN_FAILED.to_string())
    }

    pub fn signup_failed() -> Self {
        ApiError::Auth(SIGNUP_FAILED.to_string())
    }

    pub fn fetch_failed() -> Self {
        ApiError::Fetch(FETCH_FAILED.to_string())
    }

    pub fn create_failed() -> Self {
        ApiError::Create(CREATE_FAILED.to_string())
    }
}
