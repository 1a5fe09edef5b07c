//! Error types for authflow
//!
//! This module provides the error hierarchy using thiserror.
//! All errors can be converted to AuthFlowError for unified error handling.

use thiserror::Error;

/// Main error type for authflow operations
#[derive(Error, Debug)]
pub enum AuthFlowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Token endpoint returned {status}: {detail}")]
    TokenExchange { status: u16, detail: String },

    #[error("Userinfo endpoint returned {status}")]
    Userinfo { status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient result type for authflow operations
pub type Result<T> = std::result::Result<T, AuthFlowError>;

impl AuthFlowError {
    /// Create a config error
    #[inline]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AuthFlowError::Config(msg.into())
    }

    /// Create an OAuth error
    #[inline]
    pub fn oauth<S: Into<String>>(msg: S) -> Self {
        AuthFlowError::OAuth(msg.into())
    }
}
