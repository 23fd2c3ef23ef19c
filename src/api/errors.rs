//! API-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API token not configured. Set AGRIDESK_API_TOKEN environment variable")]
    MissingToken,

    #[error("No identifier provided")]
    MissingIdentifier,

    #[error("FPO with ID '{0}' not found in the fetched page")]
    FpoNotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
