//! Typed client for the platform's read-only HTTP API

pub mod client;
pub mod errors;

pub use client::ApiClient;
pub use errors::ApiError;
