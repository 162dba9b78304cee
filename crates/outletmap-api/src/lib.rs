//! Typed client for the outlet backend's listing and search endpoints.

pub mod client;
pub mod error;

pub use client::OutletApiClient;
pub use error::ApiError;
