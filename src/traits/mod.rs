//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`SecureStore`] - On-device credential key-value store

pub mod http;
pub mod store;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use store::{SecureStore, StoreError};
