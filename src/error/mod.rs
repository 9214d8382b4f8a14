//! Error handling for the playshare client.
//!
//! - [`ApiError`]: every condition a screen can see, from "not signed in"
//!   to "the list changed under you"
//! - [`ErrorCategory`]: coarse classification used to pick a reaction
//! - [`ApiResult`]: result alias used across the crate
//!
//! # Example
//!
//! ```ignore
//! use playshare::error::{ApiError, ErrorCategory};
//!
//! match client.get_post(42).await {
//!     Ok(post) => show(post),
//!     Err(e) if e.category() == ErrorCategory::Network => show_retry(e.user_message()),
//!     Err(e) => show_inline(e.user_message()),
//! }
//! ```

pub mod api_error;
pub mod category;

pub use api_error::{classify_status, extract_error_message, ApiError};
pub use category::ErrorCategory;

/// Result alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;
