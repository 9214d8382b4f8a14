//! playshare - client core for a social playlist-sharing app
//!
//! Typed access to the playshare backend, session handling over an
//! injectable secure store, cursor pagination, and optimistic mutations with
//! snapshot rollback.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod optimistic;
pub mod pagination;
pub mod session;
pub mod traits;
pub mod view_state;
