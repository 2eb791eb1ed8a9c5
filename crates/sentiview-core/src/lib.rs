//! Core domain types for the Sentiview client SDK.
//!
//! This crate holds everything the gateway client and its consumers share:
//! the error taxonomy, the session-token store with expiry notification,
//! gateway configuration, backend-target addressing, and the optional
//! filter sets used by read operations.

pub mod config;
pub mod error;
pub mod filter;
pub mod session;
pub mod target;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use session::{SessionExpiryHandler, SessionStore, SessionToken};
pub use target::BackendTarget;
