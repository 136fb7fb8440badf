//! # courier-core
//!
//! Core crate for the Courier broker. Contains configuration schemas,
//! typed identifiers, session domain events, the clock and identifier
//! generator seams, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Courier crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
