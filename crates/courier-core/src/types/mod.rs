//! Shared types used across Courier crates.

pub mod id;

pub use id::SessionId;
