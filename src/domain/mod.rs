//! Domain layer for the Userdeck plugin.
//!
//! This module contains the core domain types for the plugin, independent of
//! Zellij-specific APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: The user directory record and its nested structures

pub mod error;
pub mod user;

pub use error::{Result, UserdeckError};
pub use user::{Address, Company, Geo, User};
