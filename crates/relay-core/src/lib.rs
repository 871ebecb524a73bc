//! # relay-core
//!
//! Core crate for the host event relay. Contains the unified error
//! system, the result alias, and the configuration schemas shared by the
//! interception crate and the demo binary.
//!
//! This crate has **no** internal dependencies on other relay crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
