//! Common utilities for the Sieve HTML filter.
//!
//! This crate provides shared infrastructure used by all filter components:
//! - **Error Type** - [`error::SieveError`] for caller contract violations and I/O
//! - **Warning System** - colored terminal output for filter diagnostics

pub mod error;
pub mod warning;

pub use error::{Result, SieveError};
