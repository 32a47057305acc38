//! Core types and trait definitions for the Scrip prescription-form service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod form;
pub mod record;
pub mod store;

pub use error::{Result, ValidationError};
