//! Error types and error handling for the front end.
//!
//! This module defines the errors raised while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for syntax and structural failures
//! - Error formatting and display functionality
//! - Short suggestions for the caller to show

pub mod errors;
