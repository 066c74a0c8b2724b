//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `loading`: Loading from real CLI arguments and environment variables
//! - `resolution`: Reference, fetch option and log mode resolution tests
//! - `validation`: Configuration consistency validation tests

mod helpers;
mod resolution;
