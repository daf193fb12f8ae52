//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: API key, required fields, and path resolution tests
//! - `validation`: Provider and ignore-pattern validation tests

mod helpers;
