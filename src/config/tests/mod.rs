//! Unit tests for configuration loading and resolution.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token resolution tests
//! - `locator_resolution`: Pull request identity resolution tests

mod helpers;
