//! Shared Utilities
//!
//! Small helpers used by more than one provider; not ports in their own
//! right.

/// HTTP response status-check-then-parse helpers
pub mod http_response;
/// `serde_json::Value` accessor extensions and canonical field stringification
pub mod json;

pub use http_response::{check_and_parse, check_and_parse_rerank};
pub use json::{canonical_field_string, JsonExt};
