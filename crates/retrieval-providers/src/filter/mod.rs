//! Filter Parser
//!
//! Pure function parsing the small, fixed filter grammar shared by point
//! search and scroll/query into the backend-neutral [`FilterExpr`] AST.
//!
//! | Form | AST |
//! |------|-----|
//! | `field in [v1, v2, ...]` | [`FilterExpr::Any`] |
//! | `field == value` | [`FilterExpr::Must`] |
//! | `field != value` | [`FilterExpr::MustNot`] |
//!
//! Unrecognized input is never an error: it yields `None` and a warning.

use std::sync::LazyLock;

use regex::Regex;
use retrieval_domain::value_objects::FilterExpr;

const FIELD_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*";

static IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*({FIELD_PATTERN})\s+in\s*\[\s*(.*?)\s*\]\s*$"
    ))
    .unwrap()
});

static MUST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*({FIELD_PATTERN})\s*==\s*(.+?)\s*$")).unwrap());

static MUST_NOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*({FIELD_PATTERN})\s*!=\s*(.+?)\s*$")).unwrap());

/// Parse a single filter expression, returning `None` (and logging a
/// warning) if it matches none of the three recognized forms.
pub fn parse_filter(expr: &str) -> Option<FilterExpr> {
    if let Some(caps) = IN_RE.captures(expr) {
        let field = caps[1].to_string();
        let values = caps[2]
            .split(',')
            .map(|v| unquote(v.trim()))
            .filter(|v| !v.is_empty())
            .collect();
        return Some(FilterExpr::Any { field, values });
    }

    if let Some(caps) = MUST_NOT_RE.captures(expr) {
        return Some(FilterExpr::MustNot {
            field: caps[1].to_string(),
            value: unquote(caps[2].trim()),
        });
    }

    if let Some(caps) = MUST_RE.captures(expr) {
        return Some(FilterExpr::Must {
            field: caps[1].to_string(),
            value: unquote(caps[2].trim()),
        });
    }

    tracing::warn!(expr, "filter expression not recognized; omitting filter");
    None
}

fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_expression_with_quoted_values() {
        let parsed = parse_filter(r#"fileExtension in [".ts", ".py"]"#).unwrap();
        assert_eq!(
            parsed,
            FilterExpr::Any {
                field: "fileExtension".to_string(),
                values: vec![".ts".to_string(), ".py".to_string()],
            }
        );
    }

    #[test]
    fn parses_not_equal_expression() {
        let parsed = parse_filter(r#"status != "archived""#).unwrap();
        assert_eq!(
            parsed,
            FilterExpr::MustNot {
                field: "status".to_string(),
                value: "archived".to_string(),
            }
        );
    }

    #[test]
    fn parses_equal_expression_with_unquoted_value() {
        let parsed = parse_filter("language == rust").unwrap();
        assert_eq!(
            parsed,
            FilterExpr::Must {
                field: "language".to_string(),
                value: "rust".to_string(),
            }
        );
    }

    #[test]
    fn unrecognized_input_yields_none() {
        assert_eq!(parse_filter("garbage expression"), None);
    }

    #[test]
    fn in_keyword_is_case_insensitive() {
        let parsed = parse_filter("status IN [active]").unwrap();
        assert_eq!(
            parsed,
            FilterExpr::Any {
                field: "status".to_string(),
                values: vec!["active".to_string()],
            }
        );
    }
}
