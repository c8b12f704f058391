//! Backend-neutral filter AST
//!
//! Produced by the filter expression parser and consumed by both point
//! search and scroll/query operations on a [`crate::ports::VectorStore`].

use serde::{Deserialize, Serialize};

/// A single parsed filter expression.
///
/// There is deliberately no general boolean-combinator variant: the grammar
/// in the specification recognizes exactly three forms, each producing one
/// of these three variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FilterExpr {
    /// `field in [v1, v2, ...]` — true if the field equals any listed value
    Any {
        /// Field name
        field: String,
        /// Candidate values, unquoted
        values: Vec<String>,
    },
    /// `field == value`
    Must {
        /// Field name
        field: String,
        /// Required value, unquoted
        value: String,
    },
    /// `field != value`
    MustNot {
        /// Field name
        field: String,
        /// Excluded value, unquoted
        value: String,
    },
}
