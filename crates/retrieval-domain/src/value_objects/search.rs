//! Hybrid Search Request/Result Value Objects

use serde::{Deserialize, Serialize};

use crate::value_objects::{SparseVector, VectorDocument};

/// The query data carried by a [`HybridSearchRequest`].
///
/// Text-mode queries are accepted by the type but are not resolvable by the
/// dispatcher on their own (§4.4): a request whose `data` is `Text` is
/// skipped with a warning rather than routed to a channel, since turning
/// text into a vector is a dense-embedding-provider concern that sits
/// outside this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryVector {
    /// A pre-computed dense embedding
    Dense(Vec<f32>),
    /// A pre-computed sparse vector
    Sparse(SparseVector),
    /// Raw text, not directly searchable by the dispatcher
    Text(String),
}

impl QueryVector {
    /// True if this is an empty sparse vector (the dispatcher's silent skip
    /// case, §4.4)
    pub fn is_empty_sparse(&self) -> bool {
        matches!(self, QueryVector::Sparse(v) if v.is_empty())
    }
}

/// Value Object: Hybrid Search Request
///
/// `channel` optionally names the vector to search on a hybrid (named
/// vector) collection; when absent, the channel is inferred from `data`
/// (§4.4's per-request channel selection).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HybridSearchRequest {
    /// The query vector or text
    pub data: QueryVector,
    /// Optional explicit channel name ("dense" | "sparse")
    pub channel: Option<String>,
    /// Maximum number of fused results to return
    pub limit: usize,
}

impl HybridSearchRequest {
    /// Construct a dense-vector request
    pub fn dense(vector: Vec<f32>, limit: usize) -> Self {
        Self {
            data: QueryVector::Dense(vector),
            channel: None,
            limit,
        }
    }

    /// Construct a sparse-vector request
    pub fn sparse(vector: SparseVector, limit: usize) -> Self {
        Self {
            data: QueryVector::Sparse(vector),
            channel: None,
            limit,
        }
    }
}

/// Value Object: Hybrid Search Result
///
/// A document paired with the score it received after rank fusion (and,
/// when a reranker is configured, after reranking has replaced the fused
/// ordering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HybridSearchResult {
    /// The matched document
    pub document: VectorDocument,
    /// The fused (or reranked) relevance score
    pub fused_score: f64,
}
