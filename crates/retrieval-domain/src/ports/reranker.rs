//! Reranker Port
//!
//! A second-stage, asynchronous, stateless relevance scorer. Concrete
//! providers (an OpenAI-compatible HTTP client, a null no-op for testing)
//! live in `retrieval-providers`; this port only defines the contract.
//!
//! Re-expressed from the source's abstract-base-plus-subclasses pattern as
//! a capability trait: anything that can `rerank`, report its
//! `provider_name`, and report its `model_name` is a reranker. No
//! inheritance is required.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A document as presented to a reranker: just enough to score relevance,
/// nothing about how it was retrieved.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankCandidate {
    /// Stable identifier, echoed back in the result
    pub id: String,
    /// Text content to score against the query
    pub content: String,
    /// Open metadata, passed through unchanged
    pub metadata: HashMap<String, Value>,
}

/// Options controlling a rerank call.
#[derive(Debug, Clone, Default)]
pub struct RerankOptions {
    /// Keep only the top N results from the reranker
    pub top_n: Option<usize>,
    /// Drop results scoring below this relevance threshold
    pub threshold: Option<f32>,
}

/// A single reranked result: the original candidate, the score the
/// reranker assigned it, and its position in the input list (since
/// reranking may reorder).
#[derive(Debug, Clone, PartialEq)]
pub struct RerankedDocument {
    /// The candidate as given to `rerank`
    pub document: RerankCandidate,
    /// The reranker's relevance score for this candidate
    pub relevance_score: f32,
    /// Index of this candidate in the list passed to `rerank`
    pub original_index: usize,
}

/// Reranker Port
///
/// # Example
///
/// ```ignore
/// use retrieval_domain::ports::{RerankCandidate, RerankOptions, Reranker};
///
/// let ranked = reranker
///     .rerank("authenticate user", &candidates, &RerankOptions::default())
///     .await?;
/// for r in ranked {
///     println!("{}: {}", r.document.id, r.relevance_score);
/// }
/// ```
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Score and reorder `documents` against `query`. The provider defines
    /// the ranking order of the returned list; callers should not assume it
    /// matches input order.
    async fn rerank(
        &self,
        query: &str,
        documents: &[RerankCandidate],
        options: &RerankOptions,
    ) -> Result<Vec<RerankedDocument>>;

    /// Identifier for the backing provider (e.g. `"voyageai"`, `"cohere"`)
    fn provider_name(&self) -> &str;

    /// Identifier for the model this provider calls
    fn model_name(&self) -> &str;
}
