//! Vector Store Port
//!
//! Backend-neutral operations the hybrid dispatcher needs. Concrete adapters
//! (the primary HTTP-backed backend, an in-memory test double, ...) live in
//! `retrieval-providers`; this port only defines the contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{FilterExpr, SparseVector, VectorDocument};

/// Which named vector a search or insert targets on a hybrid (multi-vector)
/// collection. A non-hybrid collection has no named channel at all —
/// `Unnamed` is used for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorChannel {
    /// The collection's `"dense"` named vector
    Dense,
    /// The collection's `"sparse"` named vector
    Sparse,
    /// A non-hybrid collection's single, unnamed vector
    Unnamed,
}

/// The query vector passed to [`VectorStore::search`] for a given channel.
#[derive(Debug, Clone)]
pub enum VectorQuery<'a> {
    /// A dense embedding
    Dense(&'a [f32]),
    /// A sparse vector
    Sparse(&'a SparseVector),
}

/// A single per-channel search hit: a document and the raw score the
/// backend assigned it on that channel. Channel fusion is the dispatcher's
/// job, not the store's.
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    /// The matched document
    pub document: VectorDocument,
    /// The backend's raw similarity/relevance score for this channel
    pub score: f32,
}

/// Vector Store Port
///
/// Defines the contract for vector storage backends that persist
/// [`VectorDocument`]s and serve per-channel similarity search. Backends are
/// free to implement this over gRPC, REST, or an in-process structure; the
/// dispatcher only ever speaks this trait.
///
/// # Example
///
/// ```ignore
/// use retrieval_domain::ports::{VectorChannel, VectorQuery, VectorStore};
///
/// if !store.has_collection("code_chunks").await? {
///     store.create_hybrid_collection("code_chunks", 1536).await?;
/// }
/// let hits = store
///     .search("code_chunks", VectorChannel::Dense, VectorQuery::Dense(&query_vec), 10, None)
///     .await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Check whether a collection exists
    async fn has_collection(&self, name: &str) -> Result<bool>;

    /// Check whether a collection is hybrid (has a named `"dense"` vector).
    /// Implementations are expected to cache this after the first check —
    /// the dispatcher relies on that caching, not on calling this itself
    /// more than once per collection per process lifetime.
    async fn is_hybrid(&self, name: &str) -> Result<bool>;

    /// Create a single-vector (non-hybrid) collection of the given dimension
    async fn create_collection(&self, name: &str, dim: usize) -> Result<()>;

    /// Create a hybrid collection with a `"dense"` vector of the given
    /// dimension (cosine distance) and a `"sparse"` named vector
    async fn create_hybrid_collection(&self, name: &str, dim: usize) -> Result<()>;

    /// Insert points into a non-hybrid collection
    async fn insert(&self, name: &str, points: Vec<VectorDocument>) -> Result<()>;

    /// Insert points into a hybrid collection. Points missing a sparse
    /// vector are inserted with an empty one.
    async fn insert_hybrid(&self, name: &str, points: Vec<VectorDocument>) -> Result<()>;

    /// Search a single channel, returning hits ordered by descending score
    async fn search(
        &self,
        name: &str,
        channel: VectorChannel,
        vector: VectorQuery<'_>,
        limit: usize,
        filter: Option<&FilterExpr>,
    ) -> Result<Vec<ScoredPoint>>;

    /// Scroll/query points matching an optional filter, returning only the
    /// requested payload fields populated (backends may still return the
    /// full document; callers should not rely on unrequested fields being
    /// absent)
    async fn scroll(
        &self,
        name: &str,
        filter: Option<&FilterExpr>,
        fields: &[String],
        limit: usize,
    ) -> Result<Vec<VectorDocument>>;

    /// Delete points by their caller-facing ids
    async fn delete(&self, name: &str, ids: &[String]) -> Result<()>;

    /// Drop an entire collection
    async fn drop_collection(&self, name: &str) -> Result<()>;
}
