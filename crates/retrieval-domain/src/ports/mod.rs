//! Domain Port Interfaces
//!
//! Boundary contracts between the core (encoder, dispatcher, fusion) and the
//! external systems it coordinates.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`VectorStore`] | Vector storage and per-channel similarity search |
//! | [`Reranker`] | Second-stage learned relevance scoring |

/// Reranker provider port
pub mod reranker;
/// Vector store provider port
pub mod vector_store;

pub use reranker::{RerankCandidate, RerankOptions, Reranker, RerankedDocument};
pub use vector_store::{ScoredPoint, VectorChannel, VectorQuery, VectorStore};
