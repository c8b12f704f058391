//! # Hybrid Retrieval Providers
//!
//! Concrete implementations of the `retrieval-domain` ports: a BM25 sparse
//! encoder, a filter-expression parser, rank-fusion strategies, an
//! OpenAI-compatible reranker client, two `VectorStore` adapters, and the
//! `HybridDispatcher` that coordinates them.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tokenizer`] | deterministic text-to-token splitting (simple/code modes) |
//! | [`sparse`] | BM25+ vocabulary and encoder |
//! | [`filter`] | filter-expression string to [`retrieval_domain::value_objects::FilterExpr`] |
//! | [`fusion`] | RRF/weighted/average rank fusion |
//! | [`rerank`] | OpenAI-compatible `/rerank` HTTP client |
//! | [`vector_store`] | primary REST-backed and in-memory `VectorStore` adapters |
//! | [`dispatcher`] | per-request channel selection, fan-out search, and fusion |

/// Tuning and protocol constants
pub mod constants;
/// Hybrid search coordination
pub mod dispatcher;
/// Filter expression parser
pub mod filter;
/// Rank fusion strategies
pub mod fusion;
/// Reranker HTTP provider
pub mod rerank;
/// BM25 sparse encoder
pub mod sparse;
/// Tokenization
pub mod tokenizer;
/// Shared HTTP/JSON helpers
pub mod utils;
/// Vector store adapters
pub mod vector_store;

pub use dispatcher::HybridDispatcher;
