//! # Hybrid Retrieval Domain
//!
//! Core types and port traits for the hybrid code-search retrieval engine:
//! the sparse/dense data model, the backend-neutral filter AST, and the
//! `VectorStore`/`Reranker` contracts the providers crate implements.
//!
//! This crate has no I/O of its own — it exists so the encoder, the filter
//! parser, and the rank-fusion function in `retrieval-providers` can stay
//! pure, while the dispatcher coordinates against these traits without
//! depending on any concrete backend.

/// Error types shared across the core
pub mod error;
/// Port traits implemented by provider crates
pub mod ports;
/// Value objects shared by the encoder, dispatcher, and vector store ports
pub mod value_objects;

pub use error::{Error, Result};
