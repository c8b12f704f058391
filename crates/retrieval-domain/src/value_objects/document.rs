//! Vector Document Value Object
//!
//! Represents a single indexed code chunk: a stable id, its dense and
//! (optional) sparse representations, and the payload a caller needs to
//! present or navigate to the match.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::SparseVector;

/// Value Object: Indexed Code Chunk
///
/// Identity is by `id`; every other field is payload. The vector store owns
/// a `VectorDocument` once it has been inserted and destroys it on `delete`
/// or `drop_collection`.
///
/// ## Example
///
/// ```
/// use retrieval_domain::value_objects::VectorDocument;
///
/// let doc = VectorDocument::new(
///     "chunk_abc123",
///     vec![0.1, 0.2, 0.3],
///     "pub fn authenticate(token: &str) -> Result<User> { ... }",
///     "src/auth/login.rs",
///     42,
///     48,
///     "rs",
/// );
/// assert_eq!(doc.id, "chunk_abc123");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorDocument {
    /// Stable identifier, authoritative across backends
    pub id: String,
    /// Dense embedding vector, matching the collection's configured dimension
    pub dense_vector: Vec<f32>,
    /// Optional sparse vector (absent when the document was never indexed
    /// for lexical search)
    pub sparse_vector: Option<SparseVector>,
    /// UTF-8 text content of the chunk
    pub content: String,
    /// Path to the source file, relative to the indexed root
    pub relative_path: String,
    /// 1-based, inclusive start line
    pub start_line: u32,
    /// 1-based, inclusive end line
    pub end_line: u32,
    /// File extension, without the leading dot stripped by convention
    /// (callers decide the exact form; the core never parses it)
    pub file_extension: String,
    /// Open metadata mapping for caller-defined payload fields
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VectorDocument {
    /// Construct a document with no sparse vector and empty metadata
    pub fn new(
        id: impl Into<String>,
        dense_vector: Vec<f32>,
        content: impl Into<String>,
        relative_path: impl Into<String>,
        start_line: u32,
        end_line: u32,
        file_extension: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dense_vector,
            sparse_vector: None,
            content: content.into(),
            relative_path: relative_path.into(),
            start_line,
            end_line,
            file_extension: file_extension.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attach a sparse vector, returning `self` for chaining
    pub fn with_sparse_vector(mut self, sparse: SparseVector) -> Self {
        self.sparse_vector = Some(sparse);
        self
    }

    /// Attach metadata, returning `self` for chaining
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
