//! Provider Constants
//!
//! Constants specific to the encoder, dispatcher, and vector store adapter
//! implementations.

// ============================================================================
// BM25 SPARSE ENCODER CONSTANTS
// ============================================================================

/// BM25 k1 parameter default (term frequency saturation)
pub const BM25_DEFAULT_K1: f32 = 1.2;

/// BM25 b parameter default (document length normalization)
pub const BM25_DEFAULT_B: f32 = 0.75;

/// Minimum document frequency default (keep terms seen in at least this
/// many documents)
pub const BM25_DEFAULT_MIN_DF: usize = 1;

/// Maximum document-frequency ratio default (drop terms seen in more than
/// this fraction of the corpus)
pub const BM25_DEFAULT_MAX_DF_RATIO: f32 = 0.85;

// ============================================================================
// TOKENIZER CONSTANTS
// ============================================================================

/// Minimum token length kept by either tokenizer mode (drop length <= 1)
pub const TOKEN_MIN_LENGTH: usize = 2;

// ============================================================================
// RANK FUSION CONSTANTS
// ============================================================================

/// Default RRF constant `k`
pub const RRF_DEFAULT_K: u32 = 60;

// ============================================================================
// VECTOR STORE ADAPTER CONSTANTS
// ============================================================================

/// Batch size for chunked upserts against the primary backend
pub const VECTOR_STORE_INSERT_BATCH_SIZE: usize = 100;

/// Named vector used for dense embeddings on a hybrid collection
pub const DENSE_VECTOR_NAME: &str = "dense";

/// Named vector used for sparse embeddings on a hybrid collection
pub const SPARSE_VECTOR_NAME: &str = "sparse";

/// UUID v5 namespace for the deterministic id-mapping function (arbitrary,
/// fixed so the mapping is stable across processes and versions)
pub const ID_MAPPING_NAMESPACE: uuid::Uuid = uuid::Uuid::from_bytes([
    0x6f, 0x1d, 0x3a, 0x2c, 0x9b, 0x44, 0x4e, 0x1a, 0x8f, 0x7e, 0x02, 0xd1, 0x5c, 0x3b, 0x9a, 0x71,
]);

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default HTTP request timeout in seconds
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
