//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hybrid retrieval core
#[derive(Error, Debug)]
pub enum Error {
    /// An argument given to an operation was structurally invalid
    /// (dimension mismatch on insert, empty query text to `rerank`, ...).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// The vector store or reranker backend could not be reached at all
    /// (connection refused, DNS failure, timeout).
    #[error("backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend responded but rejected the request (non-2xx HTTP status).
    #[error("backend rejected request: {status}: {body}")]
    BackendRejected {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body returned by the backend
        body: String,
    },

    /// A caller-supplied cancellation/timeout signal fired mid-request.
    /// `batch_index` identifies which batch of a multi-batch operation (e.g.
    /// a batched upsert) was aborted, so the caller knows how many batches
    /// before it already committed.
    #[error("operation canceled at batch {batch_index}")]
    Canceled {
        /// 0-based index of the batch that was in flight when cancellation
        /// was observed
        batch_index: usize,
    },

    /// The remote reranker endpoint failed; callers must not silently fall
    /// back to the unranked fused ordering when this is returned.
    #[error("rerank failed: {status}: {body}")]
    RerankFailure {
        /// HTTP status code returned by the reranker
        status: u16,
        /// Response body returned by the reranker
        body: String,
    },

    /// JSON parsing or serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a backend-unavailable error with no underlying source
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend-unavailable error wrapping a source error
    pub fn backend_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend-rejected error from an HTTP status and body
    pub fn backend_rejected<S: Into<String>>(status: u16, body: S) -> Self {
        Self::BackendRejected {
            status,
            body: body.into(),
        }
    }

    /// Create a rerank-failure error from an HTTP status and body
    pub fn rerank_failure<S: Into<String>>(status: u16, body: S) -> Self {
        Self::RerankFailure {
            status,
            body: body.into(),
        }
    }

    /// Create a canceled error identifying the in-flight batch
    pub fn canceled(batch_index: usize) -> Self {
        Self::Canceled { batch_index }
    }
}
