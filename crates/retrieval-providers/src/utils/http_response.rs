//! HTTP Response Utilities
//!
//! Shared response-handling helpers for the reranker and primary-backend
//! HTTP clients. Not a port: both callers own their own error mapping, this
//! just avoids duplicating the status-check-then-parse dance.

use reqwest::Response;
use retrieval_domain::{Error, Result};

/// Check `response`'s status and parse its JSON body, mapping a non-2xx
/// status to [`Error::backend_rejected`].
pub async fn check_and_parse(response: Response) -> Result<serde_json::Value> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable response body>".to_string());
        return Err(Error::backend_rejected(status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| Error::backend_unavailable_with_source("response parse failed", e))
}

/// Same as [`check_and_parse`], but maps a non-2xx status to
/// [`Error::rerank_failure`] per the reranker contract, which requires
/// surfacing the status and body distinctly from a generic backend
/// rejection.
pub async fn check_and_parse_rerank(response: Response) -> Result<serde_json::Value> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable response body>".to_string());
        return Err(Error::rerank_failure(status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| Error::backend_unavailable_with_source("response parse failed", e))
}
