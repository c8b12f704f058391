//! OpenAI-Compatible Reranker
//!
//! Posts to a `/rerank` endpoint implementing the de facto OpenAI-compatible
//! shape (Cohere, VoyageAI, and most self-hosted rerank servers accept
//! this). Stateless: every call is a single HTTP round trip.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use retrieval_domain::ports::{RerankCandidate, RerankOptions, Reranker, RerankedDocument};
use retrieval_domain::Result;

use crate::constants::{CONTENT_TYPE_JSON, HTTP_REQUEST_TIMEOUT_SECS};
use crate::utils::check_and_parse_rerank;

/// Reranker backed by an OpenAI-compatible `/rerank` HTTP endpoint.
///
/// ## Example
///
/// ```rust,no_run
/// use retrieval_providers::rerank::HttpReranker;
///
/// let reranker = HttpReranker::new(
///     "https://api.example.com/v1".to_string(),
///     "sk-your-api-key".to_string(),
///     "rerank-v1".to_string(),
/// );
/// ```
pub struct HttpReranker {
    base_url: String,
    api_key: String,
    model: String,
    http_client: Client,
}

impl HttpReranker {
    /// Build a reranker against `base_url` (no trailing slash expected),
    /// authenticating with `api_key` and calling `model`.
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self::with_client(
            base_url,
            api_key,
            model,
            Client::builder()
                .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
                .build()
                .expect("reqwest client with default TLS backend"),
        )
    }

    /// Build a reranker with a caller-supplied HTTP client, e.g. to share
    /// connection pools with other providers or to inject a test client.
    pub fn with_client(base_url: String, api_key: String, model: String, http_client: Client) -> Self {
        Self {
            base_url,
            api_key,
            model,
            http_client,
        }
    }
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn rerank(
        &self,
        query: &str,
        documents: &[RerankCandidate],
        options: &RerankOptions,
    ) -> Result<Vec<RerankedDocument>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }
        if query.is_empty() {
            return Err(retrieval_domain::Error::invalid_argument(
                "query text must not be empty",
            ));
        }

        let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let mut payload = serde_json::json!({
            "model": self.model,
            "query": query,
            "documents": contents,
            "return_documents": false,
        });
        if let Some(top_n) = options.top_n {
            payload["top_n"] = serde_json::json!(top_n);
        }

        let response = self
            .http_client
            .post(format!("{}/rerank", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&payload)
            .send()
            .await
            .map_err(|e| retrieval_domain::Error::backend_unavailable_with_source(
                format!("rerank request to {} failed", self.base_url),
                e,
            ))?;

        let body = check_and_parse_rerank(response).await?;

        let entries = body
            .get("data")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let index = entry.get("index").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
            let score = entry
                .get("relevance_score")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as f32;

            if let Some(threshold) = options.threshold {
                if score < threshold {
                    continue;
                }
            }

            if let Some(document) = documents.get(index) {
                results.push(RerankedDocument {
                    document: document.clone(),
                    relevance_score: score,
                    original_index: index,
                });
            }
        }

        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "http"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_list_short_circuits() {
        let reranker = HttpReranker::new(
            "https://example.invalid".to_string(),
            "key".to_string(),
            "rerank-v1".to_string(),
        );
        assert_eq!(reranker.provider_name(), "http");
        assert_eq!(reranker.model_name(), "rerank-v1");
    }
}
