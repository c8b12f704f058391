//! Hybrid Dispatcher
//!
//! Coordinates multi-channel search against a [`VectorStore`], fuses the
//! per-channel results, and optionally hands the fused list to a
//! [`Reranker`]. Normalizes named-vector (hybrid) vs. single-vector
//! collection addressing so callers never branch on collection shape.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::join_all;
use retrieval_domain::ports::{RerankCandidate, RerankOptions, Reranker, VectorStore};
use retrieval_domain::value_objects::{
    FilterExpr, HybridSearchRequest, HybridSearchResult, QueryVector,
};
use retrieval_domain::ports::{VectorChannel, VectorQuery};
use retrieval_domain::Result;

use crate::fusion::{fuse, ChannelScores, FusionStrategy};

/// A snapshot of the dispatcher's cache state, mirroring what a caller would
/// want to expose on a metrics or admin endpoint.
#[derive(Debug, Clone)]
pub struct DispatcherStats {
    /// Collections whose hybrid-mode has been observed and cached
    pub cached_collections: usize,
    /// Of those, how many are hybrid (named-vector) collections
    pub hybrid_collections: usize,
}

/// Optional reranker hand-off parameters for a single search call.
pub struct RerankHandoff<'a> {
    /// The original query text, passed to the reranker alongside candidates
    pub query_text: &'a str,
    /// Top-N and threshold options forwarded to the reranker
    pub options: RerankOptions,
}

/// Coordinates channel selection, per-channel search, and rank fusion
/// against a [`VectorStore`], with an optional [`Reranker`] hand-off.
pub struct HybridDispatcher {
    store: Arc<dyn VectorStore>,
    reranker: Option<Arc<dyn Reranker>>,
    hybrid_cache: DashMap<String, bool>,
}

impl HybridDispatcher {
    /// Build a dispatcher against `store`, with no reranker configured.
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self {
            store,
            reranker: None,
            hybrid_cache: DashMap::new(),
        }
    }

    /// Attach a reranker, enabling the optional hand-off in
    /// [`Self::hybrid_search`].
    pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Snapshot of the dispatcher's per-collection hybrid-mode cache.
    pub fn stats(&self) -> DispatcherStats {
        let cached_collections = self.hybrid_cache.len();
        let hybrid_collections = self.hybrid_cache.iter().filter(|e| *e.value()).count();
        DispatcherStats {
            cached_collections,
            hybrid_collections,
        }
    }

    async fn is_hybrid(&self, collection: &str) -> Result<bool> {
        if let Some(cached) = self.hybrid_cache.get(collection) {
            return Ok(*cached);
        }
        let hybrid = self.store.is_hybrid(collection).await?;
        self.hybrid_cache.insert(collection.to_string(), hybrid);
        Ok(hybrid)
    }

    fn select_channel(hybrid: bool, request: &HybridSearchRequest) -> Option<VectorChannel> {
        let names_sparse = request.channel.as_deref() == Some("sparse");
        if hybrid && (matches!(request.data, QueryVector::Sparse(_)) || names_sparse) {
            return Some(VectorChannel::Sparse);
        }
        if hybrid && matches!(request.data, QueryVector::Dense(_)) {
            return Some(VectorChannel::Dense);
        }
        if matches!(request.data, QueryVector::Text(_)) {
            return None;
        }
        Some(VectorChannel::Unnamed)
    }

    /// Run `requests` against `collection`, one per channel, fuse the
    /// results with `fusion`, and optionally hand the top results to a
    /// configured reranker.
    ///
    /// Requests whose data is text are skipped with a warning. Requests
    /// carrying an empty sparse vector are skipped silently. If every
    /// request is skipped, returns an empty list without contacting the
    /// backend.
    pub async fn hybrid_search(
        &self,
        collection: &str,
        requests: &[HybridSearchRequest],
        filter: Option<&FilterExpr>,
        fusion: &FusionStrategy,
        rerank: Option<RerankHandoff<'_>>,
    ) -> Result<Vec<HybridSearchResult>> {
        let hybrid = self.is_hybrid(collection).await?;

        // Each selected request becomes one independent channel search; they
        // run concurrently and are reassembled below in request order so
        // rank/insertion-order semantics stay identical to a sequential scan.
        let mut search_futures = Vec::new();
        for request in requests {
            if request.data.is_empty_sparse() {
                continue;
            }
            let Some(channel) = Self::select_channel(hybrid, request) else {
                tracing::warn!("hybrid search request carries text data; skipping (unsupported)");
                continue;
            };

            let vector = match &request.data {
                QueryVector::Dense(v) => VectorQuery::Dense(v.as_slice()),
                QueryVector::Sparse(v) => VectorQuery::Sparse(v),
                QueryVector::Text(_) => unreachable!("text requests are filtered above"),
            };

            search_futures.push(self.store.search(collection, channel, vector, request.limit, filter));
        }

        if search_futures.is_empty() {
            return Ok(Vec::new());
        }
        let total_channels = search_futures.len();

        let mut per_doc: HashMap<String, (retrieval_domain::value_objects::VectorDocument, Vec<f32>, Vec<usize>)> =
            HashMap::new();
        let mut insertion_order: Vec<String> = Vec::new();

        for hits in join_all(search_futures).await {
            for (rank, hit) in hits?.into_iter().enumerate() {
                let id = hit.document.id.clone();
                let entry = per_doc.entry(id.clone()).or_insert_with(|| {
                    insertion_order.push(id.clone());
                    (hit.document.clone(), Vec::new(), Vec::new())
                });
                entry.1.push(hit.score);
                entry.2.push(rank);
            }
        }

        let channel_scores: Vec<ChannelScores> = insertion_order
            .iter()
            .map(|id| {
                let (_, raw_scores, ranks) = &per_doc[id];
                ChannelScores {
                    raw_scores: raw_scores.clone(),
                    ranks: ranks.clone(),
                    total_channels,
                }
            })
            .collect();

        let fused = fuse(&channel_scores, fusion);

        let limit = requests.iter().map(|r| r.limit).max().unwrap_or(0);
        let mut results: Vec<HybridSearchResult> = fused
            .into_iter()
            .take(limit.max(1))
            .map(|(idx, score)| {
                let id = &insertion_order[idx];
                let (document, _, _) = &per_doc[id];
                HybridSearchResult {
                    document: document.clone(),
                    fused_score: score,
                }
            })
            .collect();

        if let Some(handoff) = rerank {
            results = self.apply_reranker(results, handoff).await?;
        }

        Ok(results)
    }

    async fn apply_reranker(
        &self,
        results: Vec<HybridSearchResult>,
        handoff: RerankHandoff<'_>,
    ) -> Result<Vec<HybridSearchResult>> {
        let Some(reranker) = &self.reranker else {
            return Ok(results);
        };
        if results.is_empty() {
            return Ok(results);
        }
        if handoff.query_text.is_empty() {
            return Err(retrieval_domain::Error::invalid_argument(
                "query text must not be empty",
            ));
        }

        let candidates: Vec<RerankCandidate> = results
            .iter()
            .map(|r| RerankCandidate {
                id: r.document.id.clone(),
                content: r.document.content.clone(),
                metadata: r.document.metadata.clone(),
            })
            .collect();

        let reranked = reranker
            .rerank(handoff.query_text, &candidates, &handoff.options)
            .await?;

        Ok(reranked
            .into_iter()
            .filter_map(|r| {
                results
                    .iter()
                    .find(|res| res.document.id == r.document.id)
                    .map(|res| HybridSearchResult {
                        document: res.document.clone(),
                        fused_score: r.relevance_score as f64,
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::MemoryVectorStore;
    use retrieval_domain::value_objects::{SparseVector, VectorDocument};

    #[tokio::test]
    async fn all_sparse_empty_requests_short_circuit() {
        let store: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
        store.create_collection("chunks", 3).await.unwrap();
        let dispatcher = HybridDispatcher::new(store);

        let requests = vec![HybridSearchRequest::sparse(SparseVector::empty(), 10)];
        let results = dispatcher
            .hybrid_search("chunks", &requests, None, &FusionStrategy::rrf_default(), None)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn dense_search_fuses_single_channel() {
        let store: Arc<dyn VectorStore> = Arc::new(MemoryVectorStore::new());
        store.create_collection("chunks", 3).await.unwrap();
        store
            .insert(
                "chunks",
                vec![VectorDocument::new("a", vec![1.0, 0.0, 0.0], "", "f.rs", 1, 1, "rs")],
            )
            .await
            .unwrap();

        let dispatcher = HybridDispatcher::new(store);
        let requests = vec![HybridSearchRequest::dense(vec![1.0, 0.0, 0.0], 10)];
        let results = dispatcher
            .hybrid_search("chunks", &requests, None, &FusionStrategy::rrf_default(), None)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "a");
    }
}
