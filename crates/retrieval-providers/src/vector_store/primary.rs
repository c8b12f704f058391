//! Primary Backend Vector Store
//!
//! A REST client for a Qdrant-style vector database: named `"dense"`/`"sparse"`
//! vectors on hybrid collections, a single unnamed vector otherwise, payload
//! filtering, and scroll. Talks JSON over HTTP so any backend exposing this
//! wire shape (Qdrant itself, or a compatible gateway) works unmodified.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use retrieval_domain::value_objects::{FilterExpr, SparseVector, VectorDocument};
use retrieval_domain::{
    ports::{ScoredPoint, VectorChannel, VectorQuery, VectorStore},
    Error, Result,
};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::constants::{
    CONTENT_TYPE_JSON, DENSE_VECTOR_NAME, HTTP_REQUEST_TIMEOUT_SECS, ID_MAPPING_NAMESPACE,
    SPARSE_VECTOR_NAME, VECTOR_STORE_INSERT_BATCH_SIZE,
};
use crate::utils::{canonical_field_string, check_and_parse, JsonExt};

/// Map a caller-supplied string id to a backend-acceptable UUID. Total and
/// deterministic: the same input string always produces the same UUID, and
/// every input string (however it is shaped) produces a valid one.
fn map_id(id: &str) -> Uuid {
    Uuid::new_v5(&ID_MAPPING_NAMESPACE, id.as_bytes())
}

/// REST-backed [`VectorStore`] implementation against a Qdrant-style API.
pub struct PrimaryVectorStore {
    http_client: Client,
    base_url: String,
    hybrid_cache: DashMap<String, bool>,
    cancellation: Option<CancellationToken>,
}

impl PrimaryVectorStore {
    /// Build a client against `base_url` (e.g. `http://localhost:6333`).
    pub fn new(base_url: String) -> Self {
        Self::with_client(
            base_url,
            Client::builder()
                .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
                .build()
                .expect("reqwest client with default TLS backend"),
        )
    }

    /// Build a client with a caller-supplied HTTP client.
    pub fn with_client(base_url: String, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            hybrid_cache: DashMap::new(),
            cancellation: None,
        }
    }

    /// Attach a cancellation token; batched operations check it between
    /// batches and stop early with [`Error::Canceled`], reporting the batch
    /// that was in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn check_cancellation(&self, batch_index: usize) -> Result<()> {
        if self.cancellation.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(Error::canceled(batch_index));
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.header("Content-Type", CONTENT_TYPE_JSON).send().await.map_err(|e| {
            Error::backend_unavailable_with_source(format!("request to {} failed", self.base_url), e)
        })?;
        check_and_parse(response).await
    }

    fn point_vector(doc: &VectorDocument, hybrid: bool) -> Value {
        if hybrid {
            let mut vectors = serde_json::Map::new();
            vectors.insert(DENSE_VECTOR_NAME.to_string(), json!(doc.dense_vector));
            let sparse = doc.sparse_vector.clone().unwrap_or_else(SparseVector::empty);
            vectors.insert(
                SPARSE_VECTOR_NAME.to_string(),
                json!({ "indices": sparse.indices, "values": sparse.values }),
            );
            Value::Object(vectors)
        } else {
            json!(doc.dense_vector)
        }
    }

    fn point_payload(doc: &VectorDocument) -> Value {
        let mut payload = serde_json::Map::new();
        payload.insert("id".to_string(), json!(doc.id));
        payload.insert("content".to_string(), json!(doc.content));
        payload.insert("relativePath".to_string(), json!(doc.relative_path));
        payload.insert("startLine".to_string(), json!(doc.start_line));
        payload.insert("endLine".to_string(), json!(doc.end_line));
        payload.insert("fileExtension".to_string(), json!(doc.file_extension));
        for (key, value) in &doc.metadata {
            payload.insert(key.clone(), value.clone());
        }
        Value::Object(payload)
    }

    fn point_from_response(entry: &Value, fields: &[String]) -> Option<VectorDocument> {
        let payload = entry.get("payload")?;
        let id = payload.str_or("id", "").to_string();
        if id.is_empty() {
            return None;
        }

        let mut doc = VectorDocument::new(
            id,
            Vec::new(),
            payload.str_or("content", ""),
            payload.str_or("relativePath", ""),
            payload.get("startLine").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
            payload.get("endLine").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
            payload.str_or("fileExtension", ""),
        );

        let requested_keys: Vec<&str> = if fields.is_empty() {
            payload.as_object().map(|m| m.keys().map(String::as_str).collect()).unwrap_or_default()
        } else {
            fields.iter().map(String::as_str).collect()
        };
        for key in requested_keys {
            if matches!(key, "id" | "content" | "relativePath" | "startLine" | "endLine" | "fileExtension") {
                continue;
            }
            if let Some(value) = payload.get(key) {
                doc.metadata
                    .insert(key.to_string(), json!(canonical_field_string(value)));
            }
        }

        Some(doc)
    }

    async fn upsert_batched(&self, name: &str, points: Vec<VectorDocument>, hybrid: bool) -> Result<()> {
        for (batch_index, batch) in points.chunks(VECTOR_STORE_INSERT_BATCH_SIZE).enumerate() {
            self.check_cancellation(batch_index)?;
            let payload_points: Vec<Value> = batch
                .iter()
                .map(|doc| {
                    json!({
                        "id": map_id(&doc.id).to_string(),
                        "vector": Self::point_vector(doc, hybrid),
                        "payload": Self::point_payload(doc),
                    })
                })
                .collect();

            self.send(
                self.http_client
                    .put(self.url(&format!("/collections/{name}/points")))
                    .json(&json!({ "points": payload_points })),
            )
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for PrimaryVectorStore {
    async fn has_collection(&self, name: &str) -> Result<bool> {
        let response = self
            .http_client
            .get(self.url(&format!("/collections/{name}")))
            .send()
            .await
            .map_err(|e| Error::backend_unavailable_with_source("collection lookup failed", e))?;
        Ok(response.status().is_success())
    }

    async fn is_hybrid(&self, name: &str) -> Result<bool> {
        if let Some(cached) = self.hybrid_cache.get(name) {
            return Ok(*cached);
        }

        let body = self
            .send(self.http_client.get(self.url(&format!("/collections/{name}"))))
            .await?;
        let hybrid = body
            .pointer("/result/config/params/vectors")
            .and_then(|v| v.as_object())
            .map(|vectors| vectors.contains_key(DENSE_VECTOR_NAME))
            .unwrap_or(false);
        self.hybrid_cache.insert(name.to_string(), hybrid);
        Ok(hybrid)
    }

    async fn create_collection(&self, name: &str, dim: usize) -> Result<()> {
        self.send(self.http_client.put(self.url(&format!("/collections/{name}"))).json(&json!({
            "vectors": { "size": dim, "distance": "Cosine" },
        })))
        .await?;
        self.hybrid_cache.insert(name.to_string(), false);
        Ok(())
    }

    async fn create_hybrid_collection(&self, name: &str, dim: usize) -> Result<()> {
        self.send(self.http_client.put(self.url(&format!("/collections/{name}"))).json(&json!({
            "vectors": {
                DENSE_VECTOR_NAME: { "size": dim, "distance": "Cosine" },
            },
            "sparse_vectors": {
                SPARSE_VECTOR_NAME: {},
            },
        })))
        .await?;
        self.hybrid_cache.insert(name.to_string(), true);
        Ok(())
    }

    async fn insert(&self, name: &str, points: Vec<VectorDocument>) -> Result<()> {
        self.upsert_batched(name, points, false).await
    }

    async fn insert_hybrid(&self, name: &str, points: Vec<VectorDocument>) -> Result<()> {
        self.upsert_batched(name, points, true).await
    }

    async fn search(
        &self,
        name: &str,
        channel: VectorChannel,
        vector: VectorQuery<'_>,
        limit: usize,
        filter: Option<&FilterExpr>,
    ) -> Result<Vec<ScoredPoint>> {
        let hybrid = self.is_hybrid(name).await?;
        let vector_field = match (hybrid, channel) {
            (true, VectorChannel::Sparse) => json!({
                "name": SPARSE_VECTOR_NAME,
                "vector": match vector {
                    VectorQuery::Sparse(sv) => json!({ "indices": sv.indices, "values": sv.values }),
                    VectorQuery::Dense(_) => return Err(Error::invalid_argument(
                        "sparse channel requires a sparse query vector",
                    )),
                },
            }),
            (true, VectorChannel::Dense) | (true, VectorChannel::Unnamed) => json!({
                "name": DENSE_VECTOR_NAME,
                "vector": match vector {
                    VectorQuery::Dense(v) => json!(v),
                    VectorQuery::Sparse(_) => return Err(Error::invalid_argument(
                        "dense channel requires a dense query vector",
                    )),
                },
            }),
            (false, _) => match vector {
                VectorQuery::Dense(v) => json!(v),
                VectorQuery::Sparse(_) => {
                    return Err(Error::invalid_argument(
                        "non-hybrid collection has no sparse channel",
                    ))
                }
            },
        };

        let mut body = json!({
            "vector": vector_field,
            "limit": limit,
            "with_payload": true,
        });
        if let Some(filter) = filter {
            body["filter"] = filter_to_json(filter);
        }

        let response = self
            .send(
                self.http_client
                    .post(self.url(&format!("/collections/{name}/points/search")))
                    .json(&body),
            )
            .await?;

        let hits = response.get("result").and_then(|v| v.as_array()).cloned().unwrap_or_default();
        let mut scored = Vec::with_capacity(hits.len());
        for hit in hits {
            let Some(document) = Self::point_from_response(&hit, &[]) else {
                continue;
            };
            let score = hit.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            scored.push(ScoredPoint { document, score });
        }
        Ok(scored)
    }

    async fn scroll(
        &self,
        name: &str,
        filter: Option<&FilterExpr>,
        fields: &[String],
        limit: usize,
    ) -> Result<Vec<VectorDocument>> {
        let mut body = json!({
            "limit": limit,
            "with_payload": true,
        });
        if let Some(filter) = filter {
            body["filter"] = filter_to_json(filter);
        }

        let response = self
            .send(
                self.http_client
                    .post(self.url(&format!("/collections/{name}/points/scroll")))
                    .json(&body),
            )
            .await?;

        let points = response
            .pointer("/result/points")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        Ok(points
            .iter()
            .filter_map(|p| Self::point_from_response(p, fields))
            .collect())
    }

    async fn delete(&self, name: &str, ids: &[String]) -> Result<()> {
        self.check_cancellation(0)?;
        let mapped: Vec<String> = ids.iter().map(|id| map_id(id).to_string()).collect();
        self.send(
            self.http_client
                .post(self.url(&format!("/collections/{name}/points/delete")))
                .json(&json!({ "points": mapped })),
        )
        .await?;
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<()> {
        self.send(self.http_client.delete(self.url(&format!("/collections/{name}")))).await?;
        self.hybrid_cache.remove(name);
        Ok(())
    }
}

fn filter_to_json(filter: &FilterExpr) -> Value {
    match filter {
        FilterExpr::Any { field, values } => json!({
            "should": values.iter().map(|v| json!({ "key": field, "match": { "value": v } })).collect::<Vec<_>>(),
        }),
        FilterExpr::Must { field, value } => json!({
            "must": [{ "key": field, "match": { "value": value } }],
        }),
        FilterExpr::MustNot { field, value } => json!({
            "must_not": [{ "key": field, "match": { "value": value } }],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_mapping_is_deterministic() {
        assert_eq!(map_id("chunk_abc123"), map_id("chunk_abc123"));
        assert_ne!(map_id("chunk_abc123"), map_id("chunk_def456"));
    }

    #[test]
    fn filter_any_maps_to_should_clause() {
        let filter = FilterExpr::Any {
            field: "fileExtension".to_string(),
            values: vec![".ts".to_string(), ".py".to_string()],
        };
        let json = filter_to_json(&filter);
        assert_eq!(json["should"].as_array().unwrap().len(), 2);
    }
}
