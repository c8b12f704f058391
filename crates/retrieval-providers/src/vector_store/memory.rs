//! In-Memory Vector Store
//!
//! A brute-force test double for [`VectorStore`]: no persistence, no
//! network, scores every point on every search. Useful for dispatcher and
//! fusion tests that should not depend on a live backend.

use async_trait::async_trait;
use dashmap::DashMap;
use retrieval_domain::value_objects::{FilterExpr, SparseVector, VectorDocument};
use retrieval_domain::{
    ports::{ScoredPoint, VectorChannel, VectorQuery, VectorStore},
    Error, Result,
};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct Collection {
    hybrid: bool,
    dim: usize,
    points: Vec<VectorDocument>,
}

/// In-memory [`VectorStore`] implementation, backed by a
/// [`DashMap`]-guarded-per-collection [`RwLock`] of points.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    collections: DashMap<String, RwLock<Collection>>,
}

impl MemoryVectorStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, name: &str) -> Result<()> {
        if self.collections.contains_key(name) {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "collection {name} does not exist"
            )))
        }
    }

    fn check_dim(dim: usize, point: &VectorDocument) -> Result<()> {
        if point.dense_vector.len() != dim {
            return Err(Error::invalid_argument(format!(
                "dense vector has {} dimensions, collection expects {dim}",
                point.dense_vector.len()
            )));
        }
        Ok(())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let denom = (dot(a, a).sqrt()) * (dot(b, b).sqrt());
    if denom == 0.0 {
        0.0
    } else {
        dot(a, b) / denom
    }
}

fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f32 {
    let mut score = 0.0;
    for (idx, val) in a.indices.iter().zip(a.values.iter()) {
        if let Some(pos) = b.indices.iter().position(|i| i == idx) {
            score += val * b.values[pos];
        }
    }
    score
}

fn matches_filter(doc: &VectorDocument, filter: &FilterExpr) -> bool {
    let field_value = |field: &str| -> Option<String> {
        match field {
            "id" => Some(doc.id.clone()),
            "relativePath" | "relative_path" => Some(doc.relative_path.clone()),
            "fileExtension" | "file_extension" => Some(doc.file_extension.clone()),
            _ => doc
                .metadata
                .get(field)
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }
    };

    match filter {
        FilterExpr::Any { field, values } => field_value(field)
            .map(|v| values.contains(&v))
            .unwrap_or(false),
        FilterExpr::Must { field, value } => field_value(field).as_deref() == Some(value.as_str()),
        FilterExpr::MustNot { field, value } => {
            field_value(field).as_deref() != Some(value.as_str())
        }
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn has_collection(&self, name: &str) -> Result<bool> {
        Ok(self.collections.contains_key(name))
    }

    async fn is_hybrid(&self, name: &str) -> Result<bool> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        Ok(entry.read().await.hybrid)
    }

    async fn create_collection(&self, name: &str, dim: usize) -> Result<()> {
        self.collections.insert(
            name.to_string(),
            RwLock::new(Collection {
                hybrid: false,
                dim,
                points: Vec::new(),
            }),
        );
        Ok(())
    }

    async fn create_hybrid_collection(&self, name: &str, dim: usize) -> Result<()> {
        self.collections.insert(
            name.to_string(),
            RwLock::new(Collection {
                hybrid: true,
                dim,
                points: Vec::new(),
            }),
        );
        Ok(())
    }

    async fn insert(&self, name: &str, points: Vec<VectorDocument>) -> Result<()> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        let mut guard = entry.write().await;
        for point in &points {
            Self::check_dim(guard.dim, point)?;
        }
        guard.points.extend(points);
        Ok(())
    }

    async fn insert_hybrid(&self, name: &str, points: Vec<VectorDocument>) -> Result<()> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        let mut guard = entry.write().await;
        for mut point in points {
            Self::check_dim(guard.dim, &point)?;
            if point.sparse_vector.is_none() {
                point.sparse_vector = Some(SparseVector::empty());
            }
            guard.points.push(point);
        }
        Ok(())
    }

    async fn search(
        &self,
        name: &str,
        channel: VectorChannel,
        vector: VectorQuery<'_>,
        limit: usize,
        filter: Option<&FilterExpr>,
    ) -> Result<Vec<ScoredPoint>> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        let guard = entry.read().await;

        let mut hits: Vec<ScoredPoint> = guard
            .points
            .iter()
            .filter(|doc| filter.is_none_or(|f| matches_filter(doc, f)))
            .filter_map(|doc| {
                let score = match (channel, &vector) {
                    (VectorChannel::Sparse, VectorQuery::Sparse(q)) => doc
                        .sparse_vector
                        .as_ref()
                        .map(|sv| sparse_dot(sv, q))
                        .filter(|s| *s > 0.0),
                    (VectorChannel::Dense | VectorChannel::Unnamed, VectorQuery::Dense(q)) => {
                        Some(cosine(&doc.dense_vector, q))
                    }
                    _ => None,
                }?;
                Some(ScoredPoint {
                    document: doc.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn scroll(
        &self,
        name: &str,
        filter: Option<&FilterExpr>,
        _fields: &[String],
        limit: usize,
    ) -> Result<Vec<VectorDocument>> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        let guard = entry.read().await;
        Ok(guard
            .points
            .iter()
            .filter(|doc| filter.is_none_or(|f| matches_filter(doc, f)))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete(&self, name: &str, ids: &[String]) -> Result<()> {
        self.get(name)?;
        let entry = self.collections.get(name).unwrap();
        let mut guard = entry.write().await;
        guard.points.retain(|doc| !ids.contains(&doc.id));
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<()> {
        self.collections.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_search_dense() {
        let store = MemoryVectorStore::new();
        store.create_collection("chunks", 3).await.unwrap();
        store
            .insert(
                "chunks",
                vec![VectorDocument::new("a", vec![1.0, 0.0, 0.0], "", "f.rs", 1, 1, "rs")],
            )
            .await
            .unwrap();

        let hits = store
            .search(
                "chunks",
                VectorChannel::Unnamed,
                VectorQuery::Dense(&[1.0, 0.0, 0.0]),
                10,
                None,
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn hybrid_collection_reports_hybrid() {
        let store = MemoryVectorStore::new();
        store.create_hybrid_collection("chunks", 3).await.unwrap();
        assert!(store.is_hybrid("chunks").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_points() {
        let store = MemoryVectorStore::new();
        store.create_collection("chunks", 3).await.unwrap();
        store
            .insert(
                "chunks",
                vec![VectorDocument::new("a", vec![1.0, 0.0, 0.0], "", "f.rs", 1, 1, "rs")],
            )
            .await
            .unwrap();
        store.delete("chunks", &["a".to_string()]).await.unwrap();
        let remaining = store.scroll("chunks", None, &[], 10).await.unwrap();
        assert!(remaining.is_empty());
    }
}
