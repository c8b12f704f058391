//! Vocabulary state: the encoder's persistable memory
//!
//! Indices are dense and contiguous; every vocabulary term has an entry in
//! both the document-frequency and IDF tables, and a term is absent from all
//! three iff it was dropped by `min_df`/`max_df_ratio` at build time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::params::SparseEncoderParams;

/// In-memory vocabulary tables plus the parameters they were built with.
#[derive(Debug, Clone, Default)]
pub struct VocabularyState {
    pub(super) vocabulary: HashMap<String, u32>,
    pub(super) document_frequency: HashMap<String, usize>,
    pub(super) idf_cache: HashMap<String, f32>,
    pub(super) total_documents: usize,
    pub(super) avg_document_length: f32,
}

impl VocabularyState {
    /// Number of terms retained in the vocabulary
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// `true` if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Vocabulary index for `term`, if it survived `min_df`/`max_df_ratio`
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Document frequency of `term`, if it is in the vocabulary
    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.document_frequency.get(term).copied()
    }

    /// Cached IDF of `term`, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.idf_cache.get(term).copied()
    }

    /// Number of documents the vocabulary was built from
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Average document length (in tokens) across the build corpus
    pub fn avg_document_length(&self) -> f32 {
        self.avg_document_length
    }
}

/// Language-neutral, round-trip-lossless export of [`VocabularyState`] plus
/// the parameters it was built with.
///
/// Maps are serialized as arrays of `(key, value)` pairs rather than JSON
/// objects so that non-identifier terms (anything a tokenizer can produce)
/// round-trip without key-escaping surprises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyStateExport {
    pub vocabulary: Vec<(String, u32)>,
    #[serde(rename = "documentFrequency")]
    pub document_frequency: Vec<(String, usize)>,
    #[serde(rename = "idfCache")]
    pub idf_cache: Vec<(String, f32)>,
    #[serde(rename = "totalDocuments")]
    pub total_documents: usize,
    #[serde(rename = "avgDocumentLength")]
    pub avg_document_length: f32,
    pub config: SparseEncoderParams,
}

impl VocabularyStateExport {
    pub(super) fn from_state(state: &VocabularyState, params: &SparseEncoderParams) -> Self {
        Self {
            vocabulary: state
                .vocabulary
                .iter()
                .map(|(term, idx)| (term.clone(), *idx))
                .collect(),
            document_frequency: state
                .document_frequency
                .iter()
                .map(|(term, df)| (term.clone(), *df))
                .collect(),
            idf_cache: state
                .idf_cache
                .iter()
                .map(|(term, idf)| (term.clone(), *idf))
                .collect(),
            total_documents: state.total_documents,
            avg_document_length: state.avg_document_length,
            config: params.clone(),
        }
    }

    pub(super) fn into_state(self) -> (VocabularyState, SparseEncoderParams) {
        let state = VocabularyState {
            vocabulary: self.vocabulary.into_iter().collect(),
            document_frequency: self.document_frequency.into_iter().collect(),
            idf_cache: self.idf_cache.into_iter().collect(),
            total_documents: self.total_documents,
            avg_document_length: self.avg_document_length,
        };
        (state, self.config)
    }
}
