//! BM25 sparse encoder
//!
//! Owns the vocabulary, document-frequency table, and cached IDF scores, and
//! turns text into [`SparseVector`]s against that vocabulary.

use std::collections::{HashMap, HashSet};

use retrieval_domain::value_objects::SparseVector;
use validator::Validate;

use super::params::SparseEncoderParams;
use super::vocabulary::{VocabularyState, VocabularyStateExport};
use crate::tokenizer::tokenize;

/// Stateful BM25 encoder. `Fresh` until the first [`Self::build_vocabulary`]
/// or [`Self::import_state`]; `Initialized` thereafter until [`Self::clear`].
///
/// Rebuilding or re-importing while already initialized replaces the state
/// atomically — callers never observe a partially-updated vocabulary.
#[derive(Debug)]
pub struct SparseEncoder {
    params: SparseEncoderParams,
    state: VocabularyState,
    initialized: bool,
}

impl SparseEncoder {
    /// Construct an encoder with the given parameters, in the `Fresh` state.
    pub fn new(params: SparseEncoderParams) -> Self {
        Self {
            params,
            state: VocabularyState::default(),
            initialized: false,
        }
    }

    /// `true` once a vocabulary has been built or imported.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Read-only view of the current vocabulary tables.
    pub fn vocabulary(&self) -> &VocabularyState {
        &self.state
    }

    /// Current parameters.
    pub fn params(&self) -> &SparseEncoderParams {
        &self.params
    }

    /// Number of terms retained in the vocabulary. Observability
    /// convenience, e.g. for a caller building a stats hand-off alongside
    /// [`crate::dispatcher::HybridDispatcher::stats`].
    pub fn vocabulary_size(&self) -> usize {
        self.state.len()
    }

    /// Number of documents the current vocabulary was built from.
    pub fn total_documents(&self) -> usize {
        self.state.total_documents()
    }

    /// Average document length (in tokens) across the build corpus.
    pub fn avg_document_length(&self) -> f32 {
        self.state.avg_document_length()
    }

    /// Build the vocabulary from a corpus in a single pass, replacing any
    /// existing state. Legal on an empty corpus (empty vocabulary, zero
    /// average length).
    pub fn build_vocabulary<S: AsRef<str>>(&mut self, documents: &[S]) {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut total_tokens = 0usize;

        for doc in documents {
            let tokens = tokenize(doc.as_ref(), self.params.token_mode);
            total_tokens += tokens.len();

            let unique_terms: HashSet<String> = tokens.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let total_documents = documents.len();
        let avg_document_length = if total_documents > 0 {
            total_tokens as f32 / total_documents as f32
        } else {
            0.0
        };

        // Rounded rather than floored: flooring the ratio into a document
        // count truncates too aggressively on small corpora (max_df_ratio
        // 0.85 over 2 documents floors to 1, dropping a term present in
        // both documents).
        let max_df = (self.params.max_df_ratio * total_documents as f32).round() as usize;

        let mut vocabulary = HashMap::new();
        let mut idf_cache = HashMap::new();
        let mut retained_df = HashMap::new();
        let mut next_index: u32 = 0;

        let n = total_documents as f32;
        for (term, df) in document_frequency {
            if df < self.params.min_df || df > max_df {
                continue;
            }
            let idf = ((n - df as f32 + 0.5) / (df as f32 + 0.5) + 1.0).ln();
            vocabulary.insert(term.clone(), next_index);
            idf_cache.insert(term.clone(), idf);
            retained_df.insert(term, df);
            next_index += 1;
        }

        self.state = VocabularyState {
            vocabulary,
            document_frequency: retained_df,
            idf_cache,
            total_documents,
            avg_document_length,
        };
        self.initialized = true;
    }

    /// Embed a document against the current vocabulary.
    pub fn embed_document(&mut self, text: &str) -> SparseVector {
        self.ensure_initialized(text);
        self.embed(text)
    }

    /// Embed a query against the current vocabulary. Uses the identical
    /// formula as [`Self::embed_document`]; queries may diverge in a future
    /// revision, but the contract stays single-sourced for now.
    pub fn embed_query(&mut self, text: &str) -> SparseVector {
        self.ensure_initialized(text);
        self.embed(text)
    }

    /// Reset all tables; subsequent `embed_*` calls auto-initialize again.
    pub fn clear(&mut self) {
        self.state = VocabularyState::default();
        self.initialized = false;
    }

    /// Export the vocabulary state plus parameters as a round-trip-lossless,
    /// language-neutral container.
    pub fn export_state(&self) -> VocabularyStateExport {
        VocabularyStateExport::from_state(&self.state, &self.params)
    }

    /// Replace the encoder's state from a previously-exported container.
    /// Transitions to `Initialized` regardless of prior state.
    pub fn import_state(&mut self, export: VocabularyStateExport) {
        let (state, params) = export.into_state();
        self.state = state;
        self.params = params;
        self.initialized = true;
    }

    fn ensure_initialized(&mut self, fallback_document: &str) {
        if self.initialized {
            return;
        }
        tracing::warn!(
            "sparse encoder used before build_vocabulary/import_state; \
             auto-initializing from a single document (degraded mode)"
        );
        self.build_vocabulary(&[fallback_document]);
    }

    fn embed(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text, self.params.token_mode);
        let doc_len = tokens.len() as f32;
        if doc_len == 0.0 {
            return SparseVector::empty();
        }

        let mut term_freq: HashMap<&str, f32> = HashMap::new();
        for token in &tokens {
            if self.state.vocabulary.contains_key(token.as_str()) {
                *term_freq.entry(token.as_str()).or_insert(0.0) += 1.0;
            }
        }

        let avg_len = self.state.avg_document_length.max(1.0);
        let mut indices = Vec::new();
        let mut values = Vec::new();

        for (term, tf) in term_freq {
            let Some(&vocab_index) = self.state.vocabulary.get(term) else {
                continue;
            };
            let idf = *self.state.idf_cache.get(term).unwrap_or(&0.0);

            let adjusted_tf = if self.params.sublinear_tf {
                1.0 + tf.ln()
            } else {
                tf
            };

            let denominator =
                adjusted_tf + self.params.k1 * (1.0 - self.params.b + self.params.b * doc_len / avg_len);
            let score = idf * adjusted_tf * (self.params.k1 + 1.0) / denominator;

            if score > 0.0 {
                indices.push(vocab_index);
                values.push(score);
            }
        }

        SparseVector::new(indices, values)
    }
}

impl Default for SparseEncoder {
    fn default() -> Self {
        Self::new(SparseEncoderParams::default())
    }
}

/// Validate the encoder's current parameter block, e.g. before persisting a
/// collection's configuration.
pub fn validate_params(params: &SparseEncoderParams) -> Result<(), validator::ValidationErrors> {
    params.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_vocabulary_from_two_documents() {
        let mut encoder = SparseEncoder::default();
        encoder.build_vocabulary(&["red blue red", "blue green"]);

        assert_eq!(encoder.vocabulary().len(), 3);
        assert!(encoder.vocabulary().index_of("red").is_some());
        assert!(encoder.vocabulary().index_of("blue").is_some());
        assert!(encoder.vocabulary().index_of("green").is_some());

        let red = encoder.embed_query("red");
        assert_eq!(red.len(), 1);
        assert!(red.values[0] > 0.0);

        let yellow = encoder.embed_query("yellow");
        assert!(yellow.is_empty());
    }

    #[test]
    fn embed_before_build_auto_initializes() {
        let mut encoder = SparseEncoder::default();
        assert!(!encoder.is_initialized());
        let embedded = encoder.embed_document("alpha beta alpha");
        assert!(encoder.is_initialized());
        assert!(!embedded.is_empty());
    }

    #[test]
    fn clear_resets_to_fresh() {
        let mut encoder = SparseEncoder::default();
        encoder.build_vocabulary(&["alpha beta"]);
        assert!(encoder.is_initialized());
        encoder.clear();
        assert!(!encoder.is_initialized());
        assert_eq!(encoder.vocabulary().len(), 0);
    }

    #[test]
    fn export_import_round_trips() {
        let mut encoder = SparseEncoder::default();
        encoder.build_vocabulary(&["red blue red", "blue green"]);
        let exported = encoder.export_state();

        let mut restored = SparseEncoder::new(SparseEncoderParams::default());
        restored.import_state(exported);

        assert!(restored.is_initialized());
        assert_eq!(restored.vocabulary().len(), encoder.vocabulary().len());
        assert_eq!(
            restored.vocabulary().index_of("red"),
            encoder.vocabulary().index_of("red")
        );
    }

    #[test]
    fn empty_corpus_is_legal() {
        let mut encoder: SparseEncoder = SparseEncoder::default();
        encoder.build_vocabulary::<&str>(&[]);
        assert!(encoder.is_initialized());
        assert_eq!(encoder.vocabulary().len(), 0);
        assert_eq!(encoder.vocabulary().avg_document_length(), 0.0);
    }

    #[test]
    fn max_df_ratio_drops_ubiquitous_terms() {
        let mut params = SparseEncoderParams::default();
        params.max_df_ratio = 0.5;
        let mut encoder = SparseEncoder::new(params);
        encoder.build_vocabulary(&["common alpha", "common beta", "common gamma"]);
        assert!(encoder.vocabulary().index_of("common").is_none());
        assert!(encoder.vocabulary().index_of("alpha").is_some());
    }
}
