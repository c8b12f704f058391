//! Sparse Encoder
//!
//! BM25+ scoring over a vocabulary built from a document corpus.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`SparseEncoder`] | stateful encoder: `build_vocabulary`, `embed_document`, `embed_query`, `export_state`, `import_state`, `clear` |
//! | [`SparseEncoderParams`] | `k1`, `b`, `min_df`, `max_df_ratio`, `sublinear_tf`, `token_mode` |
//! | [`VocabularyState`] | the encoder's persistable memory |
//! | [`VocabularyStateExport`] | round-trip-lossless wire format for [`VocabularyState`] |

mod encoder;
mod params;
mod vocabulary;

pub use encoder::{validate_params, SparseEncoder};
pub use params::SparseEncoderParams;
pub use vocabulary::{VocabularyState, VocabularyStateExport};
