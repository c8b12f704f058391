//! Sparse encoder parameters

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    BM25_DEFAULT_B, BM25_DEFAULT_K1, BM25_DEFAULT_MAX_DF_RATIO, BM25_DEFAULT_MIN_DF,
};
use crate::tokenizer::TokenMode;

/// Tunable BM25 parameters plus the tokenization mode used to build the
/// vocabulary and embed text.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct SparseEncoderParams {
    /// Term frequency saturation
    #[validate(range(min = 0.0))]
    pub k1: f32,
    /// Document length normalization, in `[0, 1]`
    #[validate(range(min = 0.0, max = 1.0))]
    pub b: f32,
    /// Drop terms seen in fewer than this many documents
    pub min_df: usize,
    /// Drop terms seen in more than this fraction of the corpus
    #[validate(range(min = 0.0, max = 1.0))]
    pub max_df_ratio: f32,
    /// Use `1 + ln(tf)` instead of raw `tf`
    pub sublinear_tf: bool,
    /// Tokenization strategy applied to every document and query
    pub token_mode: TokenMode,
}

impl Default for SparseEncoderParams {
    fn default() -> Self {
        Self {
            k1: BM25_DEFAULT_K1,
            b: BM25_DEFAULT_B,
            min_df: BM25_DEFAULT_MIN_DF,
            max_df_ratio: BM25_DEFAULT_MAX_DF_RATIO,
            sublinear_tf: false,
            token_mode: TokenMode::Code,
        }
    }
}
