//! Rank Fusion
//!
//! Pure function combining per-channel raw scores into one fused ranking.
//! Channel order within each document's score vector is preserved from the
//! order channels were queried, which matters for [`FusionStrategy::Weighted`].
//!
//! | Strategy | Formula |
//! |----------|---------|
//! | [`FusionStrategy::Rrf`] (default) | `Σ 1 / (k + rank_i + 1)` |
//! | [`FusionStrategy::Weighted`] | `Σ weight_i · raw_score_i` |
//! | [`FusionStrategy::Average`] (fallback) | `mean(raw_scores)` |

use crate::constants::RRF_DEFAULT_K;

/// Which rank-fusion formula to apply.
#[derive(Debug, Clone)]
pub enum FusionStrategy {
    /// Reciprocal Rank Fusion with constant `k`.
    Rrf {
        /// RRF constant (default 60)
        k: u32,
    },
    /// Weighted sum of raw per-channel scores.
    Weighted {
        /// Per-channel weight, indexed the same as the channel-order each
        /// document's score vector was built with. A missing entry for a
        /// channel falls back to `1 / n_channels`.
        weights: Vec<f32>,
    },
    /// Unweighted mean of raw per-channel scores. Used whenever a strategy
    /// name is unrecognized by a caller building a [`FusionStrategy`] from
    /// configuration.
    Average,
}

impl FusionStrategy {
    /// RRF with the default `k`.
    pub fn rrf_default() -> Self {
        FusionStrategy::Rrf { k: RRF_DEFAULT_K }
    }
}

impl Default for FusionStrategy {
    fn default() -> Self {
        FusionStrategy::Rrf { k: RRF_DEFAULT_K }
    }
}

/// One document's accumulated raw scores, in channel-query order. A channel
/// that did not return this document is simply absent from the vector (for
/// RRF, its rank is treated as "not present"; for weighted/average, it does
/// not contribute a term).
#[derive(Debug, Clone)]
pub struct ChannelScores {
    /// Raw score from each channel that returned this document, in the
    /// order channels were queried.
    pub raw_scores: Vec<f32>,
    /// 0-based rank of this document within each channel that returned it,
    /// parallel to `raw_scores`.
    pub ranks: Vec<usize>,
    /// Total number of channels queried for this request, including
    /// channels that did not return this document. Drives the uniform-weight
    /// fallback in [`FusionStrategy::Weighted`] — a document missing from
    /// half the queried channels is still only worth half the weight per
    /// channel it did hit, not full weight.
    pub total_channels: usize,
}

/// Fuse per-document channel scores into `(index, fused_score)` pairs,
/// sorted by descending fused score with ties broken by insertion order
/// (the order documents appear in `scores`).
pub fn fuse(scores: &[ChannelScores], strategy: &FusionStrategy) -> Vec<(usize, f64)> {
    let mut fused: Vec<(usize, f64)> = scores
        .iter()
        .enumerate()
        .map(|(idx, doc)| (idx, fuse_one(doc, strategy)))
        .collect();

    fused.sort_by(|a, b| match b.1.partial_cmp(&a.1) {
        Some(ord) => ord,
        None => std::cmp::Ordering::Equal,
    });
    fused
}

fn fuse_one(doc: &ChannelScores, strategy: &FusionStrategy) -> f64 {
    match strategy {
        FusionStrategy::Rrf { k } => doc
            .ranks
            .iter()
            .map(|rank| 1.0 / (*k as f64 + *rank as f64 + 1.0))
            .sum(),
        FusionStrategy::Weighted { weights } => {
            let n = doc.total_channels.max(1) as f64;
            let uniform = 1.0 / n;
            doc.raw_scores
                .iter()
                .enumerate()
                .map(|(i, score)| {
                    let weight = weights.get(i).copied().map(f64::from).unwrap_or(uniform);
                    weight * *score as f64
                })
                .sum()
        }
        FusionStrategy::Average => {
            if doc.raw_scores.is_empty() {
                0.0
            } else {
                doc.raw_scores.iter().map(|s| *s as f64).sum::<f64>() / doc.raw_scores.len() as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrf_combines_two_channel_ranks() {
        let scores = vec![
            ChannelScores {
                raw_scores: vec![0.9, 0.5],
                ranks: vec![0, 2],
                total_channels: 2,
            },
            ChannelScores {
                raw_scores: vec![0.8],
                ranks: vec![0],
                total_channels: 2,
            },
        ];
        let fused = fuse(&scores, &FusionStrategy::rrf_default());

        let doc0 = fused.iter().find(|(i, _)| *i == 0).unwrap().1;
        let doc1 = fused.iter().find(|(i, _)| *i == 1).unwrap().1;

        assert!((doc0 - (1.0 / 61.0 + 1.0 / 63.0)).abs() < 1e-9);
        assert!((doc1 - (1.0 / 61.0)).abs() < 1e-9);
        assert_eq!(fused[0].0, 0);
    }

    #[test]
    fn rrf_is_permutation_equivariant_on_ties() {
        let scores = vec![
            ChannelScores {
                raw_scores: vec![0.1],
                ranks: vec![3],
                total_channels: 1,
            },
            ChannelScores {
                raw_scores: vec![0.9],
                ranks: vec![3],
                total_channels: 1,
            },
        ];
        let fused = fuse(&scores, &FusionStrategy::rrf_default());
        assert_eq!(fused[0].1, fused[1].1);
    }

    #[test]
    fn weighted_with_uniform_weights_equals_average_up_to_constant() {
        let scores = vec![ChannelScores {
            raw_scores: vec![1.0, 3.0],
            ranks: vec![0, 1],
            total_channels: 2,
        }];
        let weighted = fuse(
            &scores,
            &FusionStrategy::Weighted {
                weights: vec![0.5, 0.5],
            },
        );
        let averaged = fuse(&scores, &FusionStrategy::Average);
        assert!((weighted[0].1 - averaged[0].1).abs() < 1e-9);
    }

    #[test]
    fn weighted_falls_back_to_uniform_for_missing_weight() {
        let scores = vec![ChannelScores {
            raw_scores: vec![2.0, 4.0],
            ranks: vec![0, 0],
            total_channels: 2,
        }];
        let fused = fuse(&scores, &FusionStrategy::Weighted { weights: vec![] });
        assert!((fused[0].1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_uniform_fallback_uses_total_channels_not_present_count() {
        // Only 1 of 2 queried channels returned this document: uniform
        // weight must still be 1/2, not 1/1.
        let scores = vec![ChannelScores {
            raw_scores: vec![0.8],
            ranks: vec![0],
            total_channels: 2,
        }];
        let fused = fuse(&scores, &FusionStrategy::Weighted { weights: vec![] });
        assert!((fused[0].1 - 0.4).abs() < 1e-9);
    }
}
