//! Matching parameters: memory depth, memory kernel, score threshold.
//!
//! The memory kernel assigns one weight per lookback distance. Distance 1 is
//! the immediately preceding timestep. The default kernel is the harmonic
//! decay `1/d`, so older evidence counts for less.

use alloc::vec::Vec;

use crate::error::{ConfigIssue, MatchError};

/// Default number of timesteps to look back.
pub const DEFAULT_MEMORY: usize = 2;

/// Default minimum memory-weighted score a link must exceed.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.1;

/// Harmonic memory kernel `[1/1, 1/2, …, 1/memory]`.
pub fn harmonic_weights(memory: usize) -> Vec<f64> {
    (1..=memory).map(|d| 1.0 / d as f64).collect()
}

/// Configuration for [`crate::matcher::Matcher`] and the driver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    /// Number of past timesteps compared against the current one. Default: 2.
    pub memory: usize,

    /// One weight per lookback distance; `weights[d - 1]` scales evidence
    /// found `d` timesteps back. Default: harmonic `1/d`.
    pub weights: Vec<f64>,

    /// A link is kept only if its score is strictly greater than this. Default: 0.1.
    pub score_threshold: f64,

    /// Return nodes that no link touches as singleton temporal communities.
    /// Default: true.
    pub keep_singletons: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::with_memory(DEFAULT_MEMORY)
    }
}

impl MatchConfig {
    /// Config with the given memory depth, harmonic weights and default threshold.
    pub fn with_memory(memory: usize) -> Self {
        Self {
            memory,
            weights: harmonic_weights(memory),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            keep_singletons: true,
        }
    }

    /// Replace the memory kernel.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the score threshold.
    pub fn with_threshold(mut self, score_threshold: f64) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    /// Choose whether unlinked nodes are reported as singletons.
    pub fn with_singletons(mut self, keep_singletons: bool) -> Self {
        self.keep_singletons = keep_singletons;
        self
    }

    /// Weight applied to evidence found `distance` timesteps back (1-based).
    ///
    /// Only meaningful for `1 ≤ distance ≤ memory` on a validated config.
    #[inline]
    pub(crate) fn weight(&self, distance: usize) -> f64 {
        self.weights[distance - 1]
    }

    /// Check the configuration before any matching starts.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.memory == 0 {
            return Err(ConfigIssue::ZeroMemory.into());
        }
        if self.weights.len() != self.memory {
            return Err(ConfigIssue::WeightCountMismatch {
                expected: self.memory,
                found: self.weights.len(),
            }
            .into());
        }
        if let Some(index) = self.weights.iter().position(|w| !w.is_finite()) {
            return Err(ConfigIssue::NonFiniteWeight { index }.into());
        }
        if !self.score_threshold.is_finite() || self.score_threshold < 0.0 {
            return Err(ConfigIssue::InvalidThreshold.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_memory_two_harmonic() {
        let c = MatchConfig::default();
        assert_eq!(c.memory, 2);
        assert_eq!(c.weights, vec![1.0, 0.5]);
        assert_eq!(c.score_threshold, 0.1);
        assert!(c.keep_singletons);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn harmonic_kernel_decays() {
        let w = harmonic_weights(4);
        assert_eq!(w.len(), 4);
        assert!((w[3] - 0.25).abs() < 1e-12);
        assert!(w.windows(2).all(|p| p[0] > p[1]));
    }

    #[test]
    fn zero_memory_is_rejected() {
        let c = MatchConfig::with_memory(0);
        assert_eq!(c.validate(), Err(MatchError::from(ConfigIssue::ZeroMemory)));
    }

    #[test]
    fn weight_length_must_match_memory() {
        let c = MatchConfig::with_memory(3).with_weights(vec![1.0, 0.5]);
        assert_eq!(
            c.validate(),
            Err(MatchError::from(ConfigIssue::WeightCountMismatch { expected: 3, found: 2 }))
        );
    }

    #[test]
    fn nan_weight_is_rejected() {
        let c = MatchConfig::default().with_weights(vec![1.0, f64::NAN]);
        assert_eq!(
            c.validate(),
            Err(MatchError::from(ConfigIssue::NonFiniteWeight { index: 1 }))
        );
    }

    #[test]
    fn negative_or_nan_threshold_is_rejected() {
        for t in [-0.1, f64::NAN, f64::INFINITY] {
            let c = MatchConfig::default().with_threshold(t);
            assert_eq!(c.validate(), Err(MatchError::from(ConfigIssue::InvalidThreshold)));
        }
        assert_eq!(MatchConfig::default().with_threshold(0.0).validate(), Ok(()));
    }
}
