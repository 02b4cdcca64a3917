//! Error taxonomy for the matching core.
//!
//! Every failure the core can produce is a malformed-input failure detected
//! before the first round is matched, so the public surface exposes a single
//! kind, [`MatchError::InvalidConfiguration`], carrying a [`ConfigIssue`]
//! that names what was wrong.
//!
//! Absence of a backward link is not an error anywhere in this crate: it is
//! the terminal-chain signal and is handled as `Option::None`.

use thiserror::Error;

/// Detail attached to [`MatchError::InvalidConfiguration`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// Memory depth must look back at least one timestep.
    #[error("memory depth must be at least 1")]
    ZeroMemory,

    /// The weight sequence must carry one weight per lookback distance.
    #[error("expected {expected} memory weights, found {found}")]
    WeightCountMismatch {
        /// Configured memory depth.
        expected: usize,
        /// Length of the supplied weight sequence.
        found: usize,
    },

    /// A memory weight is NaN or infinite.
    #[error("memory weight at distance {} is not finite", .index + 1)]
    NonFiniteWeight {
        /// Zero-based index into the weight sequence.
        index: usize,
    },

    /// The score threshold is NaN, infinite or negative.
    #[error("score threshold must be finite and non-negative")]
    InvalidThreshold,

    /// A community label was inserted twice into the same snapshot.
    #[error("duplicate community label (already stored at slot {slot})")]
    DuplicateLabel {
        /// Slot of the community that already owns the label.
        slot: usize,
    },
}

/// Error returned by the matching core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Input or parameters are malformed; nothing was matched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}
