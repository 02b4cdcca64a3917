//! Summary statistics over a set of temporal communities.
//!
//! A pure consumer of the driver's output: how many temporal communities were
//! found, how long the longest one lasts, and how their lengths are
//! distributed. The histogram uses equal-width bins over `[min, max]` with the
//! last bin closed, so every length falls into exactly one bin.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use crate::driver::TemporalCommunity;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// One histogram bin covering `[lower, upper)` (the last bin is `[lower, upper]`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Number of lengths in the bin.
    pub count: usize,
}

/// Equal-width histogram of community lengths.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthHistogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

impl LengthHistogram {
    /// Bin `lengths` into `bins` equal-width buckets.
    ///
    /// Empty input or `bins == 0` gives an empty histogram. When every length
    /// is the same, the range is widened to `[v - 0.5, v + 0.5]`.
    pub fn new(lengths: &[usize], bins: usize) -> Self {
        let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
            return Self::default();
        };
        if bins == 0 {
            return Self::default();
        }
        let (lo, hi) = if min == max {
            (min as f64 - 0.5, max as f64 + 0.5)
        } else {
            (min as f64, max as f64)
        };
        let width = (hi - lo) / bins as f64;
        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|b| HistogramBin {
                lower: lo + width * b as f64,
                upper: if b + 1 == bins { hi } else { lo + width * (b + 1) as f64 },
                count: 0,
            })
            .collect();
        for &len in lengths {
            let b = (((len as f64 - lo) / width) as usize).min(bins - 1);
            out[b].count += 1;
        }
        Self { bins: out }
    }

    /// Total number of binned lengths.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Headline numbers for a matching run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of temporal communities.
    pub count: usize,
    /// Node count of the longest temporal community (0 if none).
    pub longest: usize,
    /// Distribution of node counts.
    pub histogram: LengthHistogram,
}

impl Summary {
    /// Summarise `communities` with a `bins`-bucket length histogram.
    pub fn from_communities<L: Eq + Hash>(communities: &[TemporalCommunity<L>], bins: usize) -> Self {
        let lengths: Vec<usize> = communities.iter().map(TemporalCommunity::len).collect();
        Self {
            count: lengths.len(),
            longest: lengths.iter().copied().max().unwrap_or(0),
            histogram: LengthHistogram::new(&lengths, bins),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} temporal communities", self.count)?;
        write!(f, "Longest temporal community lasts {} timesteps", self.longest)
    }
}
