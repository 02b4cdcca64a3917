//! Per-timestep community sets and the node addressing used across the crate.
//!
//! A timeseries is an ordered slice of [`Snapshot`]s. Each snapshot maps an
//! opaque community label to the set of member identifiers detected together
//! at that timestep.
//!
//! Two ways of naming a node coexist:
//!
//! - [`Node<L>`]: `(timestep, label)`, the public form that carries the label.
//! - [`NodeRef`]: `(timestep, slot)`, an arena index into the snapshot's
//!   insertion-ordered community list. Matching and aggregation run on
//!   `NodeRef`s only and never clone labels in the inner loops.
//!
//! # Invariants
//! - Labels are unique within a snapshot; a duplicate insert is rejected.
//! - Slot order is insertion order and never changes once a community is stored.
//! - Members are a set; duplicates collapse on insert.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::error::{ConfigIssue, MatchError};

/// Index of a timestep within the timeseries.
pub type Timestep = usize;

// ─── Node addressing ─────────────────────────────────────────────────────────

/// A community at a particular timestep, addressed by its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<L> {
    /// Position of the snapshot in the timeseries.
    pub timestep: Timestep,
    /// Community label, unique within that snapshot.
    pub label: L,
}

impl<L> Node<L> {
    /// Pair a timestep with a label.
    pub fn new(timestep: Timestep, label: L) -> Self {
        Self { timestep, label }
    }
}

/// A community at a particular timestep, addressed by its slot in the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    /// Position of the snapshot in the timeseries.
    pub timestep: Timestep,
    /// Insertion position of the community within its snapshot.
    pub slot: usize,
}

impl NodeRef {
    /// Pair a timestep with a slot.
    pub const fn new(timestep: Timestep, slot: usize) -> Self {
        Self { timestep, slot }
    }
}

// ─── Community ───────────────────────────────────────────────────────────────

/// A labelled set of members detected as one group at one timestep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Community<L, M: Eq + Hash> {
    /// Label, unique within the owning snapshot.
    pub label: L,
    /// Member identifiers.
    pub members: HashSet<M>,
}

impl<L, M: Eq + Hash> Community<L, M> {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the community has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// All communities detected at one timestep, in insertion order.
///
/// Insertion order fixes the row and column order of the cost matrices built
/// by the matcher, so a snapshot built the same way always matches the same way.
#[derive(Clone, Debug)]
pub struct Snapshot<L, M: Eq + Hash> {
    communities: Vec<Community<L, M>>,
    index: HashMap<L, usize>,
}

impl<L, M> Snapshot<L, M>
where
    L: Clone + Eq + Hash,
    M: Eq + Hash,
{
    /// Construct an empty snapshot.
    pub fn new() -> Self {
        Self {
            communities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a snapshot from `(label, members)` pairs, rejecting duplicate labels.
    pub fn try_from_pairs<I, S>(pairs: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (L, S)>,
        S: IntoIterator<Item = M>,
    {
        let mut snapshot = Self::new();
        for (label, members) in pairs {
            snapshot.insert(label, members)?;
        }
        Ok(snapshot)
    }

    /// Store a new community and return its slot.
    ///
    /// Fails with [`ConfigIssue::DuplicateLabel`] if the label is already present.
    pub fn insert<S>(&mut self, label: L, members: S) -> Result<usize, MatchError>
    where
        S: IntoIterator<Item = M>,
    {
        if let Some(&slot) = self.index.get(&label) {
            return Err(ConfigIssue::DuplicateLabel { slot }.into());
        }
        let slot = self.communities.len();
        self.index.insert(label.clone(), slot);
        self.communities.push(Community {
            label,
            members: members.into_iter().collect(),
        });
        Ok(slot)
    }

    /// Add one member to the community `label`, creating the community if needed.
    ///
    /// Returns the community's slot.
    pub fn add_member(&mut self, label: L, member: M) -> usize {
        if let Some(&slot) = self.index.get(&label) {
            self.communities[slot].members.insert(member);
            return slot;
        }
        let slot = self.communities.len();
        self.index.insert(label.clone(), slot);
        let mut members = HashSet::new();
        members.insert(member);
        self.communities.push(Community { label, members });
        slot
    }

    /// Members of the community with this label.
    pub fn get(&self, label: &L) -> Option<&HashSet<M>> {
        self.slot_of(label).map(|slot| &self.communities[slot].members)
    }

    /// Slot of the community with this label.
    pub fn slot_of(&self, label: &L) -> Option<usize> {
        self.index.get(label).copied()
    }
}

impl<L, M: Eq + Hash> Snapshot<L, M> {
    /// Community stored at `slot`.
    pub fn community(&self, slot: usize) -> Option<&Community<L, M>> {
        self.communities.get(slot)
    }

    /// Label stored at `slot`.
    pub fn label(&self, slot: usize) -> Option<&L> {
        self.communities.get(slot).map(|c| &c.label)
    }

    /// Communities in slot order.
    pub fn iter(&self) -> core::slice::Iter<'_, Community<L, M>> {
        self.communities.iter()
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// True if no community was detected at this timestep.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }
}

impl<L, M> Default for Snapshot<L, M>
where
    L: Clone + Eq + Hash,
    M: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, L, M: Eq + Hash> IntoIterator for &'a Snapshot<L, M> {
    type Item = &'a Community<L, M>;
    type IntoIter = core::slice::Iter<'a, Community<L, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Similarity ──────────────────────────────────────────────────────────────

/// Jaccard index `|A ∩ B| / |A ∪ B|`, or `None` when the sets share no member.
pub fn overlap<M: Eq + Hash>(a: &HashSet<M>, b: &HashSet<M>) -> Option<f64> {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|m| large.contains(*m)).count();
    if shared == 0 {
        return None;
    }
    let union = a.len() + b.len() - shared;
    Some(shared as f64 / union as f64)
}

/// Jaccard index of two member sets. Two empty sets score 0.
pub fn jaccard<M: Eq + Hash>(a: &HashSet<M>, b: &HashSet<M>) -> f64 {
    overlap(a, b).unwrap_or(0.0)
}
