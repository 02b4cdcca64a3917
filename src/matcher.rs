//! Memory-weighted matching of each timestep against its recent history.
//!
//! For every timestep `i ≥ 1` the matcher scores each current community `A`
//! against every community `B` found `j = 1..=memory` timesteps back, solves
//! one assignment problem over all those candidates at once, and keeps the
//! assigned pairs whose score clears the threshold as backward links.
//!
//! # Score
//!
//! ```text
//! score(A, B) = J(A, B) · w[j-1]  +  Σ  J(A, C) · w[i - t(C) - 1]
//!                                   C ∈ chain(B), t(C) ≥ i - memory
//! ```
//!
//! where `J` is the Jaccard index and `chain(B)` follows `B`'s existing
//! backward links while they stay inside the memory window. Every chain member
//! visited this way is marked seen for the round: its evidence is already
//! folded into the score of the chain's most recent member, so it is not
//! offered again as an independent candidate. Hops with no overlap add nothing
//! but still mark the member seen.
//!
//! # Invariants
//! - A pair with no direct overlap scores 0 and never becomes a link (θ ≥ 0).
//! - Links are kept only when `score > θ` (strict).
//! - Each current node gets at most one link, in the round it is matched.
//! - Rounds run in timestep order; round `i` reads links of rounds `< i` only.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::assignment::{AssignmentSolver, CostMatrix, Hungarian};
use crate::community::{overlap, NodeRef, Snapshot};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::links::LinkMap;

/// Outcome of matching one timestep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundStats {
    /// Timestep that was matched.
    pub timestep: usize,
    /// Number of current communities (cost matrix rows).
    pub rows: usize,
    /// Number of candidate nodes across the memory window (cost matrix columns).
    pub candidates: usize,
    /// Pairs returned by the solver.
    pub assigned: usize,
    /// Pairs that cleared the threshold and became links.
    pub linked: usize,
}

/// Per-timestep matcher over a validated [`MatchConfig`].
#[derive(Clone, Debug)]
pub struct Matcher<S = Hungarian> {
    config: MatchConfig,
    solver: S,
}

impl Matcher<Hungarian> {
    /// Validate `config` and build a matcher using the built-in Hungarian solver.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        Self::with_solver(config, Hungarian)
    }
}

impl<S: AssignmentSolver> Matcher<S> {
    /// Validate `config` and build a matcher around a custom solver.
    pub fn with_solver(config: MatchConfig, solver: S) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config, solver })
    }

    /// The configuration this matcher was built with.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match every timestep after the first and return the link mapping.
    pub fn run<L, M>(&self, timeseries: &[Snapshot<L, M>]) -> LinkMap
    where
        M: Eq + Hash,
    {
        let mut links = LinkMap::new();
        for i in 1..timeseries.len() {
            let stats = self.match_round(timeseries, i, &mut links);
            tracing::debug!(
                timestep = stats.timestep,
                rows = stats.rows,
                candidates = stats.candidates,
                linked = stats.linked,
                "matched timestep"
            );
        }
        links
    }

    /// Match timestep `i` against its memory window, appending links to `links`.
    ///
    /// `links` must hold exactly the links of rounds `1..i`.
    pub fn match_round<L, M>(
        &self,
        timeseries: &[Snapshot<L, M>],
        i: usize,
        links: &mut LinkMap,
    ) -> RoundStats
    where
        M: Eq + Hash,
    {
        let mut stats = RoundStats {
            timestep: i,
            ..RoundStats::default()
        };
        let Some(base) = timeseries.get(i) else {
            return stats;
        };
        stats.rows = base.len();

        let (costs, candidates) = self.cost_matrix(timeseries, i, links);
        stats.candidates = candidates.len();
        if costs.is_empty() {
            tracing::trace!(timestep = i, "nothing to match");
            return stats;
        }

        let pairs = self.solver.solve(&costs);
        stats.assigned = pairs.len();
        for (k, l) in pairs {
            let score = -costs.get(k, l);
            if score > self.config.score_threshold
                && links.insert(NodeRef::new(i, k), candidates[l])
            {
                stats.linked += 1;
            }
        }
        stats
    }

    /// Build the combined cost matrix for timestep `i`.
    ///
    /// Returns the matrix (rows = current communities in slot order, columns =
    /// every candidate in the window, nearest timestep first) together with the
    /// node behind each column.
    pub fn cost_matrix<L, M>(
        &self,
        timeseries: &[Snapshot<L, M>],
        i: usize,
        links: &LinkMap,
    ) -> (CostMatrix, Vec<NodeRef>)
    where
        M: Eq + Hash,
    {
        let Some(base) = timeseries.get(i) else {
            return (CostMatrix::zeros(0, 0), Vec::new());
        };
        let mut seen: HashSet<NodeRef> = HashSet::new();
        let mut blocks = Vec::with_capacity(self.config.memory);
        let mut candidates = Vec::new();

        for j in 1..=self.config.memory {
            let Some(t) = i.checked_sub(j) else {
                break;
            };
            let past = &timeseries[t];
            let mut block = CostMatrix::zeros(base.len(), past.len());

            for (k, current) in base.iter().enumerate() {
                for (l, candidate) in past.iter().enumerate() {
                    let node = NodeRef::new(t, l);
                    if seen.contains(&node) {
                        continue;
                    }
                    let Some(direct) = overlap(&current.members, &candidate.members) else {
                        continue;
                    };
                    let score = direct * self.config.weight(j)
                        + self.chain_score(timeseries, i, node, &current.members, links, &mut seen);
                    block.set(k, l, -score);
                }
            }

            candidates.extend((0..past.len()).map(|l| NodeRef::new(t, l)));
            blocks.push(block);
        }

        let costs = CostMatrix::hstack(base.len(), &blocks)
            .unwrap_or_else(|| CostMatrix::zeros(base.len(), 0));
        (costs, candidates)
    }

    /// Weighted overlap of `members` with the chain behind `head`, inside the window.
    ///
    /// Marks every visited chain member as seen.
    fn chain_score<L, M>(
        &self,
        timeseries: &[Snapshot<L, M>],
        i: usize,
        head: NodeRef,
        members: &HashSet<M>,
        links: &LinkMap,
        seen: &mut HashSet<NodeRef>,
    ) -> f64
    where
        M: Eq + Hash,
    {
        let mut score = 0.0;
        let mut cursor = head;
        while let Some(prev) = links.get(&cursor) {
            if prev.timestep + self.config.memory < i {
                break;
            }
            let earlier = timeseries
                .get(prev.timestep)
                .and_then(|s| s.community(prev.slot));
            if let Some(earlier) = earlier {
                if let Some(j) = overlap(members, &earlier.members) {
                    score += j * self.config.weight(i - prev.timestep);
                }
            }
            seen.insert(prev);
            cursor = prev;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pairs: &[(&'static str, &[u32])]) -> Snapshot<&'static str, u32> {
        Snapshot::try_from_pairs(pairs.iter().map(|(l, m)| (*l, m.iter().copied()))).unwrap()
    }

    #[test]
    fn first_timestep_is_never_a_source() {
        let ts = vec![snap(&[("a", &[1, 2])])];
        let links = Matcher::new(MatchConfig::default()).unwrap().run(&ts);
        assert!(links.is_empty());
    }

    #[test]
    fn direct_match_above_threshold_links() {
        let ts = vec![snap(&[("a", &[1, 2, 3])]), snap(&[("b", &[1, 2, 3, 4])])];
        let links = Matcher::new(MatchConfig::default()).unwrap().run(&ts);
        assert_eq!(links.get(&NodeRef::new(1, 0)), Some(NodeRef::new(0, 0)));
    }

    #[test]
    fn score_equal_to_threshold_is_rejected() {
        // J = 1/2 at distance 1 with weight 1.0 → score 0.5
        let ts = vec![snap(&[("a", &[1, 2])]), snap(&[("b", &[2, 3, 1, 4])])];
        let at = MatchConfig::default().with_threshold(0.5);
        assert!(Matcher::new(at).unwrap().run(&ts).is_empty());
        let below = MatchConfig::default().with_threshold(0.49);
        assert_eq!(Matcher::new(below).unwrap().run(&ts).len(), 1);
    }

    #[test]
    fn chain_members_fold_into_latest_score() {
        // t0: x{1,2,3}; t1: x{1,2,3} (links to t0); t2: y{1,2,3}
        let ts = vec![
            snap(&[("x", &[1, 2, 3])]),
            snap(&[("x", &[1, 2, 3])]),
            snap(&[("y", &[1, 2, 3])]),
        ];
        let m = Matcher::new(MatchConfig::default()).unwrap();
        let mut links = LinkMap::new();
        m.match_round(&ts, 1, &mut links);
        let (costs, candidates) = m.cost_matrix(&ts, 2, &links);
        assert_eq!(candidates, vec![NodeRef::new(1, 0), NodeRef::new(0, 0)]);
        // 1.0·1 + 1.0·0.5 on the chain head, 0 on the absorbed member
        assert!((costs.get(0, 0) + 1.5).abs() < 1e-12);
        assert_eq!(costs.get(0, 1), 0.0);
    }

    #[test]
    fn chain_stops_at_memory_edge() {
        let ts = vec![
            snap(&[("x", &[1, 2])]),
            snap(&[("x", &[1, 2])]),
            snap(&[("x", &[1, 2])]),
            snap(&[("x", &[1, 2])]),
        ];
        let m = Matcher::new(MatchConfig::default()).unwrap();
        let mut links = LinkMap::new();
        m.match_round(&ts, 1, &mut links);
        m.match_round(&ts, 2, &mut links);
        // window for i = 3 is [1, 3): the hop to t0 must not count
        let (costs, _) = m.cost_matrix(&ts, 3, &links);
        assert!((costs.get(0, 0) + 1.5).abs() < 1e-12, "{}", costs.get(0, 0));
    }

    #[test]
    fn chain_walk_continues_past_zero_overlap_member() {
        // chain t2 → t1 → t0; the current community misses t1 but overlaps t0
        let ts = vec![
            snap(&[("x", &[1, 2, 5, 6])]),
            snap(&[("x", &[5, 6, 7, 8])]),
            snap(&[("x", &[7, 8, 1, 2])]),
            snap(&[("y", &[1, 2, 9])]),
        ];
        let m = Matcher::new(MatchConfig::with_memory(3)).unwrap();
        let mut links = LinkMap::new();
        m.match_round(&ts, 1, &mut links);
        m.match_round(&ts, 2, &mut links);
        assert_eq!(links.get(&NodeRef::new(2, 0)), Some(NodeRef::new(1, 0)));
        assert_eq!(links.get(&NodeRef::new(1, 0)), Some(NodeRef::new(0, 0)));

        let (costs, candidates) = m.cost_matrix(&ts, 3, &links);
        assert_eq!(
            candidates,
            vec![NodeRef::new(2, 0), NodeRef::new(1, 0), NodeRef::new(0, 0)]
        );
        // 2/5 · 1 on the head, nothing from t1, 2/5 · 1/3 from t0
        let expected = 0.4 + 0.4 / 3.0;
        assert!((costs.get(0, 0) + expected).abs() < 1e-12, "{}", costs.get(0, 0));
        assert_eq!(costs.get(0, 1), 0.0);
        // t0 overlaps directly but was absorbed into the chain head
        assert_eq!(costs.get(0, 2), 0.0);
    }

    #[test]
    fn empty_current_timestep_produces_no_links() {
        let ts = vec![snap(&[("a", &[1])]), snap(&[])];
        let m = Matcher::new(MatchConfig::default()).unwrap();
        let mut links = LinkMap::new();
        let stats = m.match_round(&ts, 1, &mut links);
        assert_eq!(stats.rows, 0);
        assert_eq!(stats.linked, 0);
        assert!(links.is_empty());
    }

    #[test]
    fn empty_history_produces_no_links() {
        let ts = vec![snap(&[]), snap(&[("a", &[1])])];
        let links = Matcher::new(MatchConfig::default()).unwrap().run(&ts);
        assert!(links.is_empty());
    }

    #[test]
    fn invalid_config_fails_before_matching() {
        let bad = MatchConfig::with_memory(2).with_weights(vec![1.0]);
        assert!(Matcher::new(bad).is_err());
    }

    #[test]
    fn custom_solver_is_used() {
        /// Assigns nothing, so no link can ever be made.
        struct Refuse;
        impl AssignmentSolver for Refuse {
            fn solve(&self, _: &CostMatrix) -> Vec<(usize, usize)> {
                Vec::new()
            }
        }
        let ts = vec![snap(&[("a", &[1])]), snap(&[("a", &[1])])];
        let m = Matcher::with_solver(MatchConfig::default(), Refuse).unwrap();
        assert!(m.run(&ts).is_empty());
    }
}
