//! End-to-end entry point: timeseries in, temporal communities out.
//!
//! ```text
//! &[Snapshot] ──Matcher::run──► LinkMap ──aggregate──► Vec<Chain> ──labels──► Vec<TemporalCommunity>
//! ```
//!
//! The driver adds no recovery logic. A configuration error from the matcher
//! is returned unchanged, and nothing is produced.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::aggregate::{aggregate, Chain};
use crate::assignment::AssignmentSolver;
use crate::community::{Node, NodeRef, Snapshot, Timestep};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::links::resolve;
use crate::matcher::Matcher;

/// A persistent community: every node connected through a chain of links.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "L: serde::Serialize + Eq + Hash",
        deserialize = "L: serde::Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct TemporalCommunity<L: Eq + Hash> {
    nodes: HashSet<Node<L>>,
}

impl<L: Eq + Hash> TemporalCommunity<L> {
    /// Wrap a set of nodes.
    pub fn new(nodes: HashSet<Node<L>>) -> Self {
        Self { nodes }
    }

    /// Number of nodes (timestep, label) in the community.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for communities produced by the driver.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if the node belongs to this community.
    pub fn contains(&self, node: &Node<L>) -> bool {
        self.nodes.contains(node)
    }

    /// Earliest timestep covered.
    pub fn first_timestep(&self) -> Option<Timestep> {
        self.nodes.iter().map(|n| n.timestep).min()
    }

    /// Latest timestep covered.
    pub fn last_timestep(&self) -> Option<Timestep> {
        self.nodes.iter().map(|n| n.timestep).max()
    }

    /// Member nodes in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<L>> {
        self.nodes.iter()
    }

    /// The underlying node set.
    pub fn nodes(&self) -> &HashSet<Node<L>> {
        &self.nodes
    }

    /// Consume into the underlying node set.
    pub fn into_nodes(self) -> HashSet<Node<L>> {
        self.nodes
    }
}

/// Match `timeseries` with the built-in solver and group the links.
///
/// Fails only if `config` is invalid.
pub fn temporal_communities<L, M>(
    timeseries: &[Snapshot<L, M>],
    config: &MatchConfig,
) -> Result<Vec<TemporalCommunity<L>>, MatchError>
where
    L: Clone + Eq + Hash,
    M: Eq + Hash,
{
    let matcher = Matcher::new(config.clone())?;
    Ok(assemble(&matcher, timeseries))
}

/// Same as [`temporal_communities`] with a caller-supplied assignment solver.
pub fn temporal_communities_with<L, M, S>(
    timeseries: &[Snapshot<L, M>],
    config: &MatchConfig,
    solver: S,
) -> Result<Vec<TemporalCommunity<L>>, MatchError>
where
    L: Clone + Eq + Hash,
    M: Eq + Hash,
    S: AssignmentSolver,
{
    let matcher = Matcher::with_solver(config.clone(), solver)?;
    Ok(assemble(&matcher, timeseries))
}

fn assemble<L, M, S>(matcher: &Matcher<S>, timeseries: &[Snapshot<L, M>]) -> Vec<TemporalCommunity<L>>
where
    L: Clone + Eq + Hash,
    M: Eq + Hash,
    S: AssignmentSolver,
{
    let links = matcher.run(timeseries);
    let mut chains = aggregate(&links);
    let linked = chains.len();

    if matcher.config().keep_singletons {
        let covered: HashSet<NodeRef> = chains
            .iter()
            .flat_map(|c| c.nodes.iter().copied())
            .collect();
        for (t, snapshot) in timeseries.iter().enumerate() {
            for slot in 0..snapshot.len() {
                let node = NodeRef::new(t, slot);
                if !covered.contains(&node) {
                    let mut nodes = HashSet::new();
                    nodes.insert(node);
                    chains.push(Chain { root: node, nodes });
                }
            }
        }
    }

    tracing::debug!(
        links = links.len(),
        linked_communities = linked,
        singletons = chains.len() - linked,
        "aggregated temporal communities"
    );

    chains
        .into_iter()
        .map(|chain| {
            TemporalCommunity::new(
                chain
                    .nodes
                    .into_iter()
                    .filter_map(|n| resolve(timeseries, n))
                    .collect(),
            )
        })
        .collect()
}
