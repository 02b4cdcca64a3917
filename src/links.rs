//! Append-only store of backward links between nodes.
//!
//! A link `source → target` records that `source` continues the temporal
//! identity of `target`. Each source has at most one link, set the first time
//! the source is matched as a current community and never revised afterwards.
//! Targets always lie strictly earlier in time than their source.
//!
//! Iteration follows insertion order, which is timestep order when the map is
//! filled by the matcher.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::community::{Node, NodeRef, Snapshot};

/// Backward link mapping, keyed by source node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkMap {
    targets: HashMap<NodeRef, NodeRef>,
    order: Vec<NodeRef>,
}

impl LinkMap {
    /// Empty link map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source → target`.
    ///
    /// Returns `false` and leaves the map untouched if `source` already has a
    /// link or if `target` is not strictly earlier than `source`.
    pub fn insert(&mut self, source: NodeRef, target: NodeRef) -> bool {
        if target.timestep >= source.timestep || self.targets.contains_key(&source) {
            return false;
        }
        self.targets.insert(source, target);
        self.order.push(source);
        true
    }

    /// Target of the link leaving `source`, if any.
    #[inline]
    pub fn get(&self, source: &NodeRef) -> Option<NodeRef> {
        self.targets.get(source).copied()
    }

    /// True if `source` already has a link.
    pub fn contains(&self, source: &NodeRef) -> bool {
        self.targets.contains_key(source)
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no link has been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(source, target)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, NodeRef)> + '_ {
        self.order.iter().map(move |s| (*s, self.targets[s]))
    }

    /// Resolve every link to label form against the timeseries it was built from.
    ///
    /// Links whose endpoints do not exist in `timeseries` are skipped.
    pub fn labelled<L, M>(&self, timeseries: &[Snapshot<L, M>]) -> Vec<(Node<L>, Node<L>)>
    where
        L: Clone,
        M: Eq + Hash,
    {
        self.iter()
            .filter_map(|(s, t)| Some((resolve(timeseries, s)?, resolve(timeseries, t)?)))
            .collect()
    }
}

/// Label form of a node reference, if it exists in `timeseries`.
pub fn resolve<L, M>(timeseries: &[Snapshot<L, M>], node: NodeRef) -> Option<Node<L>>
where
    L: Clone,
    M: Eq + Hash,
{
    let label = timeseries.get(node.timestep)?.label(node.slot)?;
    Some(Node::new(node.timestep, label.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(t: usize, s: usize) -> NodeRef {
        NodeRef::new(t, s)
    }

    #[test]
    fn link_is_set_once() {
        let mut links = LinkMap::new();
        assert!(links.insert(n(2, 0), n(1, 0)));
        assert!(!links.insert(n(2, 0), n(0, 1)));
        assert_eq!(links.get(&n(2, 0)), Some(n(1, 0)));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn forward_and_same_timestep_links_are_refused() {
        let mut links = LinkMap::new();
        assert!(!links.insert(n(1, 0), n(1, 1)));
        assert!(!links.insert(n(1, 0), n(2, 0)));
        assert!(links.is_empty());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut links = LinkMap::new();
        links.insert(n(1, 2), n(0, 0));
        links.insert(n(1, 0), n(0, 1));
        links.insert(n(3, 1), n(1, 0));
        let pairs: Vec<_> = links.iter().collect();
        assert_eq!(
            pairs,
            vec![(n(1, 2), n(0, 0)), (n(1, 0), n(0, 1)), (n(3, 1), n(1, 0))]
        );
    }

    #[test]
    fn labelled_resolves_slots() {
        let ts = vec![
            Snapshot::try_from_pairs([("orange", vec![1u32]), ("green", vec![2])]).unwrap(),
            Snapshot::try_from_pairs([("green", vec![2u32])]).unwrap(),
        ];
        let mut links = LinkMap::new();
        links.insert(n(1, 0), n(0, 1));
        assert_eq!(
            links.labelled(&ts),
            vec![(Node::new(1, "green"), Node::new(0, "green"))]
        );
        assert_eq!(resolve(&ts, n(0, 5)), None);
    }
}
