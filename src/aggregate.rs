//! Collapse backward link chains into disjoint groups of nodes.
//!
//! Every node has at most one outgoing link and links strictly decrease the
//! timestep, so following links from any node ends at a unique root (a node
//! with no outgoing link). A temporal community is the set of all nodes that
//! end at the same root.
//!
//! The walk is iterative, and each processed source remembers its root. A
//! later walk that reaches an already-processed source stops there in O(1)
//! instead of re-walking the rest of the chain.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::community::NodeRef;
use crate::links::LinkMap;

/// One group of nodes sharing a chain root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    /// The node every member's chain ends at (earliest member).
    pub root: NodeRef,
    /// All members, root included.
    pub nodes: HashSet<NodeRef>,
}

/// Partition every node named by `links` (as source or target) into chains.
///
/// Chains are returned in the order their root was first reached, which is
/// deterministic for a given link insertion order.
pub fn aggregate(links: &LinkMap) -> Vec<Chain> {
    let mut chains: Vec<Chain> = Vec::new();
    let mut by_root: HashMap<NodeRef, usize> = HashMap::new();
    let mut resolved: HashMap<NodeRef, NodeRef> = HashMap::new();

    for (source, target) in links.iter() {
        let mut path = vec![source, target];
        let mut tail = target;
        let root = loop {
            if let Some(&root) = resolved.get(&tail) {
                path.push(root);
                break root;
            }
            match links.get(&tail) {
                Some(next) => {
                    path.push(next);
                    tail = next;
                }
                None => break tail,
            }
        };

        let idx = *by_root.entry(root).or_insert_with(|| {
            chains.push(Chain {
                root,
                nodes: HashSet::new(),
            });
            chains.len() - 1
        });
        chains[idx].nodes.extend(path);
        resolved.insert(source, root);
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(t: usize, s: usize) -> NodeRef {
        NodeRef::new(t, s)
    }

    fn set(nodes: &[NodeRef]) -> HashSet<NodeRef> {
        nodes.iter().copied().collect()
    }

    #[test]
    fn no_links_no_chains() {
        assert!(aggregate(&LinkMap::new()).is_empty());
    }

    #[test]
    fn straight_chain_collapses_to_one_group() {
        let mut links = LinkMap::new();
        links.insert(n(1, 0), n(0, 0));
        links.insert(n(2, 0), n(1, 0));
        links.insert(n(3, 0), n(2, 0));
        let chains = aggregate(&links);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].root, n(0, 0));
        assert_eq!(chains[0].nodes, set(&[n(0, 0), n(1, 0), n(2, 0), n(3, 0)]));
    }

    #[test]
    fn gaps_and_branches_share_a_root() {
        let mut links = LinkMap::new();
        links.insert(n(1, 0), n(0, 0));
        // skips timestep 1
        links.insert(n(2, 1), n(0, 0));
        // branches off an intermediate node
        links.insert(n(3, 0), n(1, 0));
        links.insert(n(2, 0), n(1, 1));
        let chains = aggregate(&links);
        assert_eq!(chains.len(), 2);
        assert_eq!(
            chains[0].nodes,
            set(&[n(0, 0), n(1, 0), n(2, 1), n(3, 0)])
        );
        assert_eq!(chains[1].root, n(1, 1));
        assert_eq!(chains[1].nodes, set(&[n(1, 1), n(2, 0)]));
    }

    #[test]
    fn chains_are_pairwise_disjoint_and_cover_every_node() {
        let mut links = LinkMap::new();
        for t in 1..20 {
            links.insert(n(t, 0), n(t - 1, 0));
            if t % 3 == 0 {
                links.insert(n(t, 1), n(t - 2, 1));
            }
        }
        let chains = aggregate(&links);
        let mut all: HashSet<NodeRef> = HashSet::new();
        let mut total = 0;
        for c in &chains {
            total += c.nodes.len();
            all.extend(c.nodes.iter().copied());
        }
        assert_eq!(total, all.len(), "a node appears in two chains");
        for (s, t) in links.iter() {
            assert!(all.contains(&s) && all.contains(&t));
        }
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let mut links = LinkMap::new();
        for t in 1..50_000 {
            links.insert(n(t, 0), n(t - 1, 0));
        }
        let chains = aggregate(&links);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].nodes.len(), 50_000);
    }
}
