//! # temporal-communities
//!
//! Link community detections computed independently at each timestep of a
//! timeseries into *temporal communities*: groups of same-identity
//! communities that persist, merge, split, or re-emerge across time.
//!
//! ---
//!
//! ## How a link is chosen
//!
//! Each community observed *now* is compared with every community observed in
//! the last `memory` timesteps. The match strength is the Jaccard index of the
//! two member sets, scaled by a memory weight that shrinks with distance
//! (harmonic `1/d` by default). If a candidate already belongs to an assembled
//! chain, the overlap with its earlier chain members inside the window is
//! added to its score, and those members are not offered separately.
//!
//! All candidates of a round go into one cost matrix, and a minimum-cost
//! assignment (Hungarian method) pairs current communities with at most one
//! candidate each. Pairs scoring strictly above the threshold become backward
//! links.
//!
//! Following the links backwards yields the temporal communities.
//!
//! ## The pipeline
//!
//! ```text
//! &[Snapshot] → Matcher (cost matrices → assignment → threshold) → LinkMap
//!                                                                     ↓
//!                         Vec<TemporalCommunity> ← labels ← aggregate (chain roots)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`community`] | [`Snapshot`], [`Node`], [`NodeRef`] | Per-timestep community sets, Jaccard overlap |
//! | [`config`] | [`MatchConfig`] | Memory depth, memory kernel, threshold |
//! | [`assignment`] | [`AssignmentSolver`], [`Hungarian`], [`CostMatrix`] | Rectangular minimum-cost assignment |
//! | [`links`] | [`LinkMap`] | Append-only backward link store |
//! | [`matcher`] | [`Matcher`] | Per-timestep scoring and link selection |
//! | [`aggregate`] | [`aggregate::Chain`] | Chain collapsing with memoised roots |
//! | [`driver`] | [`TemporalCommunity`] | End-to-end entry point |
//! | [`report`] | [`report::Summary`] | Count, longest, length histogram |
//! | [`loader`] | [`loader::TagInterner`] | Text membership records → timeseries (requires `std`) |
//!
//! ## Example
//!
//! ```rust
//! use temporal_communities::{temporal_communities, MatchConfig, Node, Snapshot};
//!
//! let timeseries = vec![
//!     Snapshot::try_from_pairs([("orange", vec![1, 2, 3]), ("green", vec![7, 8, 9])]).unwrap(),
//!     Snapshot::try_from_pairs([("green", vec![7, 8])]).unwrap(),
//!     Snapshot::try_from_pairs([("orange", vec![1, 2, 3]), ("green", vec![8, 9])]).unwrap(),
//! ];
//! let found = temporal_communities(&timeseries, &MatchConfig::default()).unwrap();
//! let orange = found.iter().find(|c| c.contains(&Node::new(0, "orange"))).unwrap();
//! assert!(orange.contains(&Node::new(2, "orange")));
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` + `alloc` by default. Enable `std` for the
//! file loader, `serde` for serialisation of nodes, configs and reports, and
//! `python-ffi` for the PyO3 extension module.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod aggregate;
pub mod assignment;
pub mod community;
pub mod config;
pub mod driver;
pub mod error;
pub mod links;
pub mod matcher;
pub mod report;

#[cfg(feature = "std")]
pub mod loader;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use assignment::{AssignmentSolver, CostMatrix, Hungarian};
pub use community::{jaccard, Community, Node, NodeRef, Snapshot, Timestep};
pub use config::{harmonic_weights, MatchConfig};
pub use driver::{temporal_communities, temporal_communities_with, TemporalCommunity};
pub use error::{ConfigIssue, MatchError};
pub use links::LinkMap;
pub use matcher::Matcher;
