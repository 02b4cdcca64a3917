//! Python FFI bindings via PyO3.
//!
//! Exposes the matching pipeline to Python with the call shape Python users
//! already know: a list of `{label: set(members)}` dicts in, a list of sets of
//! `(timestep, label)` tuples out.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from temporal_communities import matching
//!
//! timeseries = [
//!     {"orange": {1, 2, 3}, "violet": {4, 5, 6}, "green": {7, 8, 9}},
//!     {"violet": {2, 3, 4, 5, 6}, "green": {7, 8}, "yellow": {9}},
//!     {"orange": {1, 2, 3}, "violet": {4, 5, 6, 7}, "green": {8, 9}},
//! ]
//! for community in matching(timeseries, memory=2):
//!     print(sorted(community))
//! ```
//!
//! Labels may be any Python object; they are carried through by position and
//! handed back unchanged. Members must be `int` or `str`. Communities that
//! never link are left out of the result.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PySet, PyTuple};

use crate::community::Snapshot;
use crate::config::{harmonic_weights, MatchConfig};
use crate::driver::temporal_communities;
use crate::error::MatchError;

/// Hashable member identifier accepted from Python.
#[derive(Clone, Debug, PartialEq, Eq, Hash, FromPyObject)]
enum PyMember {
    Int(i64),
    Str(String),
}

fn to_py_err(err: MatchError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Match community detections from single snapshots into temporal communities.
///
/// Args:
///     timeseries: list of dicts, one per timestep, mapping label -> set of members.
///         Members must be int or str; any other member type raises TypeError.
///     memory: number of past timesteps compared against each timestep (default 2)
///     memory_weights: one weight per lookback distance; None or [] uses 1/d
///     score_threshold: links must score strictly above this (default 0.1)
///
/// Returns:
///     list of sets of (timestep, label) tuples
#[pyfunction]
#[pyo3(signature = (timeseries, memory=2, memory_weights=None, score_threshold=0.1))]
pub fn matching<'py>(
    py: Python<'py>,
    timeseries: Vec<Bound<'py, PyDict>>,
    memory: usize,
    memory_weights: Option<Vec<f64>>,
    score_threshold: f64,
) -> PyResult<Bound<'py, PyList>> {
    let mut labels: Vec<Vec<Bound<'py, PyAny>>> = Vec::with_capacity(timeseries.len());
    let mut series: Vec<Snapshot<usize, PyMember>> = Vec::with_capacity(timeseries.len());

    for dict in &timeseries {
        let mut snapshot = Snapshot::new();
        let mut names = Vec::with_capacity(dict.len());
        for (slot, (label, members)) in dict.iter().enumerate() {
            let mut set = Vec::new();
            for member in members.iter()? {
                set.push(member?.extract::<PyMember>()?);
            }
            snapshot.insert(slot, set).map_err(to_py_err)?;
            names.push(label);
        }
        series.push(snapshot);
        labels.push(names);
    }

    let weights = memory_weights
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| harmonic_weights(memory));
    let config = MatchConfig::with_memory(memory)
        .with_weights(weights)
        .with_threshold(score_threshold)
        .with_singletons(false);

    let communities = temporal_communities(&series, &config).map_err(to_py_err)?;

    let out = PyList::empty_bound(py);
    for community in communities {
        let set = PySet::empty_bound(py)?;
        for node in community.iter() {
            let label = &labels[node.timestep][node.label];
            let key = PyTuple::new_bound(py, [node.timestep.into_py(py), label.clone().unbind()]);
            set.add(key)?;
        }
        out.append(set)?;
    }
    Ok(out)
}

/// Python bindings for temporal community matching.
#[pymodule]
#[pyo3(name = "temporal_communities")]
pub fn temporal_communities_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(matching, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
