//! Membership-record loader: text files in, timeseries out.
//!
//! Each input line is one record
//!
//! ```text
//! <timestep-id>, <community-label>, <member-tag>
//! ```
//!
//! Fields are trimmed and blank lines are skipped. One file holds one
//! timestep; the timestep-id column is informational and ignored, position
//! in the file list decides the timestep. Member tags are interned to dense
//! `u32` ids shared across every file, so equal tags compare equal between
//! timesteps.
//!
//! Requires the `std` feature.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use thiserror::Error;

use crate::community::Snapshot;

/// Snapshot type produced by the loader: string labels, interned member ids.
pub type TagSnapshot = Snapshot<String, u32>;

/// Failure while reading membership records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line did not have the expected shape.
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        /// File being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Dense, first-seen-order ids for member tags.
#[derive(Clone, Debug, Default)]
pub struct TagInterner {
    ids: HashMap<String, u32>,
    tags: Vec<String>,
}

impl TagInterner {
    /// Empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `tag`, allocating the next id on first sight.
    pub fn intern(&mut self, tag: &str) -> u32 {
        if let Some(&id) = self.ids.get(tag) {
            return id;
        }
        let id = self.tags.len() as u32;
        self.ids.insert(tag.to_string(), id);
        self.tags.push(tag.to_string());
        id
    }

    /// Tag behind `id`.
    pub fn tag(&self, id: u32) -> Option<&str> {
        self.tags.get(id as usize).map(String::as_str)
    }

    /// Number of distinct tags seen.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if no tag has been interned.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Parse one timestep's records from `reader`.
///
/// `origin` is only used to label errors.
pub fn parse_snapshot<R: BufRead>(
    reader: R,
    origin: &Path,
    tags: &mut TagInterner,
) -> Result<TagSnapshot, LoadError> {
    let mut snapshot = TagSnapshot::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        let [_, label, tag] = fields.as_slice() else {
            return Err(LoadError::Malformed {
                path: origin.to_path_buf(),
                line: idx + 1,
                reason: format!("expected 3 comma-separated fields, found {}", fields.len()),
            });
        };
        if label.is_empty() || tag.is_empty() {
            return Err(LoadError::Malformed {
                path: origin.to_path_buf(),
                line: idx + 1,
                reason: "empty community label or member tag".to_string(),
            });
        }
        let id = tags.intern(tag);
        snapshot.add_member(label.to_string(), id);
    }
    Ok(snapshot)
}

/// Load one snapshot per file, in the order given.
pub fn load_files<I, P>(paths: I) -> Result<(Vec<TagSnapshot>, TagInterner), LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut tags = TagInterner::new();
    let mut timeseries = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = parse_snapshot(BufReader::new(file), path, &mut tags)?;
        tracing::debug!(
            path = %path.display(),
            communities = snapshot.len(),
            "loaded snapshot"
        );
        timeseries.push(snapshot);
    }
    Ok((timeseries, tags))
}
