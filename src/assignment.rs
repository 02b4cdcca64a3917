//! Linear (bipartite) assignment on rectangular cost matrices.
//!
//! The matcher only needs the narrow contract "cost matrix in, minimum-cost
//! one-to-one pairing out", expressed by [`AssignmentSolver`]. [`Hungarian`]
//! is the built-in implementation.
//!
//! # Algorithm
//!
//! Shortest augmenting path with dual potentials (the Jonker–Volgenant form of
//! the Hungarian method), O(n²·m) for an n×m matrix with n ≤ m. Matrices with
//! more rows than columns are solved transposed, so every call returns a
//! matching of size `min(rows, cols)`.
//!
//! # Invariants
//! - Each row and each column appears in at most one returned pair.
//! - Returned pairs are sorted by row.
//! - An empty matrix (zero rows or zero columns) yields no pairs.
//! - Tie-break: among equal-cost optima, the augmenting search settles on the
//!   lowest column index it reaches first. This is solver-defined.

use alloc::vec;
use alloc::vec::Vec;

// ─── CostMatrix ──────────────────────────────────────────────────────────────

/// Dense row-major matrix of assignment costs.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from row slices. All rows must have the same length.
    ///
    /// Returns `None` on ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Concatenate blocks left to right. Every block must have `rows` rows.
    ///
    /// Returns `None` if a block's row count differs.
    pub fn hstack(rows: usize, blocks: &[CostMatrix]) -> Option<Self> {
        if blocks.iter().any(|b| b.rows != rows) {
            return None;
        }
        let cols: usize = blocks.iter().map(|b| b.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for b in blocks {
                data.extend_from_slice(b.row(r));
            }
        }
        Some(Self { rows, cols, data })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Cost at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Overwrite the cost at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cost: f64) {
        self.data[row * self.cols + col] = cost;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Swap rows and columns.
    pub fn transposed(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.set(c, r, self.get(r, c));
            }
        }
        t
    }

    /// Sum of the costs of the given pairs.
    pub fn total(&self, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(r, c)| self.get(r, c)).sum()
    }
}

// ─── Solver seam ─────────────────────────────────────────────────────────────

/// Minimum-cost one-to-one pairing of rows to columns.
///
/// Implementations must return a matching of size `min(rows, cols)` whose
/// total cost is minimal, sorted by row, and must return an empty vector for
/// an empty matrix. Costs are always finite when called by the matcher.
pub trait AssignmentSolver {
    /// Solve the assignment problem for `costs`, returning `(row, col)` pairs.
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)>;
}

impl<S: AssignmentSolver + ?Sized> AssignmentSolver for &S {
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)> {
        (**self).solve(costs)
    }
}

/// Hungarian method, shortest-augmenting-path form.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hungarian;

impl AssignmentSolver for Hungarian {
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)> {
        if costs.is_empty() {
            return Vec::new();
        }
        if costs.rows() <= costs.cols() {
            return augment(costs);
        }
        let mut pairs: Vec<(usize, usize)> = augment(&costs.transposed())
            .into_iter()
            .map(|(c, r)| (r, c))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Core solver for `rows ≤ cols`.
///
/// Index 0 of `col_owner`/`way`/`v` is a virtual column used as the search
/// root; real rows and columns are 1-based inside this function.
fn augment(costs: &CostMatrix) -> Vec<(usize, usize)> {
    let n = costs.rows();
    let m = costs.cols();
    debug_assert!(n <= m);

    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; m + 1];
    // col_owner[j] = 1-based row assigned to column j (0 = free)
    let mut col_owner = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];
    let mut min_slack = vec![f64::INFINITY; m + 1];
    let mut used = vec![false; m + 1];

    for row in 1..=n {
        col_owner[0] = row;
        let mut j0 = 0usize;
        min_slack.fill(f64::INFINITY);
        used.fill(false);

        // Grow the alternating tree until a free column is reached.
        loop {
            used[j0] = true;
            let i0 = col_owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let slack = costs.get(i0 - 1, j - 1) - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            if j1 == 0 {
                // Only reachable with NaN costs; leave the row unassigned.
                break;
            }
            for j in 0..=m {
                if used[j] {
                    u[col_owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if col_owner[j0] == 0 {
                break;
            }
        }

        if col_owner[j0] != 0 {
            continue;
        }
        // Flip the augmenting path back to the root.
        while j0 != 0 {
            let j1 = way[j0];
            col_owner[j0] = col_owner[j1];
            j0 = j1;
        }
    }

    let mut pairs: Vec<(usize, usize)> = (1..=m)
        .filter(|&j| col_owner[j] != 0)
        .map(|j| (col_owner[j] - 1, j - 1))
        .collect();
    pairs.sort_unstable();
    pairs
}
