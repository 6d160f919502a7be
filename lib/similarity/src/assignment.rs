//! Minimum-cost bipartite assignment
//!
//! Hungarian (Kuhn-Munkres) assignment over a rectangular cost matrix,
//! solved with `pathfinding`. The shorter side is always fully assigned, so an
//! n×m problem yields exactly `min(n, m)` pairs.

use pathfinding::kuhn_munkres::{kuhn_munkres_min, Weights};
use std::fmt;

/// Errors raised while building or solving a cost matrix
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignmentError {
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cost at ({row}, {col}) is not finite")]
    NonFiniteCost { row: usize, col: usize },
}

/// Dense row-major cost matrix
#[derive(Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Create a matrix with every cell set to `fill`
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    /// Create a matrix by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AssignmentError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(AssignmentError::RaggedRow {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl fmt::Debug for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<&[f64]> = self.data.chunks(self.cols.max(1)).take(self.rows).collect();
        f.debug_struct("CostMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &rows)
            .finish()
    }
}

/// Result of solving an assignment problem
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assignment {
    /// Selected (row, column) pairs, sorted by row
    pub pairs: Vec<(usize, usize)>,
    /// Sum of the selected costs
    pub total_cost: f64,
}

impl Assignment {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.pairs.iter()
    }
}

/// Largest magnitude a scaled integer cost may take
const SCALED_RANGE: f64 = (1u64 << 40) as f64;

/// Integer view of a cost matrix for `kuhn_munkres_min`.
///
/// Costs are scaled so the largest magnitude maps to [`SCALED_RANGE`] and
/// rounded. When the source is taller than wide the view is transposed, so
/// rows never outnumber columns.
struct ScaledCosts {
    data: Vec<i64>,
    rows: usize,
    columns: usize,
}

impl ScaledCosts {
    fn new(matrix: &CostMatrix, transpose: bool) -> Self {
        let max_abs = matrix.data.iter().fold(0.0f64, |acc, c| acc.max(c.abs()));
        let scale = if max_abs > 0.0 { SCALED_RANGE / max_abs } else { 1.0 };

        let (rows, columns) = if transpose {
            (matrix.cols(), matrix.rows())
        } else {
            (matrix.rows(), matrix.cols())
        };
        let data = CostMatrix::from_fn(rows, columns, |r, c| {
            let cost = if transpose { matrix.get(c, r) } else { matrix.get(r, c) };
            (cost * scale).round()
        })
        .data
        .into_iter()
        .map(|v| v as i64)
        .collect();

        Self { data, rows, columns }
    }
}

impl Weights<i64> for ScaledCosts {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.columns + col]
    }

    fn neg(&self) -> Self {
        Self {
            data: self.data.iter().map(|&v| -v).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/// Solve the minimum-cost assignment for `matrix`
///
/// The solver works on costs scaled to integers, so the selected pairs are
/// optimal up to a relative rounding of 2^-40 of the largest cost;
/// `total_cost` is summed from the original values.
///
/// # Returns
/// `min(rows, cols)` pairs with no row or column repeated, minimizing the
/// summed cost. An empty dimension gives an empty assignment with cost 0.
pub fn solve(matrix: &CostMatrix) -> Result<Assignment, AssignmentError> {
    if matrix.is_empty() {
        return Ok(Assignment::default());
    }

    for row in 0..matrix.rows() {
        for col in 0..matrix.cols() {
            if !matrix.get(row, col).is_finite() {
                return Err(AssignmentError::NonFiniteCost { row, col });
            }
        }
    }

    let transpose = matrix.rows() > matrix.cols();
    let (_, assigned) = kuhn_munkres_min(&ScaledCosts::new(matrix, transpose));

    let mut pairs: Vec<(usize, usize)> = assigned
        .into_iter()
        .enumerate()
        .map(|(r, c)| if transpose { (c, r) } else { (r, c) })
        .collect();
    pairs.sort_unstable();

    let total_cost = pairs.iter().map(|&(r, c)| matrix.get(r, c)).sum();
    Ok(Assignment { pairs, total_cost })
}
