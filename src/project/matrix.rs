//! Dense 0/1 matrices and the design-structure metrics derived from them.
//!
//! The adjacency matrix records direct dependencies between modules; the
//! visibility matrix is its transitive closure with a zero diagonal,
//! obtained by running Floyd-Warshall over a seeded distance matrix.
//! Change cost is the percentage of reachable cells in the distance
//! matrix (the diagonal counts); core size is the percentage of modules
//! whose visibility fan-in and fan-out both meet their medians.

use serde::{Deserialize, Serialize};

// =============================================================================
// MATRIX
// =============================================================================

/// Square 0/1 matrix in a flat row-major buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    size: usize,
    cells: Vec<u8>,
}

impl Matrix {
    /// All-zero `size` x `size` matrix.
    #[must_use]
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value at `row`, `col`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    /// Set the cell at `row`, `col`.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.size + col] = value;
    }

    /// Row `row` as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Count of 1-cells.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }
}

// =============================================================================
// DERIVED METRICS
// =============================================================================

/// Sentinel distance for unreachable pairs; half of `u32::MAX` so one
/// addition cannot overflow.
const UNREACHABLE: u32 = u32::MAX / 2;

/// Percentage of 1-cells over all cells; 0 for an empty matrix.
pub(crate) fn density(matrix: &Matrix) -> f64 {
    let n = matrix.size();
    if n == 0 {
        return 0.0;
    }
    matrix.ones() as f64 / (n * n) as f64 * 100.0
}

/// Transitive visibility matrix and change cost.
///
/// Seeds a distance matrix with 1 on the diagonal and for direct edges,
/// the sentinel elsewhere, and runs the Floyd-Warshall triple loop. A
/// cell that ends up below the sentinel counts toward change cost and,
/// off the diagonal, sets visibility.
pub(crate) fn visibility_matrix(adjacency: &Matrix) -> (Matrix, f64) {
    let n = adjacency.size();
    if n == 0 {
        return (Matrix::zeroed(0), 0.0);
    }

    let mut dist = vec![UNREACHABLE; n * n];
    for i in 0..n {
        for j in 0..n {
            if i == j || adjacency.get(i, j) == 1 {
                dist[i * n + j] = 1;
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i * n + k] + dist[k * n + j];
                if through < dist[i * n + j] {
                    dist[i * n + j] = through;
                }
            }
        }
    }

    let mut visibility = Matrix::zeroed(n);
    let mut reachable = 0usize;
    for i in 0..n {
        for j in 0..n {
            if dist[i * n + j] < UNREACHABLE {
                reachable += 1;
                if i != j {
                    visibility.set(i, j, 1);
                }
            }
        }
    }

    let change_cost = reachable as f64 / (n * n) as f64 * 100.0;
    (visibility, change_cost)
}

/// Core size over the visibility matrix.
///
/// Fan-in of a module is its visibility column sum (who can reach it),
/// fan-out its row sum (what it can reach). A module is in the core when
/// both meet their medians. Zero when the project has no direct
/// dependencies at all.
pub(crate) fn core_size(visibility: &Matrix, first_order_density: f64) -> f64 {
    if first_order_density == 0.0 {
        return 0.0;
    }

    let n = visibility.size();
    let mut fan_in = vec![0u32; n];
    let mut fan_out = vec![0u32; n];
    for i in 0..n {
        for j in 0..n {
            if visibility.get(i, j) == 1 {
                fan_out[i] += 1;
                fan_in[j] += 1;
            }
        }
    }

    let median_in = median(&fan_in);
    let median_out = median(&fan_out);
    let core = (0..n)
        .filter(|&i| f64::from(fan_in[i]) >= median_in && f64::from(fan_out[i]) >= median_out)
        .count();
    core as f64 / n as f64 * 100.0
}

/// Median of a sequence: the middle element for odd lengths, the mean of
/// the two middle elements for even lengths.
fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        f64::from(sorted[(n - 1) / 2])
    } else {
        f64::from(sorted[(n - 2) / 2] + sorted[n / 2]) / 2.0
    }
}
