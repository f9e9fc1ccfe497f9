//! Dense cost matrix.

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Entries are non-negative; `f64::INFINITY` is the unreachable sentinel.
/// Matrices produced by the shortest-path oracle are
/// triangle-inequality-consistent by construction; matrices produced by the
/// cluster reduction are asymmetric and carry penalty terms.
///
/// # Examples
///
/// ```
/// use transit_tour::distance::CostMatrix;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![0.0, 5.0],
///     vec![7.0, 0.0],
/// ]).expect("square");
/// assert_eq!(cm.size(), 2);
/// assert_eq!(cm.get(0, 1), 5.0);
/// assert!(!cm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix with every entry unreachable (`INFINITY`).
    pub fn unreachable(size: usize) -> Self {
        Self {
            data: vec![f64::INFINITY; size * size],
            size,
        }
    }

    /// Assembles a matrix from per-source rows.
    ///
    /// Returns `None` if the rows do not form a square matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return None;
            }
            data.extend(row);
        }
        Some(Self { data, size })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the pair is connected by a finite-cost path.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the cheapest-to-reach node from `from` among the candidates.
    ///
    /// Ties break toward the lowest index so construction heuristics stay
    /// deterministic. Returns `None` if `candidates` is empty.
    pub fn cheapest_from(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().min_by(|&a, &b| {
            self.get(from, a)
                .total_cmp(&self.get(from, b))
                .then(a.cmp(&b))
        })
    }
}
