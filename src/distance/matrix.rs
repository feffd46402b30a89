//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once per problem instance from node coordinates; read-only for the
/// rest of the program.
///
/// # Examples
///
/// ```
/// use profit_routing::distance::DistanceMatrix;
/// use profit_routing::models::Node;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 3.0, 4.0, 10, 5.0, 12.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
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
}
