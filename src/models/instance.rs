//! Problem instance: nodes plus fleet-wide limits.

use super::Node;

/// An immutable profit-collection routing instance.
///
/// Owns all nodes (index 0 = depot, indices 1..n = customers) together with
/// the homogeneous-fleet limits: fleet size, per-vehicle capacity, and
/// per-route maximum duration.
///
/// # Examples
///
/// ```
/// use profit_routing::models::{Instance, Node};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0, 10, 1.0, 5.0),
///     Node::new(2, 2.0, 0.0, 10, 1.0, 8.0),
/// ];
/// let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid instance");
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.fleet_size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    nodes: Vec<Node>,
    fleet_size: usize,
    capacity: i32,
    max_duration: f64,
}

impl Instance {
    /// Creates a validated instance.
    ///
    /// Returns `None` if the node list is empty, node ids do not match their
    /// indices, the depot carries demand/service/profit, any customer field
    /// is negative or non-finite, or the fleet/capacity/duration limits are
    /// not positive.
    pub fn new(
        nodes: Vec<Node>,
        fleet_size: usize,
        capacity: i32,
        max_duration: f64,
    ) -> Option<Self> {
        if nodes.is_empty() || fleet_size == 0 || capacity <= 0 {
            return None;
        }
        if !max_duration.is_finite() || max_duration <= 0.0 {
            return None;
        }
        for (i, node) in nodes.iter().enumerate() {
            if node.id() != i {
                return None;
            }
            if !node.x().is_finite() || !node.y().is_finite() {
                return None;
            }
            if node.demand() < 0 || node.service_time() < 0.0 || node.profit() < 0.0 {
                return None;
            }
            if !node.service_time().is_finite() || !node.profit().is_finite() {
                return None;
            }
        }
        let depot = &nodes[0];
        if depot.demand() != 0 || depot.service_time() != 0.0 || depot.profit() != 0.0 {
            return None;
        }
        Some(Self {
            nodes,
            fleet_size,
            capacity,
            max_duration,
        })
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// The depot node.
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Customer ids, in instance order.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> {
        1..self.nodes.len()
    }

    /// Number of vehicles available.
    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    /// Per-vehicle load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Per-route maximum duration (travel plus service).
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }
}
