//! Node type: depot or customer.

use serde::{Deserialize, Serialize};

/// A point in a profit-collection routing problem: the depot or a customer.
///
/// Node 0 is conventionally the depot. Customers carry a demand, a service
/// time, and a profit collected when visited. The depot carries none of
/// these.
///
/// # Examples
///
/// ```
/// use profit_routing::models::Node;
///
/// let depot = Node::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.profit(), 0.0);
///
/// let c = Node::new(1, 41.0, 49.0, 10, 10.0, 25.0);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.profit(), 25.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    service_time: f64,
    profit: f64,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, service_time: f64, profit: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_time,
            profit,
        }
    }

    /// Creates a depot at the given coordinates (id=0, no demand, no profit).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0, 0.0, 0.0)
    }

    /// Node ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this node (units to deliver).
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service time spent when visiting this node.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Profit collected by visiting this node.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
