//! Solution and violation types.

use super::Route;

/// A type of constraint or invariant violation in a route or solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Route duration exceeds its maximum.
    DurationExceeded {
        /// Route index.
        route_index: usize,
        /// Actual duration.
        travelled: f64,
        /// Maximum allowed duration.
        max_duration: f64,
    },
    /// Cached route load disagrees with a full recomputation.
    LoadMismatch {
        /// Route index.
        route_index: usize,
        /// Cached value.
        cached: i32,
        /// Recomputed value.
        actual: i32,
    },
    /// Cached route duration disagrees with a full recomputation.
    DurationMismatch {
        /// Route index.
        route_index: usize,
        /// Cached value.
        cached: f64,
        /// Recomputed value.
        actual: f64,
    },
    /// Cached route profit disagrees with a full recomputation.
    ProfitMismatch {
        /// Route index.
        route_index: usize,
        /// Cached value.
        cached: f64,
        /// Recomputed value.
        actual: f64,
    },
    /// Cached solution profit disagrees with the sum over routes.
    TotalProfitMismatch {
        /// Cached value.
        cached: f64,
        /// Sum over routes.
        actual: f64,
    },
    /// Cached solution duration disagrees with the sum over routes.
    TotalDurationMismatch {
        /// Cached value.
        cached: f64,
        /// Sum over routes.
        actual: f64,
    },
    /// A customer appears more than once across the solution.
    DuplicateCustomer {
        /// Offending customer id.
        customer_id: usize,
    },
    /// A route does not start and end with the depot, or the depot appears
    /// in a route interior.
    MisplacedDepot {
        /// Route index.
        route_index: usize,
    },
}

/// A constraint or invariant violation found by
/// [`crate::evaluation::verify_solution`].
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: up to fleet-size routes plus unassigned customers.
///
/// Carries redundant cached totals equal to the sum of the route caches;
/// every mutation path keeps them in step and
/// [`crate::evaluation::verify_solution`] checks the equality.
///
/// # Examples
///
/// ```
/// use profit_routing::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(100, 500.0));
/// assert_eq!(sol.num_routes(), 1);
/// assert!(sol.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    total_profit: f64,
    total_duration: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
            total_profit: 0.0,
            total_duration: 0.0,
        }
    }

    /// Adds a route, folding its cached profit and duration into the totals.
    pub fn add_route(&mut self, route: Route) {
        self.total_profit += route.profit();
        self.total_duration += route.travelled();
        self.routes.push(route);
    }

    /// Marks a customer as unassigned (left unrouted).
    pub fn add_unassigned(&mut self, customer_id: usize) {
        self.unassigned.push(customer_id);
    }

    /// The routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to one route.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn route_mut(&mut self, index: usize) -> &mut Route {
        &mut self.routes[index]
    }

    /// Mutable access to two distinct routes at once.
    ///
    /// # Panics
    ///
    /// Panics if `i == j` or either index is out of bounds.
    pub fn route_pair_mut(&mut self, i: usize, j: usize) -> (&mut Route, &mut Route) {
        assert!(i != j, "route_pair_mut requires distinct indices");
        if i < j {
            let (head, tail) = self.routes.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.routes.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Ids of customers left unrouted.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns `true` if every customer of the instance was routed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Cached total profit over all routes.
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    /// Cached total duration over all routes.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Applies a delta to the cached totals.
    pub fn add_to_totals(&mut self, profit_delta: f64, duration_delta: f64) {
        self.total_profit += profit_delta;
        self.total_duration += duration_delta;
    }

    /// Rebuilds the cached totals from the route caches.
    pub fn recompute_totals(&mut self) {
        self.total_profit = self.routes.iter().map(|r| r.profit()).sum();
        self.total_duration = self.routes.iter().map(|r| r.travelled()).sum();
    }

    /// Drops routes that serve no customers.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_with(ids: &[usize], profit: f64, travelled: f64) -> Route {
        let mut r = Route::new(100, 500.0);
        for (i, &id) in ids.iter().enumerate() {
            r.insert_node(i + 1, id);
        }
        r.set_profit(profit);
        r.set_travelled(travelled);
        r
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.total_profit(), 0.0);
        assert_eq!(sol.total_duration(), 0.0);
        assert!(sol.is_complete());
    }

    #[test]
    fn test_solution_totals_follow_routes() {
        let mut sol = Solution::new();
        sol.add_route(route_with(&[1], 10.0, 50.0));
        sol.add_route(route_with(&[2, 3], 25.0, 80.0));
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert!((sol.total_profit() - 35.0).abs() < 1e-10);
        assert!((sol.total_duration() - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_solution_unassigned() {
        let mut sol = Solution::new();
        sol.add_unassigned(4);
        assert_eq!(sol.unassigned(), &[4]);
        assert!(!sol.is_complete());
    }

    #[test]
    fn test_solution_route_pair_mut() {
        let mut sol = Solution::new();
        sol.add_route(route_with(&[1], 0.0, 0.0));
        sol.add_route(route_with(&[2], 0.0, 0.0));
        let (a, b) = sol.route_pair_mut(1, 0);
        assert_eq!(a.sequence(), &[0, 2, 0]);
        assert_eq!(b.sequence(), &[0, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "distinct indices")]
    fn test_solution_route_pair_mut_same_index() {
        let mut sol = Solution::new();
        sol.add_route(route_with(&[1], 0.0, 0.0));
        let _ = sol.route_pair_mut(0, 0);
    }

    #[test]
    fn test_solution_recompute_totals() {
        let mut sol = Solution::new();
        sol.add_route(route_with(&[1], 10.0, 50.0));
        sol.route_mut(0).set_profit(12.0);
        sol.route_mut(0).set_travelled(55.0);
        sol.recompute_totals();
        assert!((sol.total_profit() - 12.0).abs() < 1e-10);
        assert!((sol.total_duration() - 55.0).abs() < 1e-10);
    }

    #[test]
    fn test_solution_remove_empty_routes() {
        let mut sol = Solution::new();
        sol.add_route(Route::new(100, 500.0));
        sol.add_route(route_with(&[1], 5.0, 10.0));
        sol.remove_empty_routes();
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].customer_ids(), vec![1]);
    }
}
