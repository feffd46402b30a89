//! GRASP-style minimum insertion.
//!
//! # Algorithm
//!
//! Considers every feasible (customer, route, position) triple across all
//! open routes. Each is scored by a delta-normalized cost,
//!
//! ```text
//! cost(c, r, p) = insertion_delta(c, r, p)^e / profit(c)
//! ```
//!
//! where the delta is the marginal duration change
//! `d(prev, c) + service(c) + d(c, next) − d(prev, next)`. The K lowest
//! costs form a restricted candidate list and one triple is drawn uniformly
//! at random. A new route opens when nothing fits the current ones,
//! until the fleet is exhausted.
//!
//! # Complexity
//!
//! O(n³) worst case (n customers × n positions per pass, n passes).

use rand::Rng;

use super::{apply_insertion, mark_unroutable, CandidateList, Objective, MIN_DELTA};
use crate::distance::DistanceMatrix;
use crate::evaluation;
use crate::models::{Instance, Route, Solution};
use crate::params::SearchParams;

/// One feasible insertion slot: customer, route, and predecessor position.
#[derive(Debug, Clone, Copy)]
struct InsertionSlot {
    customer: usize,
    route: usize,
    pred: usize,
}

/// Builds a solution by randomized minimum insertion over all positions.
///
/// # Examples
///
/// ```
/// use profit_routing::constructive::min_insertion;
/// use profit_routing::distance::DistanceMatrix;
/// use profit_routing::models::{Instance, Node};
/// use profit_routing::params::SearchParams;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1, 1.0, 0.0, 5, 1.0, 10.0),
///         Node::new(2, 2.0, 0.0, 5, 1.0, 20.0),
///         Node::new(3, 3.0, 0.0, 5, 1.0, 30.0),
///     ],
///     1,
///     100,
///     1000.0,
/// )
/// .expect("valid instance");
/// let dm = DistanceMatrix::from_nodes(instance.nodes());
/// let params = SearchParams::default();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let sol = min_insertion(&instance, &dm, &params, &mut rng);
/// assert_eq!(sol.num_routes(), 1);
/// assert!((sol.total_profit() - 60.0).abs() < 1e-10);
/// ```
pub fn min_insertion<R: Rng>(
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
    rng: &mut R,
) -> Solution {
    let mut solution = Solution::new();
    let n = instance.nodes().len();
    if n <= 1 {
        return solution;
    }

    let mut routed = vec![false; n];
    routed[0] = true;
    mark_unroutable(instance, distances, &mut routed, &mut solution);

    solution.add_route(Route::new(instance.capacity(), instance.max_duration()));

    loop {
        let mut rcl = CandidateList::new(params.rcl_size, Objective::Minimize);
        for (route_index, route) in solution.routes().iter().enumerate() {
            for id in instance.customer_ids() {
                if routed[id] {
                    continue;
                }
                let node = instance.node(id);
                if route.load() + node.demand() > route.capacity() {
                    continue;
                }
                for pred in 0..route.sequence().len() - 1 {
                    let delta = evaluation::insertion_delta(route, pred, id, instance, distances);
                    if route.travelled() + delta > route.max_duration() {
                        continue;
                    }
                    let cost = delta.max(MIN_DELTA).powf(params.insertion_exponent)
                        / node.profit().max(MIN_DELTA);
                    rcl.push(
                        cost,
                        InsertionSlot {
                            customer: id,
                            route: route_index,
                            pred,
                        },
                    );
                }
            }
        }

        match rcl.pick(rng) {
            Some(slot) => {
                apply_insertion(
                    &mut solution,
                    slot.route,
                    slot.pred,
                    slot.customer,
                    instance,
                    distances,
                );
                routed[slot.customer] = true;
            }
            None => {
                let last_empty = solution
                    .routes()
                    .last()
                    .is_some_and(|r| r.is_empty());
                if last_empty || solution.num_routes() >= instance.fleet_size() {
                    break;
                }
                solution.add_route(Route::new(instance.capacity(), instance.max_duration()));
            }
        }
    }

    solution.remove_empty_routes();
    for id in instance.customer_ids() {
        if !routed[id] {
            solution.add_unassigned(id);
        }
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::verify_solution;
    use crate::models::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triangle_instance(fleet_size: usize, capacity: i32) -> (Instance, DistanceMatrix) {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 5.0, 0.0, 10, 2.0, 30.0),
            Node::new(2, 0.0, 5.0, 10, 2.0, 20.0),
            Node::new(3, 5.0, 5.0, 10, 2.0, 40.0),
        ];
        let instance = Instance::new(nodes, fleet_size, capacity, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        (instance, dm)
    }

    #[test]
    fn test_min_insertion_routes_all_with_one_vehicle() {
        // Three small customers, fleet size 1, loose limits: all fit.
        let (instance, dm) = triangle_instance(1, 100);
        let params = SearchParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let sol = min_insertion(&instance, &dm, &params, &mut rng);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 3);
        assert!((sol.total_profit() - 90.0).abs() < 1e-10);
        assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_min_insertion_capacity_split() {
        let (instance, dm) = triangle_instance(3, 15);
        let params = SearchParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let sol = min_insertion(&instance, &dm, &params, &mut rng);
        assert_eq!(sol.num_routes(), 3);
        for r in sol.routes() {
            assert!(r.load() <= r.capacity());
        }
        assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_min_insertion_fleet_exhausted() {
        // Capacity for one customer per route, single vehicle: two left out.
        let (instance, dm) = triangle_instance(1, 15);
        let params = SearchParams::default();
        let mut rng = StdRng::seed_from_u64(3);
        let sol = min_insertion(&instance, &dm, &params, &mut rng);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 1);
        assert_eq!(sol.unassigned().len(), 2);
        assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_min_insertion_greedy_when_rcl_is_one() {
        // K = 1 removes the randomness: the cheapest slot is always taken.
        let (instance, dm) = triangle_instance(1, 100);
        let params = SearchParams::default().with_rcl_size(1);
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(999);
        let a = min_insertion(&instance, &dm, &params, &mut rng_a);
        let b = min_insertion(&instance, &dm, &params, &mut rng_b);
        let seq_a: Vec<_> = a.routes().iter().map(|r| r.customer_ids()).collect();
        let seq_b: Vec<_> = b.routes().iter().map(|r| r.customer_ids()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_min_insertion_totals_match_routes() {
        let (instance, dm) = triangle_instance(2, 20);
        let params = SearchParams::default();
        let mut rng = StdRng::seed_from_u64(5);
        let sol = min_insertion(&instance, &dm, &params, &mut rng);
        let profit: f64 = sol.routes().iter().map(|r| r.profit()).sum();
        assert!((sol.total_profit() - profit).abs() < 1e-10);
        let dur: f64 = sol.routes().iter().map(|r| r.travelled()).sum();
        assert!((sol.total_duration() - dur).abs() < 1e-10);
    }
}
