//! Randomized nearest-neighbor route extension.
//!
//! # Algorithm
//!
//! Grows one route at a time by appending customers just before the
//! terminal depot. Every unrouted customer that fits the open route's
//! capacity and duration limits is scored by profit density,
//!
//! ```text
//! score(c) = profit(c) / append_duration(c)^e
//! ```
//!
//! where `append_duration = d(last, c) + service(c) + d(c, depot)`. The
//! top-K scores form a restricted candidate list and one entry is drawn
//! uniformly at random (GRASP). When no candidate fits, a new route is
//! opened until the fleet is exhausted.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use rand::Rng;

use super::{apply_insertion, mark_unroutable, CandidateList, Objective, MIN_DELTA};
use crate::distance::DistanceMatrix;
use crate::evaluation;
use crate::models::{Instance, Route, Solution};
use crate::params::SearchParams;

/// Builds a solution by randomized nearest-neighbor extension.
///
/// Customers that cannot be placed within the fleet/capacity/duration
/// limits are reported unassigned on the returned solution.
///
/// # Examples
///
/// ```
/// use profit_routing::constructive::nearest_neighbor;
/// use profit_routing::distance::DistanceMatrix;
/// use profit_routing::models::{Instance, Node};
/// use profit_routing::params::SearchParams;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1, 1.0, 0.0, 10, 1.0, 5.0),
///         Node::new(2, 2.0, 0.0, 10, 1.0, 8.0),
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
/// let sol = nearest_neighbor(&instance, &dm, &params, &mut rng);
/// assert_eq!(sol.num_served(), 2);
/// assert!(sol.is_complete());
/// ```
pub fn nearest_neighbor<R: Rng>(
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
        let route_index = solution.num_routes() - 1;
        let mut rcl = CandidateList::new(params.rcl_size, Objective::Maximize);
        {
            let route = &solution.routes()[route_index];
            for id in instance.customer_ids() {
                if routed[id] {
                    continue;
                }
                let node = instance.node(id);
                if route.load() + node.demand() > route.capacity() {
                    continue;
                }
                let append = evaluation::append_duration(route, id, instance, distances);
                if route.travelled() + append > route.max_duration() {
                    continue;
                }
                let score = node.profit() / append.max(MIN_DELTA).powf(params.nn_exponent);
                rcl.push(score, id);
            }
        }

        match rcl.pick(rng) {
            Some(id) => {
                let pred = solution.routes()[route_index].sequence().len() - 2;
                apply_insertion(&mut solution, route_index, pred, id, instance, distances);
                routed[id] = true;
            }
            None => {
                // An empty RCL on an empty route means no remaining customer
                // can be routed at all.
                if solution.routes()[route_index].is_empty()
                    || solution.num_routes() >= instance.fleet_size()
                {
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
