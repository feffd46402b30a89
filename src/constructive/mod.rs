//! Constructive heuristics for building initial solutions.
//!
//! - [`nearest_neighbor`] — Randomized profit-density route extension, O(n²)
//! - [`min_insertion`] — GRASP-style minimum insertion over all positions, O(n³)
//! - [`savings_merge`] — Clarke-Wright savings merge with the Paessens
//!   parametrization, O(n² log n)
//!
//! All builders produce a feasible [`Solution`](crate::models::Solution)
//! with at most fleet-size routes; customers that cannot be placed are
//! reported unassigned rather than treated as errors.

mod min_insertion;
mod nearest_neighbor;
mod rcl;
mod savings;

pub use min_insertion::min_insertion;
pub use nearest_neighbor::nearest_neighbor;
pub use rcl::{CandidateList, Objective};
pub use savings::savings_merge;

use crate::distance::DistanceMatrix;
use crate::models::{Instance, Solution};

/// Floor for duration-based scoring denominators, guarding coincident
/// points.
pub(crate) const MIN_DELTA: f64 = 1e-6;

/// Marks customers that can never be routed (demand above vehicle
/// capacity, or depot round trip plus service above the duration limit)
/// as routed-and-unassigned so no builder retries them.
pub(crate) fn mark_unroutable(
    instance: &Instance,
    distances: &DistanceMatrix,
    routed: &mut [bool],
    solution: &mut Solution,
) {
    for id in instance.customer_ids() {
        let node = instance.node(id);
        let round_trip = 2.0 * distances.get(0, id) + node.service_time();
        if node.demand() > instance.capacity() || round_trip > instance.max_duration() {
            routed[id] = true;
            solution.add_unassigned(id);
        }
    }
}

/// Inserts customer `id` after sequence position `pred` of the given route,
/// updating the route caches and solution totals incrementally.
pub(crate) fn apply_insertion(
    solution: &mut Solution,
    route_index: usize,
    pred: usize,
    id: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
) {
    let node = instance.node(id);
    let route = solution.route_mut(route_index);
    let delta = crate::evaluation::insertion_delta(route, pred, id, instance, distances);
    route.insert_node(pred + 1, id);
    route.add_load(node.demand());
    route.add_travelled(delta);
    route.add_profit(node.profit());
    solution.add_to_totals(node.profit(), delta);
}
