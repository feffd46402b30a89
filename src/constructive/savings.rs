//! Profit-weighted Clarke-Wright savings merge.
//!
//! # Algorithm
//!
//! Starts with one singleton route per customer, then repeatedly splices
//! route pairs end-to-end in order of decreasing savings. Savings use a
//! profit density rather than raw distance,
//!
//! ```text
//! p(x, y) = profit(y) / d(x, y) + service(y)
//! s(i, j) = g·p(i, j) − (p(0, i) + p(0, j)) − f·|p(0, i) − p(0, j)|
//! ```
//!
//! with the Paessens multipliers `g` (shape) and `f` (asymmetry penalty). A
//! pair merges only when both nodes sit depot-adjacent in different routes
//! and the merged route respects capacity and duration. Finally only the
//! fleet-size most profitable routes are kept.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4),
//! 568-581; Paessens, H. (1988). "The savings algorithm for the vehicle
//! routing problem", *EJOR* 34(3), 336-344.

use super::{mark_unroutable, MIN_DELTA};
use crate::distance::DistanceMatrix;
use crate::evaluation;
use crate::models::{Instance, Route, Solution};
use crate::params::SearchParams;

/// A savings value for merging two customers' routes.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Profit density of travelling from `x` to `y`.
fn profit_density(x: usize, y: usize, instance: &Instance, distances: &DistanceMatrix) -> f64 {
    let node = instance.node(y);
    node.profit() / distances.get(x, y).max(MIN_DELTA) + node.service_time()
}

/// Builds a solution with the parametrized savings merge.
///
/// Deterministic: no randomized choice is involved. Routes beyond the fleet
/// size are dropped, most profitable first kept; their customers are
/// reported unassigned.
///
/// # Examples
///
/// ```
/// use profit_routing::constructive::savings_merge;
/// use profit_routing::distance::DistanceMatrix;
/// use profit_routing::models::{Instance, Node};
/// use profit_routing::params::SearchParams;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1, 4.0, 0.0, 10, 1.0, 20.0),
///         Node::new(2, 5.0, 0.0, 10, 1.0, 25.0),
///     ],
///     2,
///     100,
///     1000.0,
/// )
/// .expect("valid instance");
/// let dm = DistanceMatrix::from_nodes(instance.nodes());
///
/// let sol = savings_merge(&instance, &dm, &SearchParams::default());
/// assert_eq!(sol.num_routes(), 1); // the close pair merges
/// assert_eq!(sol.num_served(), 2);
/// ```
pub fn savings_merge(
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
) -> Solution {
    let mut solution = Solution::new();
    let n = instance.nodes().len();
    if n <= 1 {
        return solution;
    }

    let mut routed = vec![false; n];
    routed[0] = true;
    mark_unroutable(instance, distances, &mut routed, &mut solution);

    // Each feasible customer starts in its own route; `members[id]` holds
    // the interior sequence of the route currently labelled `id`, and
    // `route_of[c]` maps a customer to its label.
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut route_of = vec![0usize; n];
    let mut loads = vec![0i32; n];
    let feasible: Vec<usize> = instance.customer_ids().filter(|&id| !routed[id]).collect();
    for &id in &feasible {
        members[id].push(id);
        route_of[id] = id;
        loads[id] = instance.node(id).demand();
    }

    let mut savings = Vec::with_capacity(feasible.len() * feasible.len() / 2);
    for (a, &i) in feasible.iter().enumerate() {
        for &j in &feasible[a + 1..] {
            let pair = profit_density(i, j, instance, distances);
            let from_i = profit_density(0, i, instance, distances);
            let from_j = profit_density(0, j, instance, distances);
            let value = params.savings_shape * pair
                - (from_i + from_j)
                - params.savings_asymmetry * (from_i - from_j).abs();
            savings.push(Saving { i, j, value });
        }
    }
    savings.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .expect("savings should not be NaN")
    });

    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }
        let combined_load = loads[ri] + loads[rj];
        if combined_load > instance.capacity() {
            continue;
        }

        // Both nodes must be depot-adjacent endpoints; orient the two
        // interiors so the new edge joins them directly.
        let i_first = members[ri].first() == Some(&saving.i);
        let i_last = members[ri].last() == Some(&saving.i);
        let j_first = members[rj].first() == Some(&saving.j);
        let j_last = members[rj].last() == Some(&saving.j);

        let mut merged = Vec::with_capacity(members[ri].len() + members[rj].len());
        if i_last && j_first {
            merged.extend(&members[ri]);
            merged.extend(&members[rj]);
        } else if i_first && j_last {
            merged.extend(&members[rj]);
            merged.extend(&members[ri]);
        } else if i_last && j_last {
            merged.extend(&members[ri]);
            merged.extend(members[rj].iter().rev());
        } else if i_first && j_first {
            merged.extend(members[ri].iter().rev());
            merged.extend(&members[rj]);
        } else {
            continue;
        }

        let mut sequence = Vec::with_capacity(merged.len() + 2);
        sequence.push(0);
        sequence.extend(&merged);
        sequence.push(0);
        let travelled = evaluation::sequence_travelled(&sequence, instance, distances);
        if travelled > instance.max_duration() {
            continue;
        }

        for &c in &merged {
            route_of[c] = ri;
        }
        members[ri] = merged;
        members[rj] = Vec::new();
        loads[ri] = combined_load;
        loads[rj] = 0;
    }

    // Keep the fleet-size most profitable routes.
    let mut survivors: Vec<Route> = members
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| {
            let mut route = Route::new(instance.capacity(), instance.max_duration());
            for (pos, &id) in m.iter().enumerate() {
                route.insert_node(pos + 1, id);
            }
            evaluation::refresh_route(&mut route, instance, distances);
            route
        })
        .collect();
    survivors.sort_by(|a, b| {
        b.profit()
            .partial_cmp(&a.profit())
            .expect("profit should not be NaN")
    });

    for (index, route) in survivors.into_iter().enumerate() {
        if index < instance.fleet_size() {
            solution.add_route(route);
        } else {
            for id in route.customer_ids() {
                solution.add_unassigned(id);
            }
        }
    }
    solution
}
