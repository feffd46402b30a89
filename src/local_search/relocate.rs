//! Relocation neighborhood (1-0 move).
//!
//! # Algorithm
//!
//! For every interior customer B with neighbors A, C in its origin route,
//! and every edge (F, G) of a target route, evaluate moving B between F
//! and G:
//!
//! ```text
//! delta = d(A,C) + d(F,B) + d(B,G) − d(A,B) − d(B,C) − d(F,G)
//! ```
//!
//! Per-route deltas carry B's service time (it leaves one route and enters
//! the other); the combined delta is pure distance. Cross-route moves must
//! keep the target route's load and duration within limits.

use super::moves::RelocationMove;
use crate::distance::DistanceMatrix;
use crate::models::{Instance, Solution};

/// Evaluates relocating the customer at `(origin_route, origin_pos)` to
/// just after `(target_route, target_pos)`. Returns `None` for no-ops and
/// infeasible placements.
fn evaluate(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    origin_route: usize,
    origin_pos: usize,
    target_route: usize,
    target_pos: usize,
) -> Option<RelocationMove> {
    if origin_route == target_route && (target_pos == origin_pos || target_pos + 1 == origin_pos) {
        return None;
    }

    let rt1 = &solution.routes()[origin_route];
    let rt2 = &solution.routes()[target_route];
    let seq1 = rt1.sequence();
    let seq2 = rt2.sequence();

    let a = seq1[origin_pos - 1];
    let b = seq1[origin_pos];
    let c = seq1[origin_pos + 1];
    let f = seq2[target_pos];
    let g = seq2[target_pos + 1];

    let node_b = instance.node(b);
    let origin_delta =
        distances.get(a, c) - distances.get(a, b) - distances.get(b, c) - node_b.service_time();
    let target_delta =
        distances.get(f, b) + distances.get(b, g) - distances.get(f, g) + node_b.service_time();
    let delta = origin_delta + target_delta;

    if origin_route != target_route {
        if rt2.load() + node_b.demand() > rt2.capacity() {
            return None;
        }
        if rt2.travelled() + target_delta > rt2.max_duration() {
            return None;
        }
    } else if rt1.travelled() + delta > rt1.max_duration() {
        return None;
    }

    Some(RelocationMove {
        origin_route,
        origin_pos,
        target_route,
        target_pos,
        origin_delta,
        target_delta,
        delta,
    })
}

/// Scans the neighborhood in fixed nested order, collecting improving moves
/// (`delta < -tolerance`). With `stop_at_first` the scan returns as soon as
/// one is found.
pub(super) fn scan(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
    stop_at_first: bool,
) -> Vec<RelocationMove> {
    let mut found = Vec::new();
    for origin_route in 0..solution.num_routes() {
        let len1 = solution.routes()[origin_route].sequence().len();
        for target_route in 0..solution.num_routes() {
            let len2 = solution.routes()[target_route].sequence().len();
            for origin_pos in 1..len1 - 1 {
                for target_pos in 0..len2 - 1 {
                    let candidate = evaluate(
                        solution,
                        instance,
                        distances,
                        origin_route,
                        origin_pos,
                        target_route,
                        target_pos,
                    );
                    if let Some(mv) = candidate {
                        if mv.delta < -tolerance {
                            found.push(mv);
                            if stop_at_first {
                                return found;
                            }
                        }
                    }
                }
            }
        }
    }
    found
}

/// Applies a relocation, updating route caches and solution totals
/// incrementally.
pub(super) fn apply(solution: &mut Solution, mv: &RelocationMove, instance: &Instance) {
    if mv.origin_route == mv.target_route {
        let route = solution.route_mut(mv.origin_route);
        let b = route.remove_node(mv.origin_pos);
        if mv.origin_pos < mv.target_pos {
            route.insert_node(mv.target_pos, b);
        } else {
            route.insert_node(mv.target_pos + 1, b);
        }
        route.add_travelled(mv.delta);
    } else {
        let b = solution.routes()[mv.origin_route].sequence()[mv.origin_pos];
        let node = instance.node(b);
        let (demand, profit) = (node.demand(), node.profit());
        let (origin, target) = solution.route_pair_mut(mv.origin_route, mv.target_route);
        origin.remove_node(mv.origin_pos);
        target.insert_node(mv.target_pos + 1, b);
        origin.add_travelled(mv.origin_delta);
        origin.add_load(-demand);
        origin.add_profit(-profit);
        target.add_travelled(mv.target_delta);
        target.add_load(demand);
        target.add_profit(profit);
    }
    solution.add_to_totals(0.0, mv.delta);
}
