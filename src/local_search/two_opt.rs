//! Two-opt neighborhood (edge exchange).
//!
//! # Algorithm
//!
//! Remove edges A→B and K→L and reconnect. Within one route the segment
//! between the edges is reversed:
//!
//! ```text
//! delta = d(A,K) + d(B,L) − d(A,B) − d(K,L)
//! ```
//!
//! Across two routes the tails beyond the removed edges are exchanged
//! (A→L and K→B). Loads and durations are no longer preserved per route,
//! so feasibility is checked by decomposing each route into the head up
//! to the removed edge and the tail beyond it, and the spliced routes get
//! a full aggregate refresh on application.

use super::moves::TwoOptMove;
use crate::distance::DistanceMatrix;
use crate::evaluation::refresh_route;
use crate::models::{Instance, Route, Solution};

/// Load and duration of the head `sequence[..=pos]` and of the interior
/// tail beyond it. The duration convention charges each arc as distance
/// plus the service time of the arc's head node.
fn head_split(
    route: &Route,
    pos: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
) -> (i32, f64) {
    let seq = route.sequence();
    let mut load = 0;
    let mut duration = 0.0;
    for i in 0..pos {
        let next = seq[i + 1];
        duration += distances.get(seq[i], next) + instance.node(next).service_time();
        load += instance.node(next).demand();
    }
    (load, duration)
}

fn evaluate_same_route(
    solution: &Solution,
    distances: &DistanceMatrix,
    route_index: usize,
    first_pos: usize,
    second_pos: usize,
) -> Option<TwoOptMove> {
    let route = &solution.routes()[route_index];
    let seq = route.sequence();
    // Removing only the first and last edges rotates the whole route.
    if first_pos == 0 && second_pos == seq.len() - 2 {
        return None;
    }

    let a = seq[first_pos];
    let b = seq[first_pos + 1];
    let k = seq[second_pos];
    let l = seq[second_pos + 1];
    let delta =
        distances.get(a, k) + distances.get(b, l) - distances.get(a, b) - distances.get(k, l);

    if route.travelled() + delta > route.max_duration() {
        return None;
    }
    Some(TwoOptMove {
        first_route: route_index,
        first_pos,
        second_route: route_index,
        second_pos,
        delta,
    })
}

fn evaluate_cross_route(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    first_route: usize,
    first_pos: usize,
    second_route: usize,
    second_pos: usize,
) -> Option<TwoOptMove> {
    let rt1 = &solution.routes()[first_route];
    let rt2 = &solution.routes()[second_route];
    let seq1 = rt1.sequence();
    let seq2 = rt2.sequence();

    let a = seq1[first_pos];
    let b = seq1[first_pos + 1];
    let k = seq2[second_pos];
    let l = seq2[second_pos + 1];

    let (head1_load, head1_dur) = head_split(rt1, first_pos, instance, distances);
    let (head2_load, head2_dur) = head_split(rt2, second_pos, instance, distances);
    let tail1_load = rt1.load() - head1_load;
    let tail2_load = rt2.load() - head2_load;

    if head1_load + tail2_load > rt1.capacity() || head2_load + tail1_load > rt2.capacity() {
        return None;
    }

    // New route 1 is head1 + A→L + remainder of route 2 past K.
    let new1_dur = head1_dur + (rt2.travelled() - head2_dur) - distances.get(k, l)
        + distances.get(a, l);
    let new2_dur = head2_dur + (rt1.travelled() - head1_dur) - distances.get(a, b)
        + distances.get(k, b);
    if new1_dur > rt1.max_duration() || new2_dur > rt2.max_duration() {
        return None;
    }

    let delta =
        distances.get(a, l) + distances.get(k, b) - distances.get(a, b) - distances.get(k, l);
    Some(TwoOptMove {
        first_route,
        first_pos,
        second_route,
        second_pos,
        delta,
    })
}

/// Scans edge pairs in fixed nested order, collecting improving moves
/// (`delta < -tolerance`). Same-route pairs reverse the enclosed segment;
/// pairs from distinct routes exchange tails.
pub(super) fn scan(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
    stop_at_first: bool,
) -> Vec<TwoOptMove> {
    let mut found = Vec::new();
    for first_route in 0..solution.num_routes() {
        let len1 = solution.routes()[first_route].sequence().len();
        for second_route in first_route..solution.num_routes() {
            let len2 = solution.routes()[second_route].sequence().len();
            for first_pos in 0..len1 - 1 {
                let start = if first_route == second_route {
                    first_pos + 2
                } else {
                    0
                };
                for second_pos in start..len2 - 1 {
                    let candidate = if first_route == second_route {
                        evaluate_same_route(solution, distances, first_route, first_pos, second_pos)
                    } else {
                        evaluate_cross_route(
                            solution,
                            instance,
                            distances,
                            first_route,
                            first_pos,
                            second_route,
                            second_pos,
                        )
                    };
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

/// Applies a two-opt move. Same-route reversals update the travelled
/// cache incrementally; cross-route splices rebuild both routes' load,
/// travelled and profit by full traversal, since the exchanged tails
/// carry their own aggregates.
pub(super) fn apply(
    solution: &mut Solution,
    mv: &TwoOptMove,
    instance: &Instance,
    distances: &DistanceMatrix,
) {
    if mv.first_route == mv.second_route {
        let route = solution.route_mut(mv.first_route);
        route.reverse_segment(mv.first_pos + 1, mv.second_pos);
        route.add_travelled(mv.delta);
        solution.add_to_totals(0.0, mv.delta);
    } else {
        let (rt1, rt2) = solution.route_pair_mut(mv.first_route, mv.second_route);
        let tail1 = rt1.split_off_tail(mv.first_pos + 1);
        let tail2 = rt2.split_off_tail(mv.second_pos + 1);
        rt1.extend_tail(tail2);
        rt2.extend_tail(tail1);
        refresh_route(rt1, instance, distances);
        refresh_route(rt2, instance, distances);
        solution.recompute_totals();
    }
}
