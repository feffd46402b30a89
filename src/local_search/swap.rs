//! Swap neighborhood (1-1 exchange).
//!
//! # Algorithm
//!
//! For every ordered pair of interior customers B (between A and C) and E
//! (between F and G), evaluate exchanging their positions:
//!
//! ```text
//! delta = d(A,E) + d(E,C) + d(F,B) + d(B,G) − d(A,B) − d(B,C) − d(F,E) − d(E,G)
//! ```
//!
//! When B and E are adjacent in the same route the general formula double
//! counts the shared edge, so the adjacent case is evaluated separately.
//! Service times cancel within a route and transfer across routes.

use super::moves::SwapMove;
use crate::distance::DistanceMatrix;
use crate::models::{Instance, Solution};

fn evaluate(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    first_route: usize,
    first_pos: usize,
    second_route: usize,
    second_pos: usize,
) -> Option<SwapMove> {
    let rt1 = &solution.routes()[first_route];
    let rt2 = &solution.routes()[second_route];
    let seq1 = rt1.sequence();
    let seq2 = rt2.sequence();

    let a = seq1[first_pos - 1];
    let b = seq1[first_pos];
    let c = seq1[first_pos + 1];
    let f = seq2[second_pos - 1];
    let e = seq2[second_pos];
    let g = seq2[second_pos + 1];

    let node_b = instance.node(b);
    let node_e = instance.node(e);

    let (first_delta, second_delta);
    if first_route == second_route && second_pos == first_pos + 1 {
        // Adjacent pair: A-B-E-G becomes A-E-B-G.
        first_delta = distances.get(a, e) + distances.get(b, g)
            - distances.get(a, b)
            - distances.get(e, g);
        second_delta = 0.0;
    } else {
        first_delta = distances.get(a, e) + distances.get(e, c)
            - distances.get(a, b)
            - distances.get(b, c)
            + node_e.service_time()
            - node_b.service_time();
        second_delta = distances.get(f, b) + distances.get(b, g)
            - distances.get(f, e)
            - distances.get(e, g)
            + node_b.service_time()
            - node_e.service_time();
    }
    let delta = first_delta + second_delta;

    if first_route != second_route {
        if rt1.load() - node_b.demand() + node_e.demand() > rt1.capacity() {
            return None;
        }
        if rt2.load() - node_e.demand() + node_b.demand() > rt2.capacity() {
            return None;
        }
        if rt1.travelled() + first_delta > rt1.max_duration() {
            return None;
        }
        if rt2.travelled() + second_delta > rt2.max_duration() {
            return None;
        }
    } else if rt1.travelled() + delta > rt1.max_duration() {
        return None;
    }

    Some(SwapMove {
        first_route,
        first_pos,
        second_route,
        second_pos,
        first_delta,
        second_delta,
        delta,
    })
}

/// Scans unordered customer pairs in fixed nested order, collecting
/// improving moves (`delta < -tolerance`).
pub(super) fn scan(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
    stop_at_first: bool,
) -> Vec<SwapMove> {
    let mut found = Vec::new();
    for first_route in 0..solution.num_routes() {
        let len1 = solution.routes()[first_route].sequence().len();
        for second_route in first_route..solution.num_routes() {
            let len2 = solution.routes()[second_route].sequence().len();
            for first_pos in 1..len1 - 1 {
                let start = if first_route == second_route {
                    first_pos + 1
                } else {
                    1
                };
                for second_pos in start..len2 - 1 {
                    let candidate = evaluate(
                        solution,
                        instance,
                        distances,
                        first_route,
                        first_pos,
                        second_route,
                        second_pos,
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

/// Applies a swap, updating route caches and solution totals incrementally.
pub(super) fn apply(solution: &mut Solution, mv: &SwapMove, instance: &Instance) {
    if mv.first_route == mv.second_route {
        let route = solution.route_mut(mv.first_route);
        let b = route.sequence()[mv.first_pos];
        let e = route.replace_node(mv.second_pos, b);
        route.replace_node(mv.first_pos, e);
        route.add_travelled(mv.delta);
    } else {
        let (rt1, rt2) = solution.route_pair_mut(mv.first_route, mv.second_route);
        let b = rt1.sequence()[mv.first_pos];
        let e = rt2.replace_node(mv.second_pos, b);
        rt1.replace_node(mv.first_pos, e);

        let node_b = instance.node(b);
        let node_e = instance.node(e);
        rt1.add_travelled(mv.first_delta);
        rt1.add_load(node_e.demand() - node_b.demand());
        rt1.add_profit(node_e.profit() - node_b.profit());
        rt2.add_travelled(mv.second_delta);
        rt2.add_load(node_b.demand() - node_e.demand());
        rt2.add_profit(node_b.profit() - node_e.profit());
    }
    solution.add_to_totals(0.0, mv.delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{refresh_route, verify_solution};
    use crate::models::{Node, Route};

    fn solution_with(routes: &[&[usize]], instance: &Instance, dm: &DistanceMatrix) -> Solution {
        let mut sol = Solution::new();
        for ids in routes {
            let mut r = Route::new(instance.capacity(), instance.max_duration());
            for (i, &id) in ids.iter().enumerate() {
                r.insert_node(i + 1, id);
            }
            refresh_route(&mut r, instance, dm);
            sol.add_route(r);
        }
        sol
    }

    #[test]
    fn test_swap_cross_route_exchanges_misplaced_pair() {
        // Customers 2 and 3 are each routed with the wrong cluster.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10, 0.0, 5.0),
            Node::new(2, 20.0, 0.5, 10, 0.0, 5.0),
            Node::new(3, 1.0, 0.5, 10, 0.0, 5.0),
            Node::new(4, 20.0, 0.0, 10, 0.0, 5.0),
        ];
        let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        let sol = solution_with(&[&[1, 2], &[4, 3]], &instance, &dm);

        let moves = scan(&sol, &instance, &dm, 1e-4, true);
        let mv = moves.first().expect("improving swap exists");

        let mut improved = sol.clone();
        apply(&mut improved, mv, &instance);
        assert!(improved.total_duration() < sol.total_duration() - 1e-4);
        assert!(verify_solution(&improved, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_swap_delta_matches_traversal() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10, 2.0, 5.0),
            Node::new(2, 20.0, 0.5, 15, 1.0, 5.0),
            Node::new(3, 1.0, 0.5, 20, 3.0, 5.0),
            Node::new(4, 20.0, 0.0, 10, 1.0, 5.0),
        ];
        let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        let sol = solution_with(&[&[1, 2], &[4, 3]], &instance, &dm);
        let before = sol.total_duration();

        let moves = scan(&sol, &instance, &dm, 1e-4, true);
        let mv = moves.first().expect("improving swap exists");
        let mut after = sol.clone();
        apply(&mut after, mv, &instance);

        let mut recomputed = after.clone();
        for i in 0..recomputed.num_routes() {
            refresh_route(recomputed.route_mut(i), &instance, &dm);
        }
        recomputed.recompute_totals();
        assert!((recomputed.total_duration() - (before + mv.delta)).abs() < 1e-6);
        assert!(verify_solution(&after, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_swap_adjacent_same_route() {
        // 0→2→1→3→0 on a line; swapping the adjacent pair restores order.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10, 0.0, 5.0),
            Node::new(2, 2.0, 0.0, 10, 0.0, 5.0),
            Node::new(3, 3.0, 0.0, 10, 0.0, 5.0),
        ];
        let instance = Instance::new(nodes, 1, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        let sol = solution_with(&[&[2, 1, 3]], &instance, &dm);

        let moves = scan(&sol, &instance, &dm, 1e-4, false);
        let mv = moves
            .iter()
            .find(|m| m.first_pos == 1 && m.second_pos == 2)
            .expect("adjacent swap exists");
        assert!((mv.delta - (-2.0)).abs() < 1e-9);

        let mut improved = sol.clone();
        apply(&mut improved, mv, &instance);
        assert_eq!(improved.routes()[0].sequence(), &[0, 1, 2, 3, 0]);
        assert!(verify_solution(&improved, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_swap_respects_capacity() {
        // Swapping 2 (demand 30) for 3 (demand 50) would overload route 0,
        // even though the distance delta favors the exchange.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 60, 0.0, 5.0),
            Node::new(2, 20.0, 0.0, 30, 0.0, 5.0),
            Node::new(3, 2.0, 0.0, 50, 0.0, 5.0),
        ];
        let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        let sol = solution_with(&[&[1, 2], &[3]], &instance, &dm);
        let moves = scan(&sol, &instance, &dm, 1e-4, false);
        for mv in &moves {
            let rt1 = &sol.routes()[mv.first_route];
            let rt2 = &sol.routes()[mv.second_route];
            let b = instance.node(rt1.sequence()[mv.first_pos]);
            let e = instance.node(rt2.sequence()[mv.second_pos]);
            assert!(rt1.load() - b.demand() + e.demand() <= rt1.capacity());
            assert!(rt2.load() - e.demand() + b.demand() <= rt2.capacity());
        }
    }
}
