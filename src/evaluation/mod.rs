//! Route cost evaluation and solution verification.
//!
//! Full-traversal recomputation of route aggregates, the incremental
//! duration formulas shared by the constructive heuristics and move
//! operators, and [`verify_solution`], which checks every cached aggregate
//! and structural invariant of a [`Solution`] and reports mismatches as
//! [`Violation`]s.
//!
//! Route duration ("travelled") is the sum of inter-node distances plus the
//! service time of every visited node; the depot contributes no service.

use crate::distance::DistanceMatrix;
use crate::models::{Instance, Route, Solution, Violation, ViolationType};

/// Travelled duration of a full node sequence (distances plus service
/// times of every node after the first).
pub fn sequence_travelled(
    sequence: &[usize],
    instance: &Instance,
    distances: &DistanceMatrix,
) -> f64 {
    let mut travelled = 0.0;
    for pair in sequence.windows(2) {
        travelled += distances.get(pair[0], pair[1]);
        travelled += instance.node(pair[1]).service_time();
    }
    travelled
}

/// Total demand of a node sequence (the depot contributes zero).
pub fn sequence_load(sequence: &[usize], instance: &Instance) -> i32 {
    sequence.iter().map(|&id| instance.node(id).demand()).sum()
}

/// Total profit of a node sequence (the depot contributes zero).
pub fn sequence_profit(sequence: &[usize], instance: &Instance) -> f64 {
    sequence.iter().map(|&id| instance.node(id).profit()).sum()
}

/// Recomputes a route's cached load, travelled duration, and profit by full
/// traversal.
///
/// Required after any mutation whose local deltas are unsafe, notably
/// cross-route two-opt splices.
pub fn refresh_route(route: &mut Route, instance: &Instance, distances: &DistanceMatrix) {
    let load = sequence_load(route.sequence(), instance);
    let travelled = sequence_travelled(route.sequence(), instance, distances);
    let profit = sequence_profit(route.sequence(), instance);
    route.set_load(load);
    route.set_travelled(travelled);
    route.set_profit(profit);
}

/// End-of-route duration evaluation used by the nearest-neighbor builder:
/// `d(last, candidate) + service(candidate) + d(candidate, depot)`.
///
/// Charges the full return leg rather than the marginal change; the
/// nearest-neighbor scoring exponent is tuned against this quantity.
pub fn append_duration(
    route: &Route,
    candidate: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
) -> f64 {
    let sequence = route.sequence();
    let last = sequence[sequence.len() - 2];
    distances.get(last, candidate)
        + instance.node(candidate).service_time()
        + distances.get(candidate, 0)
}

/// Marginal duration change from inserting `candidate` between sequence
/// positions `pos` and `pos + 1`:
/// `d(prev, c) + service(c) + d(c, next) − d(prev, next)`.
///
/// # Panics
///
/// Panics if `pos + 1` is past the end of the sequence.
pub fn insertion_delta(
    route: &Route,
    pos: usize,
    candidate: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
) -> f64 {
    let sequence = route.sequence();
    let prev = sequence[pos];
    let next = sequence[pos + 1];
    distances.get(prev, candidate)
        + instance.node(candidate).service_time()
        + distances.get(candidate, next)
        - distances.get(prev, next)
}

/// Checks every structural invariant and cached aggregate of a solution.
///
/// Returns an empty vector for a consistent, feasible solution. Violations
/// are programming-logic errors when produced by this crate's own
/// heuristics; callers deciding to recover should
/// [`refresh_route`] the offending routes and recompute totals.
///
/// # Examples
///
/// ```
/// use profit_routing::distance::DistanceMatrix;
/// use profit_routing::evaluation::verify_solution;
/// use profit_routing::models::{Instance, Node, Solution};
///
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0), Node::new(1, 1.0, 0.0, 10, 1.0, 5.0)],
///     1,
///     100,
///     500.0,
/// )
/// .expect("valid instance");
/// let dm = DistanceMatrix::from_nodes(instance.nodes());
///
/// let sol = Solution::new();
/// assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
/// ```
pub fn verify_solution(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen = vec![false; instance.nodes().len()];

    for (route_index, route) in solution.routes().iter().enumerate() {
        let sequence = route.sequence();
        let endpoints_ok = sequence.len() >= 2
            && sequence[0] == 0
            && sequence[sequence.len() - 1] == 0
            && !sequence[1..sequence.len() - 1].contains(&0);
        if !endpoints_ok {
            violations.push(Violation::new(ViolationType::MisplacedDepot { route_index }));
        }

        for &id in &sequence[1..sequence.len().saturating_sub(1)] {
            if id == 0 {
                continue;
            }
            if seen[id] {
                violations.push(Violation::new(ViolationType::DuplicateCustomer {
                    customer_id: id,
                }));
            }
            seen[id] = true;
        }

        let load = sequence_load(sequence, instance);
        let travelled = sequence_travelled(sequence, instance, distances);
        let profit = sequence_profit(sequence, instance);

        if load != route.load() {
            violations.push(Violation::new(ViolationType::LoadMismatch {
                route_index,
                cached: route.load(),
                actual: load,
            }));
        }
        if (travelled - route.travelled()).abs() > tolerance {
            violations.push(Violation::new(ViolationType::DurationMismatch {
                route_index,
                cached: route.travelled(),
                actual: travelled,
            }));
        }
        if (profit - route.profit()).abs() > tolerance {
            violations.push(Violation::new(ViolationType::ProfitMismatch {
                route_index,
                cached: route.profit(),
                actual: profit,
            }));
        }
        if load > route.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity: route.capacity(),
            }));
        }
        if travelled > route.max_duration() + tolerance {
            violations.push(Violation::new(ViolationType::DurationExceeded {
                route_index,
                travelled,
                max_duration: route.max_duration(),
            }));
        }
    }

    let profit_sum: f64 = solution.routes().iter().map(|r| r.profit()).sum();
    let duration_sum: f64 = solution.routes().iter().map(|r| r.travelled()).sum();
    if (profit_sum - solution.total_profit()).abs() > tolerance {
        violations.push(Violation::new(ViolationType::TotalProfitMismatch {
            cached: solution.total_profit(),
            actual: profit_sum,
        }));
    }
    if (duration_sum - solution.total_duration()).abs() > tolerance {
        violations.push(Violation::new(ViolationType::TotalDurationMismatch {
            cached: solution.total_duration(),
            actual: duration_sum,
        }));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn line_instance() -> (Instance, DistanceMatrix) {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10, 2.0, 5.0),
            Node::new(2, 2.0, 0.0, 10, 3.0, 8.0),
            Node::new(3, 3.0, 0.0, 10, 1.0, 4.0),
        ];
        let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        (instance, dm)
    }

    fn built_route(ids: &[usize], instance: &Instance, dm: &DistanceMatrix) -> Route {
        let mut r = Route::new(instance.capacity(), instance.max_duration());
        for (i, &id) in ids.iter().enumerate() {
            r.insert_node(i + 1, id);
        }
        refresh_route(&mut r, instance, dm);
        r
    }

    #[test]
    fn test_sequence_travelled_includes_service() {
        let (instance, dm) = line_instance();
        // 0→1→2→0: distance 1 + 1 + 2 = 4, service 2 + 3 = 5
        let t = sequence_travelled(&[0, 1, 2, 0], &instance, &dm);
        assert!((t - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_sequence_load_and_profit() {
        let (instance, _) = line_instance();
        assert_eq!(sequence_load(&[0, 1, 3, 0], &instance), 20);
        assert!((sequence_profit(&[0, 1, 3, 0], &instance) - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_refresh_route() {
        let (instance, dm) = line_instance();
        let r = built_route(&[1, 2], &instance, &dm);
        assert_eq!(r.load(), 20);
        assert!((r.travelled() - 9.0).abs() < 1e-10);
        assert!((r.profit() - 13.0).abs() < 1e-10);
    }

    #[test]
    fn test_append_duration() {
        let (instance, dm) = line_instance();
        let r = built_route(&[1], &instance, &dm);
        // last = 1: d(1,2) + service(2) + d(2,0) = 1 + 3 + 2
        let a = append_duration(&r, 2, &instance, &dm);
        assert!((a - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_insertion_delta_matches_traversal() {
        let (instance, dm) = line_instance();
        let r = built_route(&[1, 3], &instance, &dm);
        let delta = insertion_delta(&r, 1, 2, &instance, &dm);
        let before = r.travelled();
        let after = sequence_travelled(&[0, 1, 2, 3, 0], &instance, &dm);
        assert!((delta - (after - before)).abs() < 1e-10);
    }

    #[test]
    fn test_verify_clean_solution() {
        let (instance, dm) = line_instance();
        let mut sol = Solution::new();
        sol.add_route(built_route(&[1, 2], &instance, &dm));
        sol.add_route(built_route(&[3], &instance, &dm));
        assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_verify_detects_stale_cache() {
        let (instance, dm) = line_instance();
        let mut sol = Solution::new();
        sol.add_route(built_route(&[1, 2], &instance, &dm));
        sol.route_mut(0).add_travelled(5.0);
        sol.recompute_totals();
        let violations = verify_solution(&sol, &instance, &dm, 1e-4);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::DurationMismatch { .. })));
    }

    #[test]
    fn test_verify_detects_duplicate() {
        let (instance, dm) = line_instance();
        let mut sol = Solution::new();
        sol.add_route(built_route(&[1, 2], &instance, &dm));
        sol.add_route(built_route(&[2], &instance, &dm));
        let violations = verify_solution(&sol, &instance, &dm, 1e-4);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::DuplicateCustomer { customer_id: 2 })));
    }

    #[test]
    fn test_verify_detects_capacity_violation() {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 60, 0.0, 5.0),
            Node::new(2, 2.0, 0.0, 60, 0.0, 8.0),
        ];
        let instance = Instance::new(nodes, 1, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        let mut sol = Solution::new();
        sol.add_route(built_route(&[1, 2], &instance, &dm));
        let violations = verify_solution(&sol, &instance, &dm, 1e-4);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::CapacityExceeded { .. })));
    }

    #[test]
    fn test_verify_detects_misplaced_depot() {
        let (instance, dm) = line_instance();
        let mut r = Route::new(instance.capacity(), instance.max_duration());
        r.insert_node(1, 1);
        r.insert_node(2, 0); // depot in the interior
        refresh_route(&mut r, &instance, &dm);
        let mut sol = Solution::new();
        sol.add_route(r);
        let violations = verify_solution(&sol, &instance, &dm, 1e-4);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::MisplacedDepot { .. })));
    }
}
