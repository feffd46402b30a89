//! Local search over relocation, swap, and two-opt neighborhoods.
//!
//! Each operator module exposes a scan over its neighborhood in a fixed
//! nested order and an incremental apply. [`descend`] drives one operator
//! to a local optimum with a first-improvement strategy, and is the
//! workhorse behind both the solver pipeline and the VNS controller.

mod moves;
mod relocate;
mod swap;
mod two_opt;

pub use moves::{Move, RelocationMove, SwapMove, TwoOptMove};

use crate::distance::DistanceMatrix;
use crate::models::{Instance, Solution};
use crate::params::SearchParams;

/// Neighborhood selector. The ordering doubles as the VNS neighborhood
/// index (relocation is the most local, two-opt the most disruptive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Relocation,
    Swap,
    TwoOpt,
}

impl Operator {
    /// All operators in ascending neighborhood order.
    pub const ALL: [Operator; 3] = [Operator::Relocation, Operator::Swap, Operator::TwoOpt];

    /// Maps a neighborhood index to an operator.
    pub fn from_index(k: usize) -> Option<Operator> {
        Operator::ALL.get(k).copied()
    }
}

/// Returns the first improving move of the given type in scan order, or
/// `None` at a local optimum.
pub fn find_improving(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
    operator: Operator,
) -> Option<Move> {
    match operator {
        Operator::Relocation => relocate::scan(solution, instance, distances, tolerance, true)
            .first()
            .copied()
            .map(Move::Relocation),
        Operator::Swap => swap::scan(solution, instance, distances, tolerance, true)
            .first()
            .copied()
            .map(Move::Swap),
        Operator::TwoOpt => two_opt::scan(solution, instance, distances, tolerance, true)
            .first()
            .copied()
            .map(Move::TwoOpt),
    }
}

/// Enumerates every improving move of the given type. Used by the VNS
/// shake step, which samples one at random instead of taking the first.
pub fn improving_moves(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    tolerance: f64,
    operator: Operator,
) -> Vec<Move> {
    match operator {
        Operator::Relocation => relocate::scan(solution, instance, distances, tolerance, false)
            .into_iter()
            .map(Move::Relocation)
            .collect(),
        Operator::Swap => swap::scan(solution, instance, distances, tolerance, false)
            .into_iter()
            .map(Move::Swap)
            .collect(),
        Operator::TwoOpt => two_opt::scan(solution, instance, distances, tolerance, false)
            .into_iter()
            .map(Move::TwoOpt)
            .collect(),
    }
}

/// Applies a move produced by [`find_improving`] or [`improving_moves`]
/// against the same solution state it was scanned from.
pub fn apply_move(
    solution: &mut Solution,
    mv: &Move,
    instance: &Instance,
    distances: &DistanceMatrix,
) {
    match mv {
        Move::Relocation(mv) => relocate::apply(solution, mv, instance),
        Move::Swap(mv) => swap::apply(solution, mv, instance),
        Move::TwoOpt(mv) => two_opt::apply(solution, mv, instance, distances),
    }
    debug_assert!(
        crate::evaluation::verify_solution(solution, instance, distances, 1e-4).is_empty(),
        "move application broke a route aggregate"
    );
}

/// Drives one operator to a local optimum with first-improvement descent.
///
/// Keeps a separate best-so-far copy and rejects any application that
/// regresses total duration, so the returned solution is never worse
/// than the input.
pub fn descend(
    solution: &Solution,
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
    operator: Operator,
) -> Solution {
    let mut current = solution.clone();
    let mut best = solution.clone();
    while let Some(mv) = find_improving(&current, instance, distances, params.tolerance, operator) {
        let snapshot = current.clone();
        apply_move(&mut current, &mv, instance, distances);
        if current.total_duration() > snapshot.total_duration() + params.tolerance {
            current = snapshot;
            break;
        }
        if current.total_duration() < best.total_duration() {
            best = current.clone();
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{refresh_route, verify_solution};
    use crate::models::{Node, Route};

    fn line_instance() -> (Instance, DistanceMatrix) {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0, 10, 0.0, 5.0),
            Node::new(2, 2.0, 0.0, 10, 0.0, 5.0),
            Node::new(3, 3.0, 0.0, 10, 0.0, 5.0),
            Node::new(4, 4.0, 0.0, 10, 0.0, 5.0),
        ];
        let instance = Instance::new(nodes, 2, 100, 1000.0).expect("valid");
        let dm = DistanceMatrix::from_nodes(instance.nodes());
        (instance, dm)
    }

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
    fn test_operator_from_index() {
        assert_eq!(Operator::from_index(0), Some(Operator::Relocation));
        assert_eq!(Operator::from_index(1), Some(Operator::Swap));
        assert_eq!(Operator::from_index(2), Some(Operator::TwoOpt));
        assert_eq!(Operator::from_index(3), None);
    }

    #[test]
    fn test_descend_reaches_local_optimum() {
        let (instance, dm) = line_instance();
        let sol = solution_with(&[&[3, 1], &[2, 4]], &instance, &dm);

        let optimized = descend(&sol, &instance, &dm, &SearchParams::default(), Operator::Swap);
        assert!(optimized.total_duration() <= sol.total_duration());
        assert!(
            find_improving(&optimized, &instance, &dm, 1e-4, Operator::Swap).is_none(),
            "descent must terminate only at a local optimum"
        );
        assert!(verify_solution(&optimized, &instance, &dm, 1e-4).is_empty());
    }

    #[test]
    fn test_descend_never_regresses() {
        let (instance, dm) = line_instance();
        let sol = solution_with(&[&[4, 2], &[1, 3]], &instance, &dm);
        for op in Operator::ALL {
            let optimized = descend(&sol, &instance, &dm, &SearchParams::default(), op);
            assert!(optimized.total_duration() <= sol.total_duration() + 1e-9);
        }
    }

    #[test]
    fn test_improving_moves_superset_of_first() {
        let (instance, dm) = line_instance();
        let sol = solution_with(&[&[3, 1], &[2, 4]], &instance, &dm);
        for op in Operator::ALL {
            let all = improving_moves(&sol, &instance, &dm, 1e-4, op);
            match find_improving(&sol, &instance, &dm, 1e-4, op) {
                Some(first) => assert_eq!(all.first(), Some(&first)),
                None => assert!(all.is_empty()),
            }
        }
    }

    #[test]
    fn test_applied_moves_preserve_customer_set() {
        let (instance, dm) = line_instance();
        let mut sol = solution_with(&[&[3, 1], &[2, 4]], &instance, &dm);
        let mut applied = 0;
        for op in Operator::ALL {
            while let Some(mv) = find_improving(&sol, &instance, &dm, 1e-4, op) {
                apply_move(&mut sol, &mv, &instance, &dm);
                applied += 1;
                if applied > 50 {
                    break;
                }
            }
        }
        let mut served: Vec<usize> = sol
            .routes()
            .iter()
            .flat_map(|r| r.customer_ids())
            .collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4]);
        assert!(verify_solution(&sol, &instance, &dm, 1e-4).is_empty());
    }
}
