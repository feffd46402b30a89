//! Basic Variable Neighborhood Search over the local search operators.
//!
//! Neighborhood index `k` maps to an operator (0 relocation, 1 swap,
//! 2 two-opt). Each round shakes the current solution within
//! neighborhood `k`, descends to a local optimum, and either accepts
//! the result and restarts at `k = 0` or moves on to the next
//! neighborhood. The loop ends once `k` passes `kmax`.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::local_search::{apply_move, descend, improving_moves, Operator};
use crate::models::{Instance, Solution};
use crate::params::SearchParams;

/// Randomized perturbation step. Enumerates every improving move of
/// neighborhood `k` and applies one chosen uniformly at random; returns
/// the solution unchanged when the neighborhood is exhausted.
pub fn shake<R: Rng>(
    solution: &Solution,
    k: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
    rng: &mut R,
) -> Solution {
    let Some(operator) = Operator::from_index(k) else {
        return solution.clone();
    };
    let moves = improving_moves(solution, instance, distances, params.tolerance, operator);
    if moves.is_empty() {
        return solution.clone();
    }
    let mut shaken = solution.clone();
    let pick = rng.random_range(0..moves.len());
    apply_move(&mut shaken, &moves[pick], instance, distances);
    shaken
}

/// Repeated descent within neighborhood `k`, accepting each pass only
/// while it strictly improves total duration. Capped at
/// `params.max_descent_rounds` passes so floating-point cycles cannot
/// stall the controller.
pub fn best_improvement(
    solution: &Solution,
    k: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
) -> Solution {
    let Some(operator) = Operator::from_index(k) else {
        return solution.clone();
    };
    let mut current = solution.clone();
    for _ in 0..params.max_descent_rounds {
        let next = descend(&current, instance, distances, params, operator);
        if next.total_duration() < current.total_duration() - params.tolerance {
            current = next;
        } else {
            break;
        }
    }
    current
}

/// Move-or-not decision: accept `candidate` and restart at the most
/// local neighborhood, or keep `current` and advance `k`.
fn neighbourhood_change(current: Solution, candidate: Solution, k: usize) -> (Solution, usize) {
    if candidate.total_duration() < current.total_duration() {
        (candidate, 0)
    } else {
        (current, k + 1)
    }
}

/// Runs the VNS main loop from `initial` until the neighborhood index
/// exceeds `kmax`. The returned solution's total duration is never
/// worse than the initial one's.
pub fn variable_neighborhood_search<R: Rng>(
    initial: &Solution,
    kmax: usize,
    instance: &Instance,
    distances: &DistanceMatrix,
    params: &SearchParams,
    rng: &mut R,
) -> Solution {
    let mut current = initial.clone();
    let mut k = 0;
    while k <= kmax {
        let shaken = shake(&current, k, instance, distances, params, rng);
        let candidate = best_improvement(&shaken, k, instance, distances, params);
        let (next, next_k) = neighbourhood_change(current, candidate, k);
        current = next;
        k = next_k;
    }
    current
}
