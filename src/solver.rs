//! Solver facade: construct, descend, then VNS, over several restarts.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constructive::{min_insertion, nearest_neighbor, savings_merge};
use crate::distance::DistanceMatrix;
use crate::local_search::{descend, Operator};
use crate::models::{Instance, Solution};
use crate::params::SearchParams;
use crate::vns::variable_neighborhood_search;

/// Owns a problem instance together with its precomputed distance
/// matrix and tuning parameters, and runs the full heuristic pipeline.
///
/// # Example
///
/// ```
/// use profit_routing::models::{Instance, Node};
/// use profit_routing::params::SearchParams;
/// use profit_routing::solver::Solver;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 3.0, 4.0, 10, 1.0, 20.0),
///     Node::new(2, 6.0, 0.0, 10, 1.0, 15.0),
/// ];
/// let instance = Instance::new(nodes, 2, 50, 100.0).unwrap();
/// let solver = Solver::new(instance, SearchParams::default());
/// let solution = solver.solve(42);
/// assert!(solution.total_profit() > 0.0);
/// ```
pub struct Solver {
    instance: Instance,
    distances: DistanceMatrix,
    params: SearchParams,
}

impl Solver {
    pub fn new(instance: Instance, params: SearchParams) -> Self {
        let distances = DistanceMatrix::from_nodes(instance.nodes());
        Solver {
            instance,
            distances,
            params,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Runs `params.restarts` rounds of construct, descend, and VNS,
    /// cycling through the constructive heuristics, and returns the best
    /// solution seen. Identical seeds yield identical solutions.
    pub fn solve(&self, seed: u64) -> Solution {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut best: Option<Solution> = None;

        for restart in 0..self.params.restarts {
            let constructed = match restart % 3 {
                0 => min_insertion(&self.instance, &self.distances, &self.params, &mut rng),
                1 => nearest_neighbor(&self.instance, &self.distances, &self.params, &mut rng),
                _ => savings_merge(&self.instance, &self.distances, &self.params),
            };

            let mut current = constructed;
            for operator in Operator::ALL {
                current = descend(&current, &self.instance, &self.distances, &self.params, operator);
            }
            current = variable_neighborhood_search(
                &current,
                self.params.kmax,
                &self.instance,
                &self.distances,
                &self.params,
                &mut rng,
            );

            best = Some(match best.take() {
                Some(incumbent) if !improves(&current, &incumbent) => incumbent,
                _ => current,
            });
        }

        best.unwrap_or_default()
    }
}

/// Ranks solutions by total profit, breaking ties on total duration.
fn improves(candidate: &Solution, incumbent: &Solution) -> bool {
    let profit_gap = candidate.total_profit() - incumbent.total_profit();
    if profit_gap.abs() > 1e-9 {
        return profit_gap > 0.0;
    }
    candidate.total_duration() < incumbent.total_duration()
}
