//! Search configuration.
//!
//! All tunable scalars consumed by the heuristics live here, threaded
//! explicitly through every constructor and search call. A tuning driver
//! builds a fresh `SearchParams` per run; nothing in the crate mutates one.

use serde::{Deserialize, Serialize};

/// Tunable parameters for construction, local search, and VNS.
///
/// # Examples
///
/// ```
/// use profit_routing::params::SearchParams;
///
/// let params = SearchParams::default()
///     .with_rcl_size(4)
///     .with_restarts(10);
/// assert_eq!(params.rcl_size, 4);
/// assert_eq!(params.restarts, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Restricted-candidate-list size for the randomized constructions.
    pub rcl_size: usize,
    /// Exponent on appended duration in the nearest-neighbor score
    /// `profit / append_duration^e`.
    pub nn_exponent: f64,
    /// Exponent on the marginal duration delta in the minimum-insertion
    /// cost `delta^e / profit`.
    pub insertion_exponent: f64,
    /// Paessens `g` multiplier on the pairwise profit density in the
    /// savings score.
    pub savings_shape: f64,
    /// Paessens `f` multiplier on the depot-density asymmetry term.
    pub savings_asymmetry: f64,
    /// Numeric tolerance: a move only counts as improving when its delta is
    /// below `-tolerance`.
    pub tolerance: f64,
    /// Cap on repeated descents inside VNS BestImprovement.
    pub max_descent_rounds: usize,
    /// Highest neighborhood index used by VNS (0 = Relocation, 1 = Swap,
    /// 2 = Two-Opt).
    pub kmax: usize,
    /// Multi-start rounds run by the solver facade.
    pub restarts: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            rcl_size: 3,
            nn_exponent: 0.9,
            insertion_exponent: 0.6,
            savings_shape: 1.4,
            savings_asymmetry: 0.5,
            tolerance: 1e-4,
            max_descent_rounds: 20,
            kmax: 2,
            restarts: 5,
        }
    }
}

impl SearchParams {
    /// Sets the restricted-candidate-list size.
    pub fn with_rcl_size(mut self, size: usize) -> Self {
        self.rcl_size = size;
        self
    }

    /// Sets the nearest-neighbor duration exponent.
    pub fn with_nn_exponent(mut self, e: f64) -> Self {
        self.nn_exponent = e;
        self
    }

    /// Sets the minimum-insertion delta exponent.
    pub fn with_insertion_exponent(mut self, e: f64) -> Self {
        self.insertion_exponent = e;
        self
    }

    /// Sets the Paessens savings multipliers `g` and `f`.
    pub fn with_savings_multipliers(mut self, g: f64, f: f64) -> Self {
        self.savings_shape = g;
        self.savings_asymmetry = f;
        self
    }

    /// Sets the improving-move tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Sets the BestImprovement descent cap.
    pub fn with_max_descent_rounds(mut self, rounds: usize) -> Self {
        self.max_descent_rounds = rounds;
        self
    }

    /// Sets the highest VNS neighborhood index.
    pub fn with_kmax(mut self, kmax: usize) -> Self {
        self.kmax = kmax;
        self
    }

    /// Sets the solver's multi-start round count.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
}
