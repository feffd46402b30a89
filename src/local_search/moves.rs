//! Move descriptors.
//!
//! Transient records describing one candidate perturbation: the
//! route/position coordinates it touches and the duration deltas it would
//! apply (split per affected route for cross-route moves). They live only
//! between "find" and "apply" and are never persisted.

/// A 1-0 move: remove one customer and reinsert it elsewhere.
///
/// `origin_pos` is the customer's interior sequence position; `target_pos`
/// is the predecessor position in the target route (the customer lands just
/// after it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelocationMove {
    /// Index of the route losing the customer.
    pub origin_route: usize,
    /// Interior position of the customer in the origin route.
    pub origin_pos: usize,
    /// Index of the route receiving the customer.
    pub target_route: usize,
    /// Predecessor position in the target route.
    pub target_pos: usize,
    /// Duration change of the origin route (includes the service time
    /// leaving with the customer).
    pub origin_delta: f64,
    /// Duration change of the target route (includes the arriving service
    /// time).
    pub target_delta: f64,
    /// Net change in total duration.
    pub delta: f64,
}

/// A 1-1 move: two customers exchange positions, possibly across routes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    /// Index of the first route.
    pub first_route: usize,
    /// Interior position of the first customer.
    pub first_pos: usize,
    /// Index of the second route (`>= first_route`).
    pub second_route: usize,
    /// Interior position of the second customer.
    pub second_pos: usize,
    /// Duration change of the first route (cross-route case only; equals
    /// `delta` within one route).
    pub first_delta: f64,
    /// Duration change of the second route.
    pub second_delta: f64,
    /// Net change in total duration.
    pub delta: f64,
}

/// A 2-opt move: remove edges `(A, B)` and `(K, L)` and reconnect, either
/// reversing an interior segment (same route) or exchanging route tails
/// (cross route).
///
/// Positions index the first endpoint of each removed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// Index of the first route.
    pub first_route: usize,
    /// Position of `A` (edge `A → B`).
    pub first_pos: usize,
    /// Index of the second route (`>= first_route`).
    pub second_route: usize,
    /// Position of `K` (edge `K → L`).
    pub second_pos: usize,
    /// Net change in total duration.
    pub delta: f64,
}

/// Any candidate move produced by one of the three neighborhoods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    /// 1-0 relocation.
    Relocation(RelocationMove),
    /// 1-1 exchange.
    Swap(SwapMove),
    /// Edge pair removal and reconnection.
    TwoOpt(TwoOptMove),
}

impl Move {
    /// Net change in total duration this move would apply.
    pub fn delta(&self) -> f64 {
        match self {
            Move::Relocation(m) => m.delta,
            Move::Swap(m) => m.delta,
            Move::TwoOpt(m) => m.delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_delta_dispatch() {
        let relocation = Move::Relocation(RelocationMove {
            origin_route: 0,
            origin_pos: 1,
            target_route: 1,
            target_pos: 0,
            origin_delta: -3.0,
            target_delta: 1.0,
            delta: -2.0,
        });
        assert!((relocation.delta() + 2.0).abs() < 1e-10);

        let two_opt = Move::TwoOpt(TwoOptMove {
            first_route: 0,
            first_pos: 0,
            second_route: 0,
            second_pos: 2,
            delta: -1.5,
        });
        assert!((two_opt.delta() + 1.5).abs() < 1e-10);
    }
}
