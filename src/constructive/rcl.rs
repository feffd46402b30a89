//! Restricted candidate list (RCL).
//!
//! A bounded top-K structure holding the best-scoring candidates seen so
//! far, from which one entry is drawn uniformly at random (GRASP-style
//! greediness/diversification balance).

use rand::Rng;

/// Whether lower or higher scores are better for a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Keep the candidates with the lowest scores (cost-like keys).
    Minimize,
    /// Keep the candidates with the highest scores (density-like keys).
    Maximize,
}

/// A fixed-capacity list of the K best-scoring candidates.
///
/// Scores that are not finite are rejected on push. Ties keep the earlier
/// entry, so insertion order breaks ties deterministically.
///
/// # Examples
///
/// ```
/// use profit_routing::constructive::{CandidateList, Objective};
///
/// let mut rcl = CandidateList::new(2, Objective::Maximize);
/// rcl.push(1.0, "a");
/// rcl.push(3.0, "b");
/// rcl.push(2.0, "c");
/// assert_eq!(rcl.len(), 2); // keeps "b" and "c"
/// ```
#[derive(Debug, Clone)]
pub struct CandidateList<T> {
    capacity: usize,
    objective: Objective,
    entries: Vec<(f64, T)>,
}

impl<T> CandidateList<T> {
    /// Creates an empty list keeping at most `capacity` candidates.
    pub fn new(capacity: usize, objective: Objective) -> Self {
        Self {
            capacity,
            objective,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Offers a candidate; it is kept only while it ranks among the K best.
    pub fn push(&mut self, score: f64, item: T) {
        if self.capacity == 0 || !score.is_finite() {
            return;
        }
        let pos = match self.objective {
            Objective::Minimize => self
                .entries
                .partition_point(|(s, _)| s.total_cmp(&score).is_le()),
            Objective::Maximize => self
                .entries
                .partition_point(|(s, _)| s.total_cmp(&score).is_ge()),
        };
        if pos >= self.capacity {
            return;
        }
        self.entries.insert(pos, (score, item));
        self.entries.truncate(self.capacity);
    }

    /// Number of candidates currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no candidate survived the feasibility filters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draws one candidate uniformly at random, consuming the list.
    ///
    /// Returns `None` when the list is empty.
    pub fn pick<R: Rng>(mut self, rng: &mut R) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        Some(self.entries.swap_remove(index).1)
    }
}
