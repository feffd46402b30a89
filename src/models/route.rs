//! Route type: a depot-bracketed node sequence with cached aggregates.

/// An ordered sequence of node ids served by one vehicle.
///
/// The sequence always starts and ends with the depot (id 0); the minimum
/// valid route is `[0, 0]`. The capacity and duration limits are copied from
/// the instance at creation and never change. The cached `load`, `travelled`
/// (travel plus service time), and `profit` aggregates are maintained by the
/// heuristics and move operators; [`crate::evaluation::refresh_route`]
/// recomputes them by full traversal.
///
/// # Examples
///
/// ```
/// use profit_routing::models::Route;
///
/// let route = Route::new(100, 500.0);
/// assert!(route.is_empty());
/// assert_eq!(route.sequence(), &[0, 0]);
/// assert_eq!(route.load(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    sequence: Vec<usize>,
    capacity: i32,
    max_duration: f64,
    load: i32,
    travelled: f64,
    profit: f64,
}

impl Route {
    /// Creates an empty route `[depot, depot]` with the given limits.
    pub fn new(capacity: i32, max_duration: f64) -> Self {
        Self {
            sequence: vec![0, 0],
            capacity,
            max_duration,
            load: 0,
            travelled: 0.0,
            profit: 0.0,
        }
    }

    /// The full node-id sequence, including both depot endpoints.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Number of customers on this route (excluding the depot endpoints).
    pub fn len(&self) -> usize {
        self.sequence.len() - 2
    }

    /// Returns `true` if this route serves no customers.
    pub fn is_empty(&self) -> bool {
        self.sequence.len() == 2
    }

    /// The customer ids in visit order (depot endpoints excluded).
    pub fn customer_ids(&self) -> Vec<usize> {
        self.sequence[1..self.sequence.len() - 1].to_vec()
    }

    /// Vehicle load capacity for this route.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Maximum duration allowed for this route.
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Cached load (sum of customer demands).
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Cached duration: travel distance plus service times.
    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    /// Cached profit (sum of customer profits).
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Inserts a node id at the given sequence position.
    ///
    /// The caller is responsible for keeping the cached aggregates in step.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is 0 or past the terminal depot.
    pub fn insert_node(&mut self, pos: usize, id: usize) {
        assert!(pos >= 1 && pos < self.sequence.len());
        self.sequence.insert(pos, id);
    }

    /// Removes and returns the node id at the given interior position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not address an interior node.
    pub fn remove_node(&mut self, pos: usize) -> usize {
        assert!(pos >= 1 && pos < self.sequence.len() - 1);
        self.sequence.remove(pos)
    }

    /// Replaces the node id at the given interior position, returning the
    /// previous occupant.
    pub fn replace_node(&mut self, pos: usize, id: usize) -> usize {
        std::mem::replace(&mut self.sequence[pos], id)
    }

    /// Reverses the sequence segment `[from..=to]` in place.
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        self.sequence[from..=to].reverse();
    }

    /// Splits off and returns the tail of the sequence starting at `pos`.
    pub fn split_off_tail(&mut self, pos: usize) -> Vec<usize> {
        self.sequence.split_off(pos)
    }

    /// Appends a tail produced by [`Route::split_off_tail`].
    pub fn extend_tail(&mut self, tail: Vec<usize>) {
        self.sequence.extend(tail);
    }

    /// Adds to the cached load.
    pub fn add_load(&mut self, delta: i32) {
        self.load += delta;
    }

    /// Adds to the cached travelled duration.
    pub fn add_travelled(&mut self, delta: f64) {
        self.travelled += delta;
    }

    /// Adds to the cached profit.
    pub fn add_profit(&mut self, delta: f64) {
        self.profit += delta;
    }

    /// Overwrites the cached load (used by full recomputation).
    pub fn set_load(&mut self, load: i32) {
        self.load = load;
    }

    /// Overwrites the cached travelled duration.
    pub fn set_travelled(&mut self, travelled: f64) {
        self.travelled = travelled;
    }

    /// Overwrites the cached profit.
    pub fn set_profit(&mut self, profit: f64) {
        self.profit = profit;
    }
}
