//! # profit-routing
//!
//! Heuristic solver for profit-collecting vehicle routing (team
//! orienteering): a fixed fleet leaves a depot, serves a subset of
//! customers, and returns, maximizing collected profit under per-route
//! load capacity and duration limits. Not every customer need be
//! visited.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Instance, Route, Solution)
//! - [`distance`] — Precomputed Euclidean distance matrix
//! - [`evaluation`] — Route traversal costs and solution verification
//! - [`constructive`] — Constructive heuristics (Nearest Neighbor, Minimum Insertion, Savings Merge)
//! - [`local_search`] — Local search operators (Relocation, Swap, Two-Opt)
//! - [`vns`] — Variable Neighborhood Search controller
//! - [`solver`] — Facade running construct, descend, and VNS with restarts

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod params;
pub mod solver;
pub mod vns;
