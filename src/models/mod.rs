//! Domain model types for profit-collecting vehicle routing.
//!
//! Provides the core abstractions: nodes with demand, service time, and
//! profit; an immutable validated problem instance; routes as
//! depot-bracketed node sequences with cached aggregates; and solutions
//! holding routes plus unassigned customers.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::Instance;
pub use node::Node;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
