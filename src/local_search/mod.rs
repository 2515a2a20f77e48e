//! Local search for complete facility location solutions.
//!
//! - [`explore_reassignment`]: one scan of the reassignment neighborhood
//!   under a first- or best-improvement policy
//! - [`local_search`]: repeats scans until a local optimum or the deadline

mod reassignment;
mod search;

pub use reassignment::{
    apply_move, cheapest_feasible_type, evaluate_move, explore_reassignment, Move,
};
pub use search::{improve, local_search, LocalSearchOutcome};
