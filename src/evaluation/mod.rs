//! Solution verification.
//!
//! - [`SolutionChecker`]: rebuilds loads, coverage and cost from the city
//!   centers and reports every [`Violation`]

mod checker;
mod violation;

pub use checker::SolutionChecker;
pub use violation::{Violation, ViolationType};
