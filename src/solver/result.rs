use std::time::Duration;

use crate::models::Solution;

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolverResult<'a> {
    /// Best solution found; infeasible if none was.
    pub solution: Solution<'a>,
    /// Constructions performed.
    pub iterations: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Iteration at which the returned solution was found (0 if none).
    pub best_iteration: usize,
}

impl<'a> SolverResult<'a> {
    /// Result for a run that found nothing.
    pub fn infeasible(solution: Solution<'a>, iterations: usize, elapsed: Duration) -> Self {
        Self {
            solution,
            iterations,
            elapsed,
            best_iteration: 0,
        }
    }

    /// Returns `true` if a feasible solution was found.
    pub fn is_feasible(&self) -> bool {
        self.solution.is_feasible()
    }

    /// Cost of the returned solution (+∞ when infeasible).
    pub fn cost(&self) -> f64 {
        self.solution.cost()
    }
}
