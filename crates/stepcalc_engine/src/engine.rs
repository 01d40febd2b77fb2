use crate::classify::classify;
use crate::error::SolveError;
use crate::options::SolverOptions;
use crate::solvers;
use crate::trace::StepTrace;
use stepcalc_parser::normalize;
use stepcalc_types::SolveResult;
use tracing::{debug, warn};

/// Entry point: normalize, classify, dispatch, and always return a trace.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: SolverOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Solve raw (possibly OCR-damaged) text.
    pub fn solve(&self, raw: &str) -> SolveResult {
        let normalized = normalize(raw);
        debug!(raw, normalized = %normalized, "normalized input");
        self.solve_normalized(&normalized)
    }

    /// Solve text that has already been through [`normalize`].
    pub fn solve_normalized(&self, normalized: &str) -> SolveResult {
        let lowered = normalized.to_lowercase();
        let kind = classify(&lowered);
        debug!(?kind, input = normalized, "dispatching");

        let mut trace = StepTrace::new();
        trace.problem(normalized, kind.description());

        if solvers::strip_prompt(&lowered).is_empty() {
            return trace.fail(
                normalized,
                SolveError::unsupported(
                    "Could not solve: empty input",
                    "Enter an expression, an equation or a question such as 'derivative of x^2'.",
                ),
            );
        }

        match solvers::dispatch(kind, &lowered, &mut trace, &self.options) {
            Ok(outcome) => trace.finish(outcome),
            Err(err) => {
                warn!(?kind, input = normalized, %err, "solver failed");
                trace.fail(normalized, err)
            }
        }
    }
}

/// Solve with default options.
pub fn solve(raw: &str) -> SolveResult {
    Engine::new().solve(raw)
}
