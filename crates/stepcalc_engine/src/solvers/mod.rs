//! One solver per [`SolverKind`].
//!
//! Every solver has the same shape: it reads the lowercased problem, appends
//! intermediate steps to the trace and returns an [`Outcome`]. The closing
//! `Result`/`Note` step is added by [`StepTrace::finish`], never here.

pub mod calculus;
pub mod combinatorics;
pub mod cubic;
pub mod expression;
pub mod factorial;
pub mod limit;
pub mod linear;
pub mod logarithm;
pub mod percentage;
pub mod power;
pub mod quadratic;
pub mod system;
pub mod trig;

use crate::classify::SolverKind;
use crate::error::SolveError;
use crate::options::SolverOptions;
use crate::trace::{Outcome, StepTrace};

/// Leading command words stripped before parsing.
const PROMPT_WORDS: [&str; 9] = [
    "what is",
    "solve for x",
    "solve",
    "find",
    "evaluate",
    "calculate",
    "compute",
    "simplify",
    "work out",
];

/// Drop leading instructions and trailing punctuation: `solve: 2x=4?` → `2x=4`.
pub fn strip_prompt(text: &str) -> &str {
    let mut rest = text.trim();
    loop {
        let before = rest;
        for word in PROMPT_WORDS {
            if let Some(tail) = rest.strip_prefix(word) {
                rest = tail.trim_start_matches(|c: char| c == ':' || c == ',').trim_start();
            }
        }
        if rest == before {
            break;
        }
    }
    rest.trim_end_matches(|c: char| matches!(c, '?' | '.' | ':')).trim_end()
}

/// Split `lhs = rhs`; both sides must be present.
pub fn split_equation(problem: &str) -> Result<(&str, &str), SolveError> {
    let hint = "Write the equation with a single '=' and an expression on each side.";
    let (lhs, rhs) = problem
        .split_once('=')
        .ok_or_else(|| SolveError::unsupported(format!("Could not solve: {}", problem), hint))?;
    let (lhs, rhs) = (lhs.trim(), rhs.trim());
    if lhs.is_empty() || rhs.is_empty() || rhs.contains('=') {
        return Err(SolveError::unsupported(
            format!("Could not solve: {}", problem),
            hint,
        ));
    }
    Ok((lhs, rhs))
}

pub fn dispatch(
    kind: SolverKind,
    problem: &str,
    trace: &mut StepTrace,
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let problem = strip_prompt(problem);
    match kind {
        SolverKind::Derivative => calculus::derivative(problem, trace),
        SolverKind::Integral => calculus::integral(problem, trace),
        SolverKind::Limit => limit::solve(problem, trace),
        SolverKind::TrigEquation => trig::solve_equation(problem, trace, options),
        SolverKind::System => system::solve(problem, trace),
        SolverKind::Cubic => cubic::solve(problem, trace),
        SolverKind::Quadratic => quadratic::solve(problem, trace),
        SolverKind::Equation => linear::solve(problem, trace),
        SolverKind::TrigEvaluation => trig::evaluate(problem, trace, options),
        SolverKind::Logarithm => logarithm::solve(problem, trace),
        SolverKind::Factorial => factorial::solve(problem, trace, options),
        SolverKind::Combinatorics => combinatorics::solve(problem, trace, options),
        SolverKind::ExponentRoot => power::solve(problem, trace),
        SolverKind::Percentage => percentage::solve(problem, trace),
        SolverKind::Expression => expression::solve(problem, trace),
    }
}
