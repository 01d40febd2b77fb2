//! Plain arithmetic, the fallback for every unclassified problem.

use crate::error::SolveError;
use crate::numeric::{self, standalone_letters, E_LITERAL, PI_LITERAL};
use crate::trace::{Outcome, StepTrace};
use stepcalc_types::format_number;

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let letters = standalone_letters(problem);
    let mut constants = Vec::new();
    if problem.contains("pi") {
        constants.push(format!("π ≈ {}", PI_LITERAL));
    }
    if letters.contains(&'e') {
        constants.push(format!("e ≈ {}", E_LITERAL));
    }

    let substituted = numeric::substitute_constants(problem);
    if !constants.is_empty() && substituted != problem {
        trace.substitute(
            substituted.clone(),
            format!("Substitute constants: {}", constants.join(", ")),
        );
    }

    trace.rule(
        "( ) → ^ → × ÷ → + −",
        "Order of Operations: parentheses, exponents, multiplication and division, then addition and subtraction",
    );
    let value = numeric::evaluate(&substituted)?;
    trace.calculate(
        format!("{} = {}", problem, format_number(value)),
        "Evaluate from the innermost parentheses outward",
    );
    Ok(Outcome::value(value))
}
