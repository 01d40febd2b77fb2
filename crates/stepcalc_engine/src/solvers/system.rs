//! Systems of equations: method guidance only.

use crate::error::SolveError;
use crate::numeric::standalone_letters;
use crate::trace::{Outcome, StepTrace};

fn equations(problem: &str) -> Vec<&str> {
    problem
        .split(';')
        .flat_map(|part| part.split(" and "))
        .flat_map(|part| part.split(','))
        .map(str::trim)
        .filter(|eq| eq.contains('='))
        .collect()
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let eqs = equations(problem);
    if eqs.is_empty() {
        return Err(SolveError::unsupported(
            format!("Could not solve: {}", problem),
            "Separate the equations with ';' or 'and', e.g. x + y = 3; x - y = 1.",
        ));
    }

    for (i, eq) in eqs.iter().enumerate() {
        trace.simplify(*eq, format!("Equation {}", i + 1));
    }

    let unknowns: Vec<String> = standalone_letters(problem)
        .into_iter()
        .filter(|&c| c != 'e')
        .map(String::from)
        .collect();
    if !unknowns.is_empty() {
        trace.note(
            format!("Unknowns: {}", unknowns.join(", ")),
            format!(
                "{} equation(s) in {} unknown(s)",
                eqs.len(),
                unknowns.len()
            ),
        );
    }

    trace.note(
        "Substitution method",
        "Solve one equation for one unknown and substitute the result into the others",
    );
    trace.note(
        "Elimination method",
        "Add or subtract multiples of the equations so that one unknown cancels",
    );

    Ok(Outcome::guidance(
        "System of equations: use substitution or elimination to reduce to one unknown at a time",
    ))
}
