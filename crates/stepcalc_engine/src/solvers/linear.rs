//! Linear equations in one variable, and numeric equality checks.

use super::split_equation;
use crate::error::SolveError;
use crate::numeric;
use crate::terms::{find_variable, format_monomial, join_terms, paren, parse_monomial, split_terms};
use crate::trace::{Outcome, StepTrace};
use stepcalc_types::format_number;
use tracing::debug;

const LINEAR_HINT: &str =
    "Linear equations look like ax + b = cx + d, e.g. 2x + 5 = 15 or x/3 - 1 = 4.";

/// Two values are equal when they agree to within a relative 1e-9.
const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Build narration for the collect step: `Move terms in x to the left ...`.
pub fn collect_message(var: char) -> String {
    format!(
        "Addition Property of Equality: move terms in {} to the left side and constants to the right side",
        var
    )
}

/// Build narration for the division step.
pub fn divide_message(coeff_display: &str) -> String {
    format!(
        "Division Property of Equality: divide both sides by {}",
        coeff_display
    )
}

/// Collapse one side into `coeff·var + constant`.
fn linear_side(side: &str, var: char) -> Result<(f64, f64), SolveError> {
    let mut coeff = 0.0;
    let mut constant = 0.0;

    for term in split_terms(side) {
        let m = parse_monomial(&term, var).ok_or_else(|| {
            SolveError::unsupported(format!("Could not solve: {}", side), LINEAR_HINT)
        })?;
        match m.power {
            p if p == 0.0 => constant += m.coeff,
            p if p == 1.0 => coeff += m.coeff,
            _ => {
                return Err(SolveError::unsupported(
                    format!("Not a linear equation: {} has degree {}", term, format_number(m.power)),
                    LINEAR_HINT,
                ))
            }
        }
    }
    Ok((coeff, constant))
}

fn show_side(coeff: f64, constant: f64, var: char) -> String {
    join_terms(&[format_monomial(coeff, var, 1.0), format_number(constant)])
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let (lhs, rhs) = split_equation(problem)?;
    match find_variable(problem) {
        Some(var) => solve_linear(lhs, rhs, var, trace),
        None => compare_sides(lhs, rhs, trace),
    }
}

fn solve_linear(
    lhs: &str,
    rhs: &str,
    var: char,
    trace: &mut StepTrace,
) -> Result<Outcome, SolveError> {
    let (a, b) = linear_side(lhs, var)?;
    let (c, d) = linear_side(rhs, var)?;
    debug!(a, b, c, d, %var, "linear sides collected");

    trace.simplify(
        format!("{} = {}", show_side(a, b, var), show_side(c, d, var)),
        "Combine like terms on each side",
    );

    let k = a - c;
    let m = d - b;
    let left = if c == 0.0 {
        format_monomial(a, var, 1.0)
    } else {
        format!("({} - {}){}", format_number(a), paren(c), var)
    };
    let right = if b == 0.0 {
        format_number(d)
    } else {
        format!("{} - {}", format_number(d), paren(b))
    };
    trace.rule(format!("{} = {}", left, right), collect_message(var));
    trace.calculate(
        format!("{} = {}", format_monomial(k, var, 1.0), format_number(m)),
        "Simplify both sides",
    );

    finish_linear(var, k, m, trace)
}

/// Solve `k·var = m` and record the division.
pub(crate) fn finish_linear(
    var: char,
    k: f64,
    m: f64,
    trace: &mut StepTrace,
) -> Result<Outcome, SolveError> {
    if k == 0.0 {
        return Ok(if m == 0.0 {
            trace.note(
                "0 = 0",
                format!("The equation holds for every value of {}", var),
            );
            Outcome::answer("Infinite solutions")
        } else {
            trace.note(
                format!("0 = {}", format_number(m)),
                "The equation is a contradiction",
            );
            Outcome::answer("No solution")
        });
    }

    let value = m / k;
    if k != 1.0 {
        trace.rule(
            format!("{} = {} / {}", var, format_number(m), paren(k)),
            divide_message(&format_number(k)),
        );
    }
    Ok(Outcome::numeric(
        format!("{} = {}", var, format_number(value)),
        value,
    ))
}

fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EQUALITY_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// An equation without unknowns is a claim to check.
fn compare_sides(lhs: &str, rhs: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let left = numeric::evaluate(lhs)?;
    let right = numeric::evaluate(rhs)?;
    trace.calculate(
        format!("{} = {}", lhs, format_number(left)),
        "Evaluate the left side",
    );
    trace.calculate(
        format!("{} = {}", rhs, format_number(right)),
        "Evaluate the right side",
    );

    let holds = approx_equal(left, right);
    let relation = if holds { "=" } else { "≠" };
    trace.rule(
        format!("{} {} {}", format_number(left), relation, format_number(right)),
        "Compare both sides",
    );
    Ok(Outcome::answer(if holds { "True" } else { "False" }))
}
