//! Quadratic equations via the discriminant and the quadratic formula.

use super::linear::finish_linear;
use crate::error::SolveError;
use crate::terms::{find_variable, paren, polynomial, show_polynomial};
use crate::trace::{Outcome, StepTrace};
use stepcalc_types::format_number;
use tracing::debug;

const QUADRATIC_HINT: &str =
    "Quadratic equations look like ax^2 + bx + c = 0, e.g. x^2 - 5x + 6 = 0.";

/// `|Δ|` below this counts as a repeated root.
const DISCRIMINANT_EPSILON: f64 = 1e-12;

/// Compute the quadratic discriminant `b^2 - 4ac`.
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

/// Both real roots `(x1, x2)` with `x1 = (-b + √Δ) / 2a`, `x2 = (-b - √Δ) / 2a`.
pub fn real_roots(a: f64, b: f64, delta: f64) -> (f64, f64) {
    let sqrt_delta = delta.sqrt();
    ((-b + sqrt_delta) / (2.0 * a), (-b - sqrt_delta) / (2.0 * a))
}

fn coefficients(problem: &str, var: char) -> Result<[f64; 3], SolveError> {
    let unsupported = || SolveError::unsupported(format!("Could not solve: {}", problem), QUADRATIC_HINT);
    let (lhs, rhs) = problem.split_once('=').unwrap_or((problem, "0"));
    if rhs.contains('=') {
        return Err(unsupported());
    }
    let left = polynomial(lhs, var).ok_or_else(unsupported)?;
    let right = polynomial(rhs, var).ok_or_else(unsupported)?;
    if left[3] - right[3] != 0.0 {
        return Err(unsupported());
    }
    Ok([left[0] - right[0], left[1] - right[1], left[2] - right[2]])
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let var = find_variable(problem).unwrap_or('x');
    let [c, b, a] = coefficients(problem, var)?;
    debug!(a, b, c, "quadratic coefficients");

    let standard = format!("{} = 0", show_polynomial(&[c, b, a], var));
    let explanation = if problem.contains('=') {
        "Move every term to the left side: ax² + bx + c = 0"
    } else {
        "No right side given, so the expression is set equal to 0"
    };
    trace.simplify(standard, explanation);
    trace.substitute(
        format!(
            "a = {}, b = {}, c = {}",
            format_number(a),
            format_number(b),
            format_number(c)
        ),
        "Identify the coefficients",
    );

    if a == 0.0 {
        trace.note(
            "a = 0",
            "Without a squared term the equation is linear",
        );
        return finish_linear(var, b, -c, trace);
    }

    let delta = discriminant(a, b, c);
    trace.rule(
        "Δ = b² - 4ac",
        "Discriminant: its sign decides how many real roots exist",
    );
    trace.calculate(
        format!("Δ = {}", format_number(delta)),
        format!(
            "{}² - 4 × {} × {} = {}",
            paren(b),
            paren(a),
            paren(c),
            format_number(delta)
        ),
    );

    let two_a = format_number(2.0 * a);
    let neg_b = format_number(-b);

    if delta.abs() < DISCRIMINANT_EPSILON {
        let root = -b / (2.0 * a);
        trace.rule(
            format!("{} = -b / 2a", var),
            "Δ = 0, so there is one repeated real root",
        );
        trace.calculate(
            format!("{} = {} / {} = {}", var, neg_b, two_a, format_number(root)),
            "Substitute a and b",
        );
        return Ok(Outcome::numeric(
            format!("{} = {}", var, format_number(root)),
            root,
        ));
    }

    if delta > 0.0 {
        let (x1, x2) = real_roots(a, b, delta);
        let sqrt_delta = format_number(delta.sqrt());
        trace.rule(
            format!("{} = (-b ± √Δ) / 2a", var),
            "Quadratic Formula: Δ > 0 gives two distinct real roots",
        );
        trace.calculate(
            format!(
                "{}₁ = ({} + {}) / {} = {}",
                var,
                neg_b,
                sqrt_delta,
                two_a,
                format_number(x1)
            ),
            "Take the + sign",
        );
        trace.calculate(
            format!(
                "{}₂ = ({} - {}) / {} = {}",
                var,
                neg_b,
                sqrt_delta,
                two_a,
                format_number(x2)
            ),
            "Take the - sign",
        );
        return Ok(Outcome::answer(format!(
            "{v}₁ = {}, {v}₂ = {}",
            format_number(x1),
            format_number(x2),
            v = var
        )));
    }

    let real = -b / (2.0 * a);
    let imaginary = ((-delta).sqrt() / (2.0 * a)).abs();
    trace.note(
        format!("Δ = {} < 0", format_number(delta)),
        "No real roots: the roots are a complex conjugate pair",
    );
    trace.rule(
        format!("{} = (-b ± i√(-Δ)) / 2a", var),
        "Quadratic Formula with the imaginary unit i = √(-1)",
    );
    trace.calculate(
        format!(
            "real part = {}, imaginary part = {}",
            format_number(real),
            format_number(imaginary)
        ),
        "Evaluate -b / 2a and √(-Δ) / 2a",
    );
    Ok(Outcome::answer(format!(
        "{} = {} ± {}i",
        var,
        format_number(real),
        format_number(imaginary)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepcalc_types::StepKind;

    fn run(problem: &str) -> (Outcome, StepTrace) {
        let mut trace = StepTrace::new();
        let outcome = solve(problem, &mut trace).unwrap();
        (outcome, trace)
    }

    #[test]
    fn two_real_roots_with_discriminant_step() {
        let (outcome, trace) = run("x^2-5x+6=0");
        assert_eq!(outcome, Outcome::answer("x₁ = 3, x₂ = 2"));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.kind == StepKind::Calculate && s.expression == "Δ = 1"));
    }

    #[test]
    fn repeated_root() {
        let (outcome, _) = run("x^2-4x+4=0");
        assert_eq!(outcome, Outcome::numeric("x = 2", 2.0));
    }

    #[test]
    fn complex_roots() {
        let (outcome, trace) = run("x^2+2x+5=0");
        assert_eq!(outcome, Outcome::answer("x = -1 ± 2i"));
        assert!(trace.steps().iter().any(|s| s.kind == StepKind::Note));
    }

    #[test]
    fn terms_on_both_sides_and_missing_rhs() {
        assert_eq!(run("x^2=4").0, Outcome::answer("x₁ = 2, x₂ = -2"));
        assert_eq!(run("x^2-9").0, Outcome::answer("x₁ = 3, x₂ = -3"));
        assert_eq!(run("2x^2=x^2+x").0, Outcome::answer("x₁ = 1, x₂ = 0"));
    }

    #[test]
    fn vanishing_square_term_falls_back_to_linear() {
        assert_eq!(run("x^2+2x=x^2+4").0, Outcome::numeric("x = 2", 2.0));
    }

    #[test]
    fn discriminant_values() {
        assert_eq!(discriminant(1.0, -5.0, 6.0), 1.0);
        assert_eq!(real_roots(1.0, -5.0, 1.0), (3.0, 2.0));
    }
}
