//! Exponents and roots.

use crate::error::SolveError;
use crate::numeric::{self, Func};
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;

/// A literal power such as `2^10` or `4^-1`.
static LITERAL_POWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\^(-?\d+(?:\.\d+)?)").expect("valid regex literal")
});

/// A power whose exponent is a parenthesized numeric group, such as `8^(1/3)`.
static GROUPED_POWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\^\(([0-9.+\-*/]+)\)").expect("valid regex literal")
});

fn describe_power(base: &str, exponent: &str) -> &'static str {
    match exponent {
        "0" => "Zero Exponent Rule: a⁰ = 1",
        e if e.starts_with('-') => "Negative Exponent Rule: a⁻ⁿ = 1 / aⁿ",
        e if e.contains('.') => "Fractional exponent: a^(p/q) is the q-th root of a^p",
        _ if base == "1" => "1 raised to any power is 1",
        _ => "Repeated multiplication: aⁿ = a × a × ... × a (n factors)",
    }
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    for caps in LITERAL_POWER_RE.captures_iter(problem) {
        let literal = format!("{}^{}", &caps[1], &caps[2]);
        let value = numeric::evaluate(&literal)?;
        trace.rule_once("aⁿ", describe_power(&caps[1], &caps[2]));
        trace.calculate(
            format!("{} = {}", literal, format_number(value)),
            format!("{} raised to the power {}", &caps[1], &caps[2]),
        );
    }

    for caps in GROUPED_POWER_RE.captures_iter(problem) {
        let exponent = format_number(numeric::evaluate(&caps[2])?);
        let literal = format!("{}^({})", &caps[1], &caps[2]);
        let value = numeric::evaluate(&literal)?;
        trace.rule_once("aⁿ", describe_power(&caps[1], &exponent));
        trace.calculate(
            format!("{} = {}", literal, format_number(value)),
            format!("{} raised to the power {}", &caps[1], exponent),
        );
    }

    let mut handler = |func: Func, arg: f64| -> Result<f64, SolveError> {
        let shown = format_number(arg);
        match func {
            Func::Sqrt => {
                trace.rule_once(
                    "√a = b where b² = a and b ≥ 0",
                    "Square Root: the non-negative number whose square is a",
                );
                let value = numeric::apply_standard(func, arg)?;
                trace.calculate(
                    format!("√{} = {}", shown, format_number(value)),
                    format!("{}² = {}", format_number(value), shown),
                );
                Ok(value)
            }
            Func::Cbrt => {
                trace.rule_once(
                    "∛a = b where b³ = a",
                    "Cube Root: the number whose cube is a",
                );
                let value = numeric::apply_standard(func, arg)?;
                trace.calculate(
                    format!("∛{} = {}", shown, format_number(value)),
                    format!("{}³ = {}", format_number(value), shown),
                );
                Ok(value)
            }
            other => {
                let value = numeric::apply_standard(other, arg)?;
                trace.calculate(
                    format!("{}({}) = {}", other.name(), shown, format_number(value)),
                    format!("Evaluate {}", other.name()),
                );
                Ok(value)
            }
        }
    };

    let value = numeric::evaluate_with(problem, &mut handler)?;
    let last_shown = trace
        .steps()
        .last()
        .is_some_and(|s| s.expression.ends_with(&format!("= {}", format_number(value))));
    if !last_shown {
        trace.calculate(
            format!("{} = {}", problem, format_number(value)),
            "Evaluate the expression",
        );
    }
    Ok(Outcome::value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepcalc_types::StepKind;

    fn run(problem: &str) -> Result<(Outcome, StepTrace), SolveError> {
        let mut trace = StepTrace::new();
        let outcome = solve(problem, &mut trace)?;
        Ok((outcome, trace))
    }

    #[test]
    fn square_root() {
        let (outcome, trace) = run("sqrt(16)").unwrap();
        assert_eq!(outcome, Outcome::value(4.0));
        assert!(trace.steps().iter().any(|s| s.expression == "√16 = 4"));
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn bare_root_and_cube_root() {
        assert_eq!(run("sqrt 81").unwrap().0, Outcome::value(9.0));
        assert_eq!(run("cbrt(27)").unwrap().0, Outcome::value(3.0));
    }

    #[test]
    fn literal_powers_are_explained() {
        let (outcome, trace) = run("2^10").unwrap();
        assert_eq!(outcome, Outcome::value(1024.0));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.kind == StepKind::Calculate && s.expression == "2^10 = 1024"));
        assert!(trace.steps().iter().any(|s| s.kind == StepKind::Rule));
    }

    #[test]
    fn fractional_exponent_is_a_root() {
        let (outcome, trace) = run("8^(1/3)").unwrap();
        match outcome {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "2"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(trace.steps().iter().any(|s| s.kind == StepKind::Rule
            && s.explanation.starts_with("Fractional exponent")));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.expression == "8^(1/3) = 2"));
    }

    #[test]
    fn mixed_expression() {
        let (outcome, trace) = run("sqrt(16)+2^3").unwrap();
        assert_eq!(outcome, Outcome::value(12.0));
        assert_eq!(
            trace.steps().last().map(|s| s.expression.as_str()),
            Some("sqrt(16)+2^3 = 12")
        );
    }

    #[test]
    fn negative_radicand_is_a_domain_error() {
        assert!(matches!(run("sqrt(-4)"), Err(SolveError::Domain(_))));
    }
}
