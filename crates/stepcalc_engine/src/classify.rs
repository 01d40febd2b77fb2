//! Problem classification by ordered keyword predicates.
//!
//! The first kind in [`PRIORITY`] whose predicate holds wins. The order is
//! part of the contract: `sin(x)^2 = 0.5` is a trigonometric equation, not a
//! quadratic, because trig equations are checked first.

use crate::terms::find_variable;

const TRIG_NAMES: [&str; 6] = ["sin", "cos", "tan", "sec", "csc", "cot"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Derivative,
    Integral,
    Limit,
    TrigEquation,
    System,
    Cubic,
    Quadratic,
    Equation,
    TrigEvaluation,
    Logarithm,
    Factorial,
    Combinatorics,
    ExponentRoot,
    Percentage,
    Expression,
}

/// Dispatch order, first match wins.
pub const PRIORITY: [SolverKind; 15] = [
    SolverKind::Derivative,
    SolverKind::Integral,
    SolverKind::Limit,
    SolverKind::TrigEquation,
    SolverKind::System,
    SolverKind::Cubic,
    SolverKind::Quadratic,
    SolverKind::Equation,
    SolverKind::TrigEvaluation,
    SolverKind::Logarithm,
    SolverKind::Factorial,
    SolverKind::Combinatorics,
    SolverKind::ExponentRoot,
    SolverKind::Percentage,
    SolverKind::Expression,
];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn has_trig(text: &str) -> bool {
    contains_any(text, &TRIG_NAMES)
}

impl SolverKind {
    /// Whether lowercased, normalized `text` belongs to this kind.
    pub fn matches(self, text: &str) -> bool {
        match self {
            SolverKind::Derivative => {
                contains_any(text, &["derivative", "d/dx", "f'", "differentiate", "dy/dx"])
            }
            SolverKind::Integral => {
                contains_any(text, &["integral", "integrate", "∫", "antiderivative"])
            }
            SolverKind::Limit => contains_any(text, &["lim", "→", "->"]),
            SolverKind::TrigEquation => text.contains('=') && has_trig(text),
            SolverKind::System => {
                text.contains(';') || (text.contains(" and ") && text.contains('='))
            }
            SolverKind::Cubic => {
                contains_any(text, &["^3", "x³"]) && find_variable(text).is_some()
            }
            SolverKind::Quadratic => {
                contains_any(text, &["^2", "x²", "x*x"]) && find_variable(text).is_some()
            }
            SolverKind::Equation => text.contains('='),
            SolverKind::TrigEvaluation => has_trig(text),
            SolverKind::Logarithm => contains_any(text, &["log", "ln"]),
            SolverKind::Factorial => text.contains('!') || text.contains("fact"),
            SolverKind::Combinatorics => contains_any(text, &["ncr", "npr", "choose"]),
            SolverKind::ExponentRoot => contains_any(text, &["sqrt", "cbrt", "^"]),
            SolverKind::Percentage => text.contains('%'),
            SolverKind::Expression => true,
        }
    }

    /// Human-readable label used in the `Problem` step.
    pub fn description(self) -> &'static str {
        match self {
            SolverKind::Derivative => "Derivative",
            SolverKind::Integral => "Indefinite integral",
            SolverKind::Limit => "Limit",
            SolverKind::TrigEquation => "Trigonometric equation",
            SolverKind::System => "System of equations",
            SolverKind::Cubic => "Cubic equation",
            SolverKind::Quadratic => "Quadratic equation",
            SolverKind::Equation => "Equation",
            SolverKind::TrigEvaluation => "Trigonometric expression",
            SolverKind::Logarithm => "Logarithm",
            SolverKind::Factorial => "Factorial",
            SolverKind::Combinatorics => "Combinations and permutations",
            SolverKind::ExponentRoot => "Exponents and roots",
            SolverKind::Percentage => "Percentage",
            SolverKind::Expression => "Arithmetic expression",
        }
    }
}

/// Pick the solver for lowercased, normalized `text`.
pub fn classify(text: &str) -> SolverKind {
    PRIORITY
        .into_iter()
        .find(|kind| kind.matches(text))
        .unwrap_or(SolverKind::Expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_each_family() {
        assert_eq!(classify("derivative of x^2"), SolverKind::Derivative);
        assert_eq!(classify("integral x^2 dx"), SolverKind::Integral);
        assert_eq!(classify("lim x->2 (x^2-4)/(x-2)"), SolverKind::Limit);
        assert_eq!(classify("sin(x)=0.5"), SolverKind::TrigEquation);
        assert_eq!(classify("x+y=3;x-y=1"), SolverKind::System);
        assert_eq!(classify("x^3-6x^2+11x-6=0"), SolverKind::Cubic);
        assert_eq!(classify("x^2-5x+6=0"), SolverKind::Quadratic);
        assert_eq!(classify("2x+5=15"), SolverKind::Equation);
        assert_eq!(classify("sin(30)"), SolverKind::TrigEvaluation);
        assert_eq!(classify("log(100)"), SolverKind::Logarithm);
        assert_eq!(classify("5!"), SolverKind::Factorial);
        assert_eq!(classify("5ncr2"), SolverKind::Combinatorics);
        assert_eq!(classify("sqrt(16)"), SolverKind::ExponentRoot);
        assert_eq!(classify("20% of 50"), SolverKind::Percentage);
        assert_eq!(classify("2+3*4"), SolverKind::Expression);
    }

    #[test]
    fn priority_resolves_overlaps() {
        // squared trig equation is trig, not quadratic
        assert_eq!(classify("sin(x)^2=0.5"), SolverKind::TrigEquation);
        assert_eq!(classify("derivative of sin(x)"), SolverKind::Derivative);
        assert_eq!(classify("integral of x^3 dx"), SolverKind::Integral);
        assert_eq!(classify("x^3+x^2=0"), SolverKind::Cubic);
    }

    #[test]
    fn powers_without_a_variable_are_arithmetic() {
        assert_eq!(classify("2^3"), SolverKind::ExponentRoot);
        assert_eq!(classify("3^2+1"), SolverKind::ExponentRoot);
        assert_eq!(classify("e^2"), SolverKind::ExponentRoot);
    }

    #[test]
    fn priority_table_covers_every_kind_once() {
        for (i, a) in PRIORITY.iter().enumerate() {
            assert!(!PRIORITY[i + 1..].contains(a));
        }
        assert_eq!(PRIORITY.last(), Some(&SolverKind::Expression));
    }
}
