//! Term-by-term derivatives and indefinite integrals in `x`.
//!
//! Each term is matched against a short table of forms (power, sin, cos,
//! tan, ln, log, e^x, constant). A sum is split at top-level `+`/`-` and
//! handled with the sum rule; any term outside the table rejects the whole
//! problem.

use crate::error::SolveError;
use crate::terms::{format_monomial, join_terms, parse_monomial, split_terms};
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;

const DERIVATIVE_HINT: &str = "Supported forms: c·x^n, sin(x), cos(x), tan(x), ln(x), log(x), e^x and sums of them, e.g. derivative of 3x^2 + sin(x).";
const INTEGRAL_HINT: &str = "Supported forms: c·x^n, 1/x, sin(x), cos(x), e^x and sums of them, e.g. integral of 3x^2 + cos(x) dx. Other integrals need substitution or integration by parts.";

const DERIVATIVE_MARKERS: [&str; 10] = [
    "the derivative of",
    "derivative of",
    "derivative",
    "differentiate",
    "d/dx",
    "dy/dx",
    "f'(x)",
    "f'",
    "with respect to x",
    "wrt x",
];

const INTEGRAL_MARKERS: [&str; 8] = [
    "the integral of",
    "integral of",
    "integrate",
    "integral",
    "the antiderivative of",
    "antiderivative of",
    "antiderivative",
    "with respect to x",
];

/// `[coef][*](sin|cos|tan|ln|log)(x)`, parentheses optional.
static FUNCTION_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d+)?)?)\*?(sin|cos|tan|ln|log)\(?x\)?$")
        .expect("valid regex literal")
});

/// `[coef][*]e^x` or `[coef][*]exp(x)`.
static EXP_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d+)?)?)\*?(?:e\^\(?x\)?|exp\(x\))$")
        .expect("valid regex literal")
});

/// Transformation of one term, with the rule that justifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermResult {
    pub result: String,
    pub rule: &'static str,
    pub formula: &'static str,
}

impl TermResult {
    fn new(result: String, rule: &'static str, formula: &'static str) -> Self {
        Self {
            result,
            rule,
            formula,
        }
    }
}

/// Strip prompt markers, a leading `f(x)=`/`y=` and one wrapping pair of parentheses.
fn isolate_function(problem: &str, markers: &[&str]) -> String {
    let mut text = problem.to_string();
    for marker in markers {
        text = text.replace(marker, " ");
    }
    let mut text = text.trim();
    for prefix in ["of ", "f(x)=", "y=", "=", ":"] {
        text = text.strip_prefix(prefix).unwrap_or(text).trim();
    }
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    unwrap_parens(&text).to_string()
}

fn unwrap_parens(text: &str) -> &str {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return text;
                }
            }
            _ => {}
        }
    }
    if depth == 0 {
        inner
    } else {
        text
    }
}

fn coefficient(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => other.trim_start_matches('+').parse().ok(),
    }
}

/// `c·body` with unit coefficients folded: `cos(x)`, `-sin(x)`, `3e^x`.
fn scaled(coeff: f64, body: &str) -> String {
    if coeff == 0.0 {
        "0".to_string()
    } else if coeff == 1.0 {
        body.to_string()
    } else if coeff == -1.0 {
        format!("-{}", body)
    } else {
        format!("{}{}", format_number(coeff), body)
    }
}

/// `c/body` with unit coefficients folded: `1/x`, `-3/x`.
fn reciprocal(coeff: f64, body: &str) -> String {
    if coeff < 0.0 {
        format!("-{}/{}", format_number(-coeff), body)
    } else {
        format!("{}/{}", format_number(coeff), body)
    }
}

pub fn derive_term(term: &str) -> Option<TermResult> {
    if let Some(m) = parse_monomial(term, 'x') {
        if m.power == 0.0 {
            return Some(TermResult::new(
                "0".to_string(),
                "Constant Rule",
                "d/dx[c] = 0",
            ));
        }
        let result = format_monomial(m.coeff * m.power, 'x', m.power - 1.0);
        return Some(TermResult::new(
            result,
            "Power Rule",
            "d/dx[xⁿ] = n·xⁿ⁻¹",
        ));
    }

    if let Some(caps) = FUNCTION_TERM_RE.captures(term) {
        let c = coefficient(&caps[1])?;
        let derived = match &caps[2] {
            "sin" => TermResult::new(scaled(c, "cos(x)"), "Sine Rule", "d/dx[sin(x)] = cos(x)"),
            "cos" => TermResult::new(
                scaled(-c, "sin(x)"),
                "Cosine Rule",
                "d/dx[cos(x)] = -sin(x)",
            ),
            "tan" => TermResult::new(
                scaled(c, "sec^2(x)"),
                "Tangent Rule",
                "d/dx[tan(x)] = sec²(x)",
            ),
            "ln" => TermResult::new(
                reciprocal(c, "x"),
                "Natural Logarithm Rule",
                "d/dx[ln(x)] = 1/x",
            ),
            _ => TermResult::new(
                reciprocal(c, "(x*ln(10))"),
                "Common Logarithm Rule",
                "d/dx[log(x)] = 1/(x·ln(10))",
            ),
        };
        return Some(derived);
    }

    let caps = EXP_TERM_RE.captures(term)?;
    let c = coefficient(&caps[1])?;
    Some(TermResult::new(
        scaled(c, "e^x"),
        "Exponential Rule",
        "d/dx[eˣ] = eˣ",
    ))
}

pub fn integrate_term(term: &str) -> Option<TermResult> {
    if let Some(m) = parse_monomial(term, 'x') {
        if m.power == -1.0 {
            return Some(TermResult::new(
                scaled(m.coeff, "ln|x|"),
                "Logarithmic Integral",
                "∫ 1/x dx = ln|x| + C",
            ));
        }
        if m.power == 0.0 {
            return Some(TermResult::new(
                format_monomial(m.coeff, 'x', 1.0),
                "Constant Rule",
                "∫ k dx = kx + C",
            ));
        }
        let mut exponent = m.power + 1.0;
        let mut coeff = m.coeff;
        if exponent < 0.0 {
            exponent = -exponent;
            coeff = -coeff;
        }
        let reduced = coeff / exponent;
        let result = if reduced.fract() == 0.0 {
            format_monomial(reduced, 'x', m.power + 1.0)
        } else {
            format!(
                "{}/{}",
                format_monomial(coeff, 'x', m.power + 1.0),
                format_number(exponent)
            )
        };
        return Some(TermResult::new(
            result,
            "Power Rule",
            "∫ xⁿ dx = xⁿ⁺¹/(n+1) + C, n ≠ -1",
        ));
    }

    if let Some(caps) = FUNCTION_TERM_RE.captures(term) {
        let c = coefficient(&caps[1])?;
        return match &caps[2] {
            "sin" => Some(TermResult::new(
                scaled(-c, "cos(x)"),
                "Sine Integral",
                "∫ sin(x) dx = -cos(x) + C",
            )),
            "cos" => Some(TermResult::new(
                scaled(c, "sin(x)"),
                "Cosine Integral",
                "∫ cos(x) dx = sin(x) + C",
            )),
            _ => None,
        };
    }

    let caps = EXP_TERM_RE.captures(term)?;
    let c = coefficient(&caps[1])?;
    Some(TermResult::new(
        scaled(c, "e^x"),
        "Exponential Integral",
        "∫ eˣ dx = eˣ + C",
    ))
}

/// Apply `transform` to every term, recording rules and per-term results.
fn term_by_term(
    function: &str,
    trace: &mut StepTrace,
    transform: fn(&str) -> Option<TermResult>,
    notation: (&str, &str),
    sum_rule: &str,
) -> Option<Vec<String>> {
    let terms = split_terms(function);
    if terms.is_empty() {
        return None;
    }
    let results: Vec<(String, TermResult)> = terms
        .iter()
        .map(|t| transform(t).map(|r| (t.trim_start_matches('+').to_string(), r)))
        .collect::<Option<_>>()?;

    if results.len() > 1 {
        trace.rule(sum_rule, "Sum Rule: handle each term separately");
    }
    for (term, result) in &results {
        trace.rule_once(result.formula, result.rule);
        trace.calculate(
            format!("{}{}{} = {}", notation.0, term, notation.1, result.result),
            result.rule,
        );
    }
    Some(results.into_iter().map(|(_, r)| r.result).collect())
}

pub fn derivative(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let function = isolate_function(problem, &DERIVATIVE_MARKERS);
    let unsupported = || {
        SolveError::unsupported(
            format!("Could not find derivative of {}", function),
            DERIVATIVE_HINT,
        )
    };
    if function.is_empty() {
        return Err(SolveError::unsupported(
            "Could not find derivative: no function given",
            DERIVATIVE_HINT,
        ));
    }

    trace.simplify(
        format!("f(x) = {}", function),
        "Identify the function to differentiate",
    );
    let parts = term_by_term(
        &function,
        trace,
        derive_term,
        ("d/dx[", "]"),
        "d/dx[f + g] = f' + g'",
    )
    .ok_or_else(unsupported)?;

    Ok(Outcome::answer(format!("f'(x) = {}", join_terms(&parts))))
}

pub fn integral(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let mut function = isolate_function(problem, &INTEGRAL_MARKERS);
    if let Some(body) = function.strip_suffix("dx") {
        function = unwrap_parens(body).to_string();
    }
    let unsupported = || {
        SolveError::unsupported(format!("Could not integrate {}", function), INTEGRAL_HINT)
    };
    if function.is_empty() {
        return Err(SolveError::unsupported(
            "Could not integrate: no integrand given",
            INTEGRAL_HINT,
        ));
    }

    trace.simplify(
        format!("∫ {} dx", function),
        "Identify the integrand",
    );
    let parts = term_by_term(
        &function,
        trace,
        integrate_term,
        ("∫ ", " dx"),
        "∫ (f + g) dx = ∫ f dx + ∫ g dx",
    )
    .ok_or_else(unsupported)?;

    trace.note("+ C", "Add the constant of integration");
    Ok(Outcome::answer(format!("{} + C", join_terms(&parts))))
}
