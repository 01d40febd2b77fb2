//! Cubic equations: method guidance with rational-root candidates.
//!
//! No roots are computed; the trace lists the candidates `±p/q` a student
//! should test, then the division and quadratic steps that follow.

use crate::error::SolveError;
use crate::terms::{find_variable, polynomial, show_polynomial};
use crate::trace::{Outcome, StepTrace};
use stepcalc_types::format_number;

/// Candidate lists longer than this are truncated in the trace.
const MAX_LISTED_CANDIDATES: usize = 16;

fn divisors(n: u64) -> Vec<u64> {
    (1..=n).filter(|d| n % d == 0).collect()
}

/// Distinct positive rational-root candidates `p/q`, smallest first.
///
/// `p` ranges over the divisors of the constant term and `q` over the
/// divisors of the leading coefficient. Both must be non-zero integers.
pub fn rational_root_candidates(leading: i64, constant: i64) -> Vec<f64> {
    if leading == 0 || constant == 0 {
        return Vec::new();
    }
    let ps = divisors(constant.unsigned_abs());
    let qs = divisors(leading.unsigned_abs());

    let mut out: Vec<f64> = Vec::new();
    for &p in &ps {
        for &q in &qs {
            let candidate = p as f64 / q as f64;
            if !out.iter().any(|c| (c - candidate).abs() < 1e-12) {
                out.push(candidate);
            }
        }
    }
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

fn as_small_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 1e6).then_some(value as i64)
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let var = find_variable(problem).unwrap_or('x');
    let (lhs, rhs) = problem.split_once('=').unwrap_or((problem, "0"));

    let coeffs = match (polynomial(lhs, var), polynomial(rhs, var)) {
        (Some(l), Some(r)) => Some([l[0] - r[0], l[1] - r[1], l[2] - r[2], l[3] - r[3]]),
        _ => None,
    };

    if let Some(c) = coeffs {
        trace.simplify(
            format!("{} = 0", show_polynomial(&c, var)),
            "Write the equation in standard form ax³ + bx² + cx + d = 0",
        );

        if c[0] == 0.0 {
            trace.note(
                format!("{}({}) = 0", var, show_polynomial(&c[1..], var)),
                format!(
                    "The constant term is 0, so {} = 0 is a root; factor out {}",
                    var, var
                ),
            );
        } else if let (Some(lead), Some(constant)) =
            (as_small_integer(c[3]), as_small_integer(c[0]))
        {
            let candidates = rational_root_candidates(lead, constant);
            let mut listed: Vec<String> = candidates
                .iter()
                .take(MAX_LISTED_CANDIDATES)
                .map(|v| format!("±{}", format_number(*v)))
                .collect();
            if candidates.len() > MAX_LISTED_CANDIDATES {
                listed.push("...".to_string());
            }
            trace.note(
                format!("Possible rational roots: {}", listed.join(", ")),
                format!(
                    "Rational Root Theorem: p divides {} and q divides {}",
                    format_number(c[0].abs()),
                    format_number(c[3].abs())
                ),
            );
        }
    }

    trace.note(
        "Test each candidate r: substitute it into the polynomial and look for 0",
        "A value r with p(r) = 0 gives the factor (x - r)",
    );
    trace.note(
        format!("({} - r)(a{}² + b{} + c) = 0", var, var, var),
        "Synthetic division by (x - r) leaves a quadratic factor",
    );
    trace.note(
        format!("{} = (-b ± √(b² - 4ac)) / 2a", var),
        "Solve the remaining quadratic with the quadratic formula",
    );

    Ok(Outcome::guidance(
        "Cubic equation: find a rational root, divide it out, then solve the remaining quadratic",
    ))
}
