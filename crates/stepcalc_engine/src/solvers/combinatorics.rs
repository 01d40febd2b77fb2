//! Combinations `nCr` and permutations `nPr`.

use crate::error::SolveError;
use crate::numeric::factorial;
use crate::options::SolverOptions;
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;

const COMBINATORICS_HINT: &str =
    "Write combinations as 5C2, nCr(5,2) or 5 choose 2, and permutations as 5P2 or nPr(5,2).";

/// `5ncr2`, `5 npr 2`, `5 choose 2`
static INFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(ncr|npr|choose)\s*(\d+)").expect("valid regex literal")
});

/// `ncr(5,2)`, `npr(5, 2)`
static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(ncr|npr)\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("valid regex literal")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Combination,
    Permutation,
}

pub fn parse_selection(problem: &str) -> Option<(Selection, u64, u64)> {
    let kind = |name: &str| match name {
        "npr" => Selection::Permutation,
        _ => Selection::Combination,
    };
    if let Some(caps) = CALL_RE.captures(problem) {
        return Some((kind(&caps[1]), caps[2].parse().ok()?, caps[3].parse().ok()?));
    }
    let caps = INFIX_RE.captures(problem)?;
    Some((kind(&caps[2]), caps[1].parse().ok()?, caps[3].parse().ok()?))
}

pub fn solve(
    problem: &str,
    trace: &mut StepTrace,
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let (selection, n, r) = parse_selection(problem).ok_or_else(|| {
        SolveError::unsupported(format!("Could not solve: {}", problem), COMBINATORICS_HINT)
    })?;

    let letter = match selection {
        Selection::Combination => 'C',
        Selection::Permutation => 'P',
    };
    if r > n {
        return Err(SolveError::domain(format!(
            "r cannot be greater than n in {}{}{} (r = {}, n = {})",
            n, letter, r, r, n
        )));
    }

    let limit = options.max_factorial;
    let n_fact = factorial(n, limit)?;
    let r_fact = factorial(r, limit)?;
    let rest_fact = factorial(n - r, limit)?;

    let value = match selection {
        Selection::Combination => {
            trace.rule("nCr = n! / (r! × (n - r)!)", "Combination Formula: order does not matter");
            trace.substitute(
                format!("{}C{} = {}! / ({}! × {}!)", n, r, n, r, n - r),
                format!("Substitute n = {} and r = {}", n, r),
            );
            let value = n_fact / (r_fact * rest_fact);
            trace.calculate(
                format!("= {} / ({} × {}) = {}", n_fact, r_fact, rest_fact, value),
                "Evaluate the factorials and divide",
            );
            value
        }
        Selection::Permutation => {
            trace.rule("nPr = n! / (n - r)!", "Permutation Formula: order matters");
            trace.substitute(
                format!("{}P{} = {}! / {}!", n, r, n, n - r),
                format!("Substitute n = {} and r = {}", n, r),
            );
            let value = n_fact / rest_fact;
            trace.calculate(
                format!("= {} / {} = {}", n_fact, rest_fact, value),
                "Evaluate the factorials and divide",
            );
            value
        }
    };

    Ok(Outcome::numeric(value.to_string(), value as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(problem: &str) -> Result<Outcome, SolveError> {
        let mut trace = StepTrace::new();
        solve(problem, &mut trace, &SolverOptions::default())
    }

    #[test]
    fn parses_spellings() {
        assert_eq!(parse_selection("5ncr2"), Some((Selection::Combination, 5, 2)));
        assert_eq!(parse_selection("5 choose 2"), Some((Selection::Combination, 5, 2)));
        assert_eq!(parse_selection("npr(5, 2)"), Some((Selection::Permutation, 5, 2)));
        assert_eq!(parse_selection("ncr"), None);
    }

    #[test]
    fn combinations_and_permutations() {
        assert_eq!(run("5ncr2").unwrap(), Outcome::numeric("10", 10.0));
        assert_eq!(run("5npr2").unwrap(), Outcome::numeric("20", 20.0));
        assert_eq!(run("10 choose 0").unwrap(), Outcome::numeric("1", 1.0));
    }

    #[test]
    fn r_greater_than_n_is_a_domain_error() {
        assert!(matches!(run("3ncr5"), Err(SolveError::Domain(_))));
    }

    #[test]
    fn operands_respect_the_factorial_limit() {
        assert!(matches!(run("30ncr2"), Err(SolveError::Domain(_))));
    }
}
