//! Factorials, written `n!` or `fact(n)`.

use crate::error::SolveError;
use crate::numeric::{self, Func};
use crate::options::SolverOptions;
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;

static POSTFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*!").expect("valid regex literal"));

/// `5 × 4 × 3 × 2 × 1`; `0` and `1` expand to `1`.
pub fn expansion(n: u64) -> String {
    if n <= 1 {
        return "1".to_string();
    }
    (1..=n)
        .rev()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" × ")
}

/// Rewrite postfix factorials into calls: `5!+1` → `fact(5)+1`.
pub fn postfix_to_call(expr: &str) -> String {
    POSTFIX_RE.replace_all(expr, "fact($1)").into_owned()
}

pub fn solve(
    problem: &str,
    trace: &mut StepTrace,
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let rewritten = postfix_to_call(problem);
    let limit = options.max_factorial;
    let mut calls = 0usize;

    let mut handler = |func: Func, arg: f64| -> Result<f64, SolveError> {
        calls += 1;
        if func != Func::Fact {
            let value = numeric::apply_standard(func, arg)?;
            trace.calculate(
                format!("{}({}) = {}", func.name(), format_number(arg), format_number(value)),
                format!("Evaluate {}", func.name()),
            );
            return Ok(value);
        }

        let n = numeric::whole_number(arg)?;
        let value = numeric::factorial(n, limit)?;
        trace.rule_once("n! = n × (n - 1) × ... × 2 × 1", "Factorial Definition");
        if n <= 1 {
            trace.calculate(format!("{}! = 1", n), format!("By definition {}! = 1", n));
        } else {
            trace.calculate(
                format!("{}! = {} = {}", n, expansion(n), value),
                format!("Multiply every integer from {} down to 1", n),
            );
        }
        Ok(value as f64)
    };

    let value = numeric::evaluate_with(&rewritten, &mut handler)?;
    if calls != 1 || !numeric::is_single_call(&rewritten) {
        trace.calculate(
            format!("{} = {}", problem, format_number(value)),
            "Combine the results",
        );
    }
    Ok(Outcome::value(value))
}
