//! Logarithms: natural, common and arbitrary base.

use crate::error::SolveError;
use crate::numeric::{self, Func};
use crate::trace::{Outcome, StepTrace};
use stepcalc_types::format_number;

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let mut calls = 0usize;

    let mut handler = |func: Func, arg: f64| -> Result<f64, SolveError> {
        calls += 1;
        let shown = format_number(arg);
        match func {
            Func::Ln => {
                trace.rule_once("ln(x) = logₑ(x)", "Natural Logarithm: base e ≈ 2.71828");
                let value = numeric::natural_log(arg)?;
                trace.calculate(
                    format!("ln({}) = {}", shown, format_number(value)),
                    format!("e raised to {} gives {}", format_number(value), shown),
                );
                Ok(value)
            }
            Func::Log(base) if base == 10.0 => {
                trace.rule_once("log(x) = ln(x) / ln(10)", "Common Logarithm: base 10");
                let value = numeric::log_base(arg, 10.0)?;
                trace.calculate(
                    format!("log({}) = ln({}) / ln(10) = {}", shown, shown, format_number(value)),
                    format!("10 raised to {} gives {}", format_number(value), shown),
                );
                Ok(value)
            }
            Func::Log(base) => {
                let b = format_number(base);
                trace.rule_once("log_b(x) = ln(x) / ln(b)", "Change of Base Formula");
                let value = numeric::log_base(arg, base)?;
                trace.calculate(
                    format!(
                        "log_{}({}) = ln({}) / ln({}) = {}",
                        b,
                        shown,
                        shown,
                        b,
                        format_number(value)
                    ),
                    format!("{} raised to {} gives {}", b, format_number(value), shown),
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
    if calls != 1 || !numeric::is_single_call(problem) {
        trace.calculate(
            format!("{} = {}", problem, format_number(value)),
            "Combine the results",
        );
    }
    Ok(Outcome::value(value))
}
