//! Percentages: `X% of Y` and bare `X%` inside arithmetic.

use crate::error::SolveError;
use crate::numeric;
use crate::trace::{Outcome, StepTrace};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use stepcalc_types::format_number;

static PERCENT_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%\s*of\s*(\d+(?:\.\d+)?)").expect("valid regex literal")
});

static BARE_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid regex literal"));

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let mut percent_of = Vec::new();
    let rewritten = PERCENT_OF_RE.replace_all(problem, |caps: &Captures| {
        percent_of.push((caps[1].to_string(), caps[2].to_string()));
        format!("({}/100*{})", &caps[1], &caps[2])
    });

    if !percent_of.is_empty() {
        trace.rule("X% of Y = (X / 100) × Y", "Percent Definition: per cent means per hundred");
    }
    for (pct, base) in &percent_of {
        let value = numeric::evaluate(&format!("{}/100*{}", pct, base))?;
        trace.calculate(
            format!("({} / 100) × {} = {}", pct, base, format_number(value)),
            format!("{}% of {}", pct, base),
        );
    }

    let mut bare = 0usize;
    let rewritten = BARE_PERCENT_RE.replace_all(&rewritten, |caps: &Captures| {
        bare += 1;
        format!("({}/100)", &caps[1])
    });
    if bare > 0 {
        trace.rule("X% = X / 100", "Percent Definition: per cent means per hundred");
    }

    let single = percent_of.len() == 1 && bare == 0 && {
        let trimmed = rewritten.trim();
        trimmed.starts_with('(') && trimmed.ends_with(')') && !trimmed[1..].contains('(')
    };
    if !single {
        trace.substitute(rewritten.to_string(), "Replace each percentage with a fraction of 100");
    }

    let value = numeric::evaluate(&rewritten)?;
    if !single {
        trace.calculate(
            format!("{} = {}", rewritten, format_number(value)),
            "Evaluate the expression",
        );
    }
    Ok(Outcome::value(value))
}
