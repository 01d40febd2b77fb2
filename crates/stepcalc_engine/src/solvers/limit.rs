//! Limits by direct substitution.

use crate::error::SolveError;
use crate::numeric::{self, substitute_variable};
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;
use tracing::debug;

const LIMIT_HINT: &str = "Write limits as lim x->a f(x), e.g. lim x->2 (x^2-4)/(x-2).";

/// `lim[it][_]{(}x->a{)} [of] f(x)`
static LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^lim(?:it)?\s*_?\s*[({]?\s*([a-z])\s*(?:->|→)\s*([+-]?(?:infinity|inf|\d+(?:\.\d+)?|\.\d+|pi|e))\s*[)}]?\s*(?:of\s+)?(.+)$",
    )
    .expect("valid regex literal")
});

#[derive(Debug, Clone, PartialEq)]
pub struct LimitProblem {
    pub var: char,
    pub target: String,
    pub expression: String,
}

impl LimitProblem {
    pub fn is_infinite(&self) -> bool {
        self.target.contains("inf")
    }
}

pub fn parse_limit(problem: &str) -> Option<LimitProblem> {
    let caps = LIMIT_RE.captures(problem.trim())?;
    let var = caps[1].chars().next()?;
    Some(LimitProblem {
        var,
        target: caps[2].to_string(),
        expression: caps[3].trim().to_string(),
    })
}

pub fn solve(problem: &str, trace: &mut StepTrace) -> Result<Outcome, SolveError> {
    let limit = parse_limit(problem).ok_or_else(|| {
        SolveError::unsupported(format!("Could not solve: {}", problem), LIMIT_HINT)
    })?;
    debug!(?limit, "limit parsed");

    let target_display = match (limit.is_infinite(), limit.target.starts_with('-')) {
        (true, true) => "-∞".to_string(),
        (true, false) => "∞".to_string(),
        (false, _) => limit.target.clone(),
    };
    trace.simplify(
        format!("lim {}→{} {}", limit.var, target_display, limit.expression),
        format!(
            "Find the value {} approaches as {} approaches {}",
            limit.expression, limit.var, target_display
        ),
    );

    if limit.is_infinite() {
        trace.note(
            format!("As {} → {}, the highest-degree terms dominate", limit.var, target_display),
            "Divide numerator and denominator by the highest power of the variable",
        );
        trace.note(
            "Compare degrees",
            "Numerator degree lower: limit 0. Equal degrees: ratio of the leading coefficients. Numerator degree higher: the limit diverges",
        );
        return Ok(Outcome::guidance(format!(
            "Analyze the dominant terms of {} as {} → {}",
            limit.expression, limit.var, target_display
        )));
    }

    let substituted = substitute_variable(&limit.expression, limit.var, &limit.target);
    trace.substitute(
        substituted.clone(),
        format!(
            "Direct substitution: replace {} with {}",
            limit.var, limit.target
        ),
    );

    match numeric::evaluate(&substituted) {
        Ok(value) => {
            trace.rule(
                format!("lim f({v}) = f(a) as {v} → a", v = limit.var),
                "A function continuous at the target point takes its limit there",
            );
            trace.calculate(format!("= {}", format_number(value)), "Evaluate");
            Ok(Outcome::value(value))
        }
        Err(err) => {
            debug!(%err, "direct substitution failed");
            trace.note(
                "Indeterminate form: requires L'Hôpital's rule",
                format!("Direct substitution fails ({}), e.g. 0/0", err),
            );
            trace.note(
                "lim f/g = lim f'/g'",
                "Differentiate numerator and denominator separately, or factor and cancel the common term first",
            );
            Ok(Outcome::guidance(
                "Indeterminate form: apply L'Hôpital's rule or factor and cancel before substituting",
            ))
        }
    }
}
