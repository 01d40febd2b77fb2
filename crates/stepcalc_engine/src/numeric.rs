//! Numeric evaluation with named functions and constants.
//!
//! [`calculate`] only understands numbers and operators. Everything else a
//! solver may meet on the numeric path (`sqrt(16)`, `log_2(8)`, `3pi`, ...)
//! is rewritten here first: function calls are resolved innermost-first into
//! parenthesized values, then `pi` and `e` are substituted.

use crate::error::SolveError;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use stepcalc_parser::{calculate, EvalError, MAX_DEPTH};

pub const PI_LITERAL: &str = "3.14159265359";
pub const E_LITERAL: &str = "2.71828182846";

/// Limit applied when a factorial is reached outside the factorial solver.
const DEFAULT_FACTORIAL_LIMIT: u64 = 20;

/// Denominators closer to zero than this make tan/sec/csc/cot undefined.
const POLE_EPSILON: f64 = 1e-10;

static CALL_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(arcsin|arccos|arctan|asin|acos|atan|sinh|cosh|tanh|sin|cos|tan|sec|csc|cot|sqrt|cbrt|abs|exp|ln|log(?:_?\d+(?:\.\d+)?)?|fact)\s*\(",
    )
    .expect("valid regex literal")
});

static BARE_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(arcsin|arccos|arctan|asin|acos|atan|sinh|cosh|tanh|sin|cos|tan|sec|csc|cot|sqrt|cbrt|abs|exp|ln|log|fact)\s*(\d+(?:\.\d+)?)",
    )
    .expect("valid regex literal")
});

static LETTER_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("valid regex literal"));

/// Functions recognized on the numeric path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Ln,
    /// Logarithm with an explicit base; plain `log` is base 10.
    Log(f64),
    Fact,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        let func = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "sec" => Func::Sec,
            "csc" => Func::Csc,
            "cot" => Func::Cot,
            "asin" | "arcsin" => Func::Asin,
            "acos" | "arccos" => Func::Acos,
            "atan" | "arctan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "sqrt" => Func::Sqrt,
            "cbrt" => Func::Cbrt,
            "abs" => Func::Abs,
            "exp" => Func::Exp,
            "ln" => Func::Ln,
            "log" => Func::Log(10.0),
            "fact" => Func::Fact,
            other => {
                let base = other.strip_prefix("log")?.trim_start_matches('_');
                Func::Log(base.parse().ok()?)
            }
        };
        Some(func)
    }

    pub fn name(&self) -> String {
        match self {
            Func::Sin => "sin".into(),
            Func::Cos => "cos".into(),
            Func::Tan => "tan".into(),
            Func::Sec => "sec".into(),
            Func::Csc => "csc".into(),
            Func::Cot => "cot".into(),
            Func::Asin => "arcsin".into(),
            Func::Acos => "arccos".into(),
            Func::Atan => "arctan".into(),
            Func::Sinh => "sinh".into(),
            Func::Cosh => "cosh".into(),
            Func::Tanh => "tanh".into(),
            Func::Sqrt => "sqrt".into(),
            Func::Cbrt => "cbrt".into(),
            Func::Abs => "abs".into(),
            Func::Exp => "exp".into(),
            Func::Ln => "ln".into(),
            Func::Log(b) if *b == 10.0 => "log".into(),
            Func::Log(b) => format!("log_{}", stepcalc_types::format_number(*b)),
            Func::Fact => "fact".into(),
        }
    }

    /// sin, cos, tan and their reciprocals.
    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            Func::Sin | Func::Cos | Func::Tan | Func::Sec | Func::Csc | Func::Cot
        )
    }

    pub fn is_inverse_circular(&self) -> bool {
        matches!(self, Func::Asin | Func::Acos | Func::Atan)
    }
}

fn preceded_by_letter(text: &str, idx: usize) -> bool {
    text[..idx]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Give parenthesis-free calls an explicit argument group: `sqrt16` → `sqrt(16)`.
pub fn canonical_calls(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 8);
    let mut last = 0;

    for caps in BARE_CALL_RE.captures_iter(expr) {
        let Some(whole) = caps.get(0) else { continue };
        if preceded_by_letter(expr, whole.start()) || expr[whole.end()..].starts_with('(') {
            continue;
        }
        out.push_str(&expr[last..whole.start()]);
        out.push_str(&caps[1]);
        out.push('(');
        out.push_str(&caps[2]);
        out.push(')');
        last = whole.end();
    }

    out.push_str(&expr[last..]);
    out
}

struct Call {
    start: usize,
    end: usize,
    func: Func,
    arg: String,
}

/// Leftmost function call in `text` together with its balanced argument.
fn next_call(text: &str) -> Result<Option<Call>, SolveError> {
    for caps in CALL_HEAD_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if preceded_by_letter(text, whole.start()) {
            continue;
        }
        let Some(func) = Func::from_name(&caps[1]) else {
            continue;
        };
        let open = whole.end() - 1;
        let close = matching_paren(text, open).ok_or(EvalError::UnbalancedParens)?;
        return Ok(Some(Call {
            start: whole.start(),
            end: close + 1,
            func,
            arg: text[open + 1..close].to_string(),
        }));
    }
    Ok(None)
}

/// Whether `expr` is exactly one call such as `sin(30)` or `sqrt 16`.
pub fn is_single_call(expr: &str) -> bool {
    let text = canonical_calls(expr.trim());
    match next_call(&text) {
        Ok(Some(call)) => call.start == 0 && call.end == text.len(),
        _ => false,
    }
}

/// Replace standalone `pi` and `e` with their numeric literals.
pub fn substitute_constants(expr: &str) -> String {
    LETTER_RUN_RE
        .replace_all(expr, |caps: &Captures| match &caps[0] {
            "pi" => format!("({})", PI_LITERAL),
            "e" => format!("({})", E_LITERAL),
            other => other.to_string(),
        })
        .into_owned()
}

/// Replace every standalone occurrence of `var` with `(value)`.
pub fn substitute_variable(expr: &str, var: char, value: &str) -> String {
    LETTER_RUN_RE
        .replace_all(expr, |caps: &Captures| {
            let run = &caps[0];
            if run.len() == 1 && run.starts_with(var) {
                format!("({})", value)
            } else {
                run.to_string()
            }
        })
        .into_owned()
}

/// Single-letter identifiers, in order of first appearance.
pub fn standalone_letters(expr: &str) -> Vec<char> {
    let mut letters = Vec::new();
    for m in LETTER_RUN_RE.find_iter(expr) {
        let mut chars = m.as_str().chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
    }
    letters
}

pub fn mentions_variable(expr: &str, var: char) -> bool {
    standalone_letters(expr).contains(&var)
}

/// Evaluate `expr`, routing every function call through `handler`.
///
/// Arguments are evaluated before the call that owns them, so `handler`
/// sees calls innermost-first, left to right.
pub fn evaluate_with<F>(expr: &str, handler: &mut F) -> Result<f64, SolveError>
where
    F: FnMut(Func, f64) -> Result<f64, SolveError>,
{
    evaluate_nested(expr, handler, 0)
}

fn evaluate_nested<F>(expr: &str, handler: &mut F, depth: usize) -> Result<f64, SolveError>
where
    F: FnMut(Func, f64) -> Result<f64, SolveError>,
{
    if depth >= MAX_DEPTH {
        return Err(EvalError::TooDeep(MAX_DEPTH).into());
    }
    let mut text = canonical_calls(expr);

    while let Some(call) = next_call(&text)? {
        let arg = evaluate_nested(&call.arg, handler, depth + 1)?;
        let value = handler(call.func, arg)?;
        if !value.is_finite() {
            return Err(EvalError::NonFinite.into());
        }
        text.replace_range(call.start..call.end, &format!("({})", value));
    }

    Ok(calculate(&substitute_constants(&text))?)
}

/// Evaluate with the standard (radian) meaning of every function.
pub fn evaluate(expr: &str) -> Result<f64, SolveError> {
    evaluate_with(expr, &mut apply_standard)
}

fn nonzero(denominator: f64, what: &str) -> Result<f64, SolveError> {
    if denominator.abs() < POLE_EPSILON {
        Err(SolveError::domain(format!("{} is undefined at this angle", what)))
    } else {
        Ok(denominator)
    }
}

/// Apply a function to a radian argument.
pub fn apply_standard(func: Func, x: f64) -> Result<f64, SolveError> {
    match func {
        Func::Sin => Ok(x.sin()),
        Func::Cos => Ok(x.cos()),
        Func::Tan => Ok(x.sin() / nonzero(x.cos(), "tan")?),
        Func::Sec => Ok(1.0 / nonzero(x.cos(), "sec")?),
        Func::Csc => Ok(1.0 / nonzero(x.sin(), "csc")?),
        Func::Cot => Ok(x.cos() / nonzero(x.sin(), "cot")?),
        Func::Asin | Func::Acos if x.abs() > 1.0 => Err(SolveError::domain(format!(
            "{} is only defined for values between -1 and 1",
            func.name()
        ))),
        Func::Asin => Ok(x.asin()),
        Func::Acos => Ok(x.acos()),
        Func::Atan => Ok(x.atan()),
        Func::Sinh => Ok(x.sinh()),
        Func::Cosh => Ok(x.cosh()),
        Func::Tanh => Ok(x.tanh()),
        Func::Sqrt if x < 0.0 => Err(SolveError::domain(
            "Square root of a negative number is not a real number",
        )),
        Func::Sqrt => Ok(x.sqrt()),
        Func::Cbrt => Ok(x.cbrt()),
        Func::Abs => Ok(x.abs()),
        Func::Exp => Ok(x.exp()),
        Func::Ln => Ok(natural_log(x)?),
        Func::Log(base) => log_base(x, base),
        Func::Fact => {
            let n = whole_number(x)?;
            Ok(factorial(n, DEFAULT_FACTORIAL_LIMIT)? as f64)
        }
    }
}

pub fn natural_log(x: f64) -> Result<f64, SolveError> {
    if x <= 0.0 {
        return Err(SolveError::domain(format!(
            "Logarithm is only defined for positive numbers, got {}",
            stepcalc_types::format_number(x)
        )));
    }
    Ok(x.ln())
}

/// `log_b(x) = ln(x) / ln(b)`.
pub fn log_base(x: f64, base: f64) -> Result<f64, SolveError> {
    if base <= 0.0 || base == 1.0 {
        return Err(SolveError::domain(
            "Logarithm base must be positive and different from 1",
        ));
    }
    Ok(natural_log(x)? / base.ln())
}

/// Accept only non-negative integral values as factorial operands.
pub fn whole_number(x: f64) -> Result<u64, SolveError> {
    if x < 0.0 || x.fract() != 0.0 || x > u64::MAX as f64 {
        return Err(SolveError::domain(
            "Factorial is only defined for non-negative integers",
        ));
    }
    Ok(x as u64)
}

/// `n!`, refusing operands above `limit`.
pub fn factorial(n: u64, limit: u64) -> Result<u128, SolveError> {
    let too_large = || {
        SolveError::domain(format!(
            "{}! is too large to compute (limit is {}!)",
            n, limit
        ))
    };
    if n > limit {
        return Err(too_large());
    }
    (2..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k).ok_or_else(too_large))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bare_calls_get_parentheses() {
        assert_eq!(canonical_calls("sqrt16+1"), "sqrt(16)+1");
        assert_eq!(canonical_calls("sin 30"), "sin(30)");
        assert_eq!(canonical_calls("log2(8)"), "log2(8)");
        assert_eq!(canonical_calls("log100"), "log(100)");
    }

    #[test]
    fn function_names() {
        assert_eq!(Func::from_name("arcsin"), Some(Func::Asin));
        assert_eq!(Func::from_name("log"), Some(Func::Log(10.0)));
        assert_eq!(Func::from_name("log_2"), Some(Func::Log(2.0)));
        assert_eq!(Func::from_name("log2"), Some(Func::Log(2.0)));
        assert_eq!(Func::from_name("foo"), None);
        assert_eq!(Func::Log(2.0).name(), "log_2");
    }

    #[test]
    fn single_call_detection() {
        assert!(is_single_call("sin(30)"));
        assert!(is_single_call("sqrt 16"));
        assert!(!is_single_call("sin(30)+1"));
        assert!(!is_single_call("2sqrt(9)"));
    }

    #[test]
    fn constants_only_replace_whole_identifiers() {
        assert_eq!(substitute_constants("2pi"), "2(3.14159265359)");
        assert_eq!(substitute_constants("e^2"), "(2.71828182846)^2");
        assert_eq!(substitute_constants("exp"), "exp");
    }

    #[test]
    fn variable_substitution() {
        assert_eq!(substitute_variable("x^2-4", 'x', "2"), "(2)^2-4");
        assert_eq!(substitute_variable("exp(x)", 'x', "0"), "exp((0))");
        assert_eq!(standalone_letters("2x+3y=7"), vec!['x', 'y']);
        assert!(!mentions_variable("max", 'x'));
    }

    #[test]
    fn evaluates_nested_calls() {
        assert!(approx(evaluate("sqrt(16)").unwrap(), 4.0));
        assert!(approx(evaluate("sqrt(sqrt(16))+1").unwrap(), 3.0));
        assert!(approx(evaluate("2sqrt(9)").unwrap(), 6.0));
        assert!(approx(evaluate("abs(-3)*2").unwrap(), 6.0));
        assert!(approx(evaluate("log_2(8)").unwrap(), 3.0));
        assert!(approx(evaluate("cbrt(27)").unwrap(), 3.0));
        assert!(approx(evaluate("sin(pi/2)").unwrap(), 1.0));
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(evaluate("sqrt(-4)"), Err(SolveError::Domain(_))));
        assert!(matches!(evaluate("ln(0)"), Err(SolveError::Domain(_))));
        assert!(matches!(evaluate("log_1(5)"), Err(SolveError::Domain(_))));
        assert!(matches!(evaluate("asin(2)"), Err(SolveError::Domain(_))));
    }

    #[test]
    fn unbalanced_call_is_an_eval_error() {
        assert_eq!(
            evaluate("sqrt(4"),
            Err(SolveError::Eval(EvalError::UnbalancedParens))
        );
    }

    #[test]
    fn nested_calls_are_capped() {
        let ok = format!("{}16{}", "sqrt(".repeat(3), ")".repeat(3));
        assert!(approx(evaluate(&ok).unwrap(), 16f64.powf(0.125)));

        let deep = format!("{}1{}", "abs(".repeat(2000), ")".repeat(2000));
        assert_eq!(
            evaluate(&deep),
            Err(SolveError::Eval(EvalError::TooDeep(MAX_DEPTH)))
        );
    }

    #[test]
    fn factorial_limits() {
        assert_eq!(factorial(0, 20).unwrap(), 1);
        assert_eq!(factorial(5, 20).unwrap(), 120);
        assert_eq!(factorial(20, 20).unwrap(), 2_432_902_008_176_640_000);
        assert!(factorial(21, 20).is_err());
        assert!(whole_number(2.5).is_err());
        assert!(whole_number(-1.0).is_err());
    }
}
