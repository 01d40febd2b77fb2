//! Single-variable polynomial terms: splitting, parsing and display.

use crate::numeric::{self, mentions_variable, standalone_letters};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;

/// `[coef][*]v[^n | ^(n)][/d]`
static MONOMIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?(?:\d+(?:\.\d+)?|\.\d+)?)\*?([a-z])(?:\^\(?([+-]?\d+(?:\.\d+)?)\)?)?(?:/(\d+(?:\.\d+)?))?$",
    )
    .expect("valid regex literal")
});

/// `[coef]/v[^n]`
static RECIPROCAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d+)?|\.\d+)?)/([a-z])(?:\^\(?(\d+(?:\.\d+)?)\)?)?$")
        .expect("valid regex literal")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monomial {
    pub coeff: f64,
    pub power: f64,
}

/// First single-letter identifier other than `e`.
pub fn find_variable(text: &str) -> Option<char> {
    standalone_letters(text).into_iter().find(|&c| c != 'e')
}

/// Split at top-level binary `+`/`-`, keeping each sign with its term.
pub fn split_terms(expr: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut prev: Option<char> = None;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '+' | '-'
                if depth == 0
                    && !current.is_empty()
                    && !matches!(prev, Some('*' | '/' | '^' | '+' | '-')) =>
            {
                terms.push(std::mem::take(&mut current));
            }
            _ => {}
        }
        current.push(c);
        prev = Some(c);
    }

    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn signed_coefficient(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => other.parse().ok(),
    }
}

/// Read `c·v^n`. Terms without `var` are evaluated as constants.
pub fn parse_monomial(term: &str, var: char) -> Option<Monomial> {
    let compact: String = term.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.strip_prefix('+').unwrap_or(&compact);

    if !mentions_variable(compact, var) {
        let coeff = numeric::evaluate(compact).ok()?;
        return Some(Monomial { coeff, power: 0.0 });
    }

    let squared = format!("{var}^2");
    let compact = compact.replace(&format!("{var}*{var}"), &squared);

    if let Some(caps) = MONOMIAL_RE.captures(&compact) {
        if !caps[2].starts_with(var) {
            return None;
        }
        let mut coeff = signed_coefficient(&caps[1])?;
        let power = match caps.get(3) {
            Some(p) => p.as_str().parse().ok()?,
            None => 1.0,
        };
        if let Some(d) = caps.get(4) {
            let divisor: f64 = d.as_str().parse().ok()?;
            if divisor == 0.0 {
                return None;
            }
            coeff /= divisor;
        }
        return Some(Monomial { coeff, power });
    }

    let caps = RECIPROCAL_RE.captures(&compact)?;
    if !caps[2].starts_with(var) {
        return None;
    }
    let coeff = signed_coefficient(&caps[1])?;
    let power: f64 = match caps.get(3) {
        Some(p) => p.as_str().parse().ok()?,
        None => 1.0,
    };
    Some(Monomial {
        coeff,
        power: -power,
    })
}

/// Coefficients of a polynomial of degree ≤ 3, indexed by degree.
pub fn polynomial(side: &str, var: char) -> Option<[f64; 4]> {
    let mut coeffs = [0.0; 4];
    for term in split_terms(side) {
        let m = parse_monomial(&term, var)?;
        if m.power.fract() != 0.0 || !(0.0..=3.0).contains(&m.power) {
            return None;
        }
        coeffs[m.power as usize] += m.coeff;
    }
    Some(coeffs)
}

/// Display `c·v^n` compactly: `x`, `-x`, `3x^2`, `0.5x^-1`.
pub fn format_monomial(coeff: f64, var: char, power: f64) -> String {
    if coeff == 0.0 {
        return "0".to_string();
    }
    if power == 0.0 {
        return format_number(coeff);
    }
    let head = match coeff {
        c if c == 1.0 => String::new(),
        c if c == -1.0 => "-".to_string(),
        c => format_number(c),
    };
    if power == 1.0 {
        format!("{head}{var}")
    } else {
        format!("{head}{var}^{}", format_number(power))
    }
}

/// Join signed terms into `a + b - c`; zero terms vanish.
pub fn join_terms<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::new();
    for part in parts.iter().map(AsRef::as_ref).filter(|p| *p != "0") {
        if out.is_empty() {
            out.push_str(part);
        } else if let Some(rest) = part.strip_prefix('-') {
            out.push_str(" - ");
            out.push_str(rest);
        } else {
            out.push_str(" + ");
            out.push_str(part);
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Highest degree first: `[6, -5, 1, 0]` → `x^2 - 5x + 6`.
pub fn show_polynomial(coeffs: &[f64], var: char) -> String {
    let parts: Vec<String> = coeffs
        .iter()
        .enumerate()
        .rev()
        .map(|(deg, &c)| format_monomial(c, var, deg as f64))
        .collect();
    join_terms(&parts)
}

/// Wrap negatives for inline substitution: `-3` → `(-3)`.
pub fn paren(value: f64) -> String {
    if value < 0.0 {
        format!("({})", format_number(value))
    } else {
        format_number(value)
    }
}
