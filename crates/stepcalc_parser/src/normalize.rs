//! OCR text normalization.
//!
//! Raw recognized text goes through an ordered list of pure passes, each
//! `&str -> String`. The list is re-run until the text stops changing so the
//! result is a fixpoint: `normalize(normalize(s)) == normalize(s)`.
//!
//! Pass order matters: glyph substitution must precede the ASCII filter, and
//! compound function names are reassembled before the names they contain.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A single named normalization pass.
pub struct Pass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The pipeline, in application order.
pub const PASSES: &[Pass] = &[
    Pass {
        name: "collapse whitespace",
        apply: collapse_whitespace,
    },
    Pass {
        name: "substitute symbols",
        apply: substitute_symbols,
    },
    Pass {
        name: "strip unknown glyphs",
        apply: strip_unknown_glyphs,
    },
    Pass {
        name: "repair times sign",
        apply: repair_times_sign,
    },
    Pass {
        name: "correct digit confusions",
        apply: correct_digit_confusions,
    },
    Pass {
        name: "reassemble function names",
        apply: reassemble_function_names,
    },
    Pass {
        name: "tighten operator spacing",
        apply: tighten_operator_spacing,
    },
    Pass {
        name: "collapse whitespace",
        apply: collapse_whitespace,
    },
];

const MAX_ROUNDS: usize = 8;

/// Glyph → ASCII spelling. Superscript digits are handled separately so a
/// run like `¹⁰` becomes one exponent.
const SYMBOLS: &[(char, &str)] = &[
    ('×', "*"),
    ('✕', "*"),
    ('·', "*"),
    ('∙', "*"),
    ('⋅', "*"),
    ('÷', "/"),
    ('∕', "/"),
    ('−', "-"),
    ('–', "-"),
    ('—', "-"),
    ('‐', "-"),
    ('‑', "-"),
    ('﹣', "-"),
    ('－', "-"),
    ('“', ""),
    ('”', ""),
    ('‘', ""),
    ('’', ""),
    ('°', ""),
    ('º', ""),
    ('₀', "0"),
    ('₁', "1"),
    ('₂', "2"),
    ('₃', "3"),
    ('₄', "4"),
    ('₅', "5"),
    ('₆', "6"),
    ('₇', "7"),
    ('₈', "8"),
    ('₉', "9"),
    ('√', "sqrt"),
    ('∛', "cbrt"),
    ('∑', "sum "),
    ('Σ', "sum "),
    ('∏', "prod "),
    ('Π', "prod "),
    ('π', "pi"),
    ('θ', "theta"),
    ('α', "alpha"),
    ('β', "beta"),
    ('∞', "infinity"),
    ('≤', "<="),
    ('≥', ">="),
    ('≠', "!="),
    ('±', "+-"),
    ('→', "->"),
    ('∫', "integral "),
    ('х', "x"),
    ('Х', "X"),
];

fn superscript_digit(c: char) -> Option<char> {
    match c {
        '⁰' => Some('0'),
        '¹' => Some('1'),
        '²' => Some('2'),
        '³' => Some('3'),
        '⁴' => Some('4'),
        '⁵' => Some('5'),
        '⁶' => Some('6'),
        '⁷' => Some('7'),
        '⁸' => Some('8'),
        '⁹' => Some('9'),
        _ => None,
    }
}

/// Names reassembled when OCR splits them with spaces. Compound names come
/// first so `a r c s i n` is not turned into `a r c sin`.
const FUNCTION_NAMES: &[&str] = &[
    "sinh", "cosh", "tanh", "arcsin", "arccos", "arctan", "sin", "cos", "tan", "sec", "csc", "cot",
    "log", "sqrt", "cbrt", "abs", "fact", "lim",
];

static SPACED_FUNCTION_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    FUNCTION_NAMES
        .iter()
        .map(|name| {
            let letters: Vec<String> = name.chars().map(|c| c.to_string()).collect();
            let pattern = format!("(?i){}", letters.join(r"\s*"));
            (*name, Regex::new(&pattern).expect("valid regex literal"))
        })
        .collect()
});

static TIMES_SIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*[xX]\s*(\d)").expect("valid regex literal"));

static OPERATOR_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([+\-*/^=])\s*").expect("valid regex literal"));

/// Normalize raw recognized text into canonical ASCII math. Total: never fails.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    for _ in 0..MAX_ROUNDS {
        let next = run_passes(&current);
        if next == current {
            return next;
        }
        current = next;
    }
    current
}

fn run_passes(input: &str) -> String {
    PASSES.iter().fold(input.to_string(), |text, pass| {
        let out = (pass.apply)(&text);
        if out != text {
            debug!(pass = pass.name, before = %text, after = %out, "normalize");
        }
        out
    })
}

/// Split multi-line recognized text into normalized problems, dropping lines
/// that carry no math (no digit, operator or call).
pub fn extract_problems(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize)
        .filter(|line| !line.is_empty() && looks_like_math(line))
        .collect()
}

fn looks_like_math(line: &str) -> bool {
    line.chars()
        .any(|c| c.is_ascii_digit() || "+-*/^=%!(".contains(c))
}

// ============================================================================
// Passes
// ============================================================================

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn substitute_symbols(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_superscript = false;

    for c in input.chars() {
        if let Some(d) = superscript_digit(c) {
            if !in_superscript {
                out.push('^');
            }
            out.push(d);
            in_superscript = true;
            continue;
        }
        in_superscript = false;

        match SYMBOLS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Drop everything outside the ASCII math alphabet.
pub fn strip_unknown_glyphs(input: &str) -> String {
    input
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_ascii_whitespace()
                || "+-*/^()[]{}=.,;:%!<>|'_".contains(*c)
        })
        .collect()
}

/// `2 x 3` → `2*3`: a lone `x`/`X` strictly between two digits is a times sign.
pub fn repair_times_sign(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = TIMES_SIGN_RE.replace_all(&current, "$1*$2").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn confusable_digit(c: char) -> Option<char> {
    match c {
        'o' | 'O' => Some('0'),
        'l' | 'I' => Some('1'),
        _ => None,
    }
}

/// `1o` → `10`, `l5` → `15`.
///
/// Only letter runs made entirely of confusable letters and touching a digit
/// are rewritten, so words such as `log` or `ln` next to a coefficient stay intact.
pub fn correct_digit_confusions(input: &str) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        let end = i;

        let all_confusable = chars[start..end]
            .iter()
            .all(|c| confusable_digit(*c).is_some());
        let digit_before = start > 0 && chars[start - 1].is_ascii_digit();
        let digit_after = end < chars.len() && chars[end].is_ascii_digit();

        if all_confusable && (digit_before || digit_after) {
            for c in &mut chars[start..end] {
                if let Some(d) = confusable_digit(*c) {
                    *c = d;
                }
            }
        }
    }

    chars.into_iter().collect()
}

/// `s i n h (x)` → `sinh (x)`.
pub fn reassemble_function_names(input: &str) -> String {
    SPACED_FUNCTION_RES
        .iter()
        .fold(input.to_string(), |text, (name, re)| {
            collapse_spaced_name(&text, name, re)
        })
}

fn collapse_spaced_name(text: &str, name: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in re.find_iter(text) {
        let spaced = m.as_str().chars().any(char::is_whitespace);
        let letter_before = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic());
        let letter_after = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());

        if spaced && !letter_before && !letter_after {
            out.push_str(&text[last..m.start()]);
            out.push_str(name);
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

/// Remove whitespace around `+ - * / ^ =`.
pub fn tighten_operator_spacing(input: &str) -> String {
    OPERATOR_SPACING_RE.replace_all(input, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(collapse_whitespace("  2   +\t3 \n"), "2 + 3");
    }

    #[test]
    fn symbols_become_ascii() {
        assert_eq!(substitute_symbols("6×7÷2−1"), "6*7/2-1");
        assert_eq!(substitute_symbols("√9 + π"), "sqrt9 + pi");
        assert_eq!(substitute_symbols("x² + x³"), "x^2 + x^3");
        assert_eq!(substitute_symbols("x¹⁰"), "x^10");
        assert_eq!(substitute_symbols("a₁ ≤ b₂"), "a1 <= b2");
        assert_eq!(substitute_symbols("sin(30°)"), "sin(30)");
        assert_eq!(substitute_symbols("lim x→∞"), "lim x->infinity");
        assert_eq!(substitute_symbols("∫ x dx"), "integral  x dx");
        assert_eq!(substitute_symbols("2х+1"), "2x+1");
    }

    #[test]
    fn unknown_glyphs_are_dropped() {
        assert_eq!(strip_unknown_glyphs("2+2=?#@4"), "2+2=4");
        assert_eq!(strip_unknown_glyphs("f'(x) ≈ 3"), "f'(x)  3");
    }

    #[test]
    fn times_sign_between_digits() {
        assert_eq!(repair_times_sign("2 x 3"), "2*3");
        assert_eq!(repair_times_sign("2X3x4"), "2*3*4");
        assert_eq!(repair_times_sign("2x+3"), "2x+3");
        assert_eq!(repair_times_sign("x 3"), "x 3");
    }

    #[test]
    fn digit_confusions() {
        assert_eq!(correct_digit_confusions("1o + 2O"), "10 + 20");
        assert_eq!(correct_digit_confusions("l5 * 3I"), "15 * 31");
        assert_eq!(correct_digit_confusions("2log(x) + 3ln(x)"), "2log(x) + 3ln(x)");
        assert_eq!(correct_digit_confusions("20% of 50"), "20% of 50");
    }

    #[test]
    fn function_names_reassembled() {
        assert_eq!(reassemble_function_names("s i n h(x)"), "sinh(x)");
        assert_eq!(reassemble_function_names("a r c s i n(0.5)"), "arcsin(0.5)");
        assert_eq!(reassemble_function_names("2 c o s(0)"), "2 cos(0)");
        assert_eq!(reassemble_function_names("S Q R T 16"), "sqrt 16");
        assert_eq!(reassemble_function_names("sin(x)"), "sin(x)");
    }

    #[test]
    fn operator_spacing() {
        assert_eq!(tighten_operator_spacing("2 x + 5 = 15"), "2 x+5=15");
        assert_eq!(tighten_operator_spacing("x ^ 2 - 1"), "x^2-1");
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(normalize("  2 x 3 + 4 "), "2*3+4");
        assert_eq!(normalize("x² − 5x + 6 = 0"), "x^2-5x+6=0");
        assert_eq!(normalize("s i n(3o°)"), "sin(30)");
        assert_eq!(normalize("2 x o5"), "2*05");
        assert_eq!(normalize("2xo5"), "2xo5");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn pipeline_is_idempotent_on_samples() {
        for s in ["2 x 3", "x² − 5x + 6 = 0", "lim x → ∞ 1/x", "2 x o5", "1oooo2"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s}");
        }
    }

    #[test]
    fn extract_keeps_math_lines() {
        let text = "Homework\n2x + 5 = 15\n\nshow your work\ndifferentiate sin(x)\n";
        assert_eq!(
            extract_problems(text),
            vec!["2x+5=15".to_string(), "differentiate sin(x)".to_string()]
        );
    }
}
