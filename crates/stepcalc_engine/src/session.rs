//! Calculator keypad session: an input buffer plus answer recall.

use crate::engine::Engine;
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::SolveResult;
use tracing::debug;

static ANS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bans\b").expect("valid regex literal"));

/// Keys are appended verbatim; `ans` in the buffer recalls the last
/// numeric answer (or `0` before any answer exists).
#[derive(Debug, Default)]
pub struct CalculatorSession {
    engine: Engine,
    input: String,
    last_answer: Option<String>,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn press(&mut self, key: &str) {
        self.input.push_str(key);
    }

    /// Remove the last character of the buffer.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    /// Empty the buffer and forget the last answer.
    pub fn clear(&mut self) {
        self.input.clear();
        self.last_answer = None;
    }

    /// The buffer with every `ans` replaced by the recalled value.
    pub fn expanded_input(&self) -> String {
        let recalled = format!("({})", self.last_answer.as_deref().unwrap_or("0"));
        ANS_RE
            .replace_all(&self.input, regex::NoExpand(&recalled))
            .into_owned()
    }

    /// Solve the buffer, remember a numeric answer, and empty the buffer.
    pub fn evaluate(&mut self) -> SolveResult {
        let expanded = self.expanded_input();
        debug!(input = %self.input, expanded = %expanded, "session evaluate");
        let result = self.engine.solve(&expanded);
        if let Some(answer) = &result.last_answer {
            self.last_answer = Some(answer.clone());
        }
        self.input.clear();
        result
    }

    /// Replace the buffer with `line` and evaluate it.
    pub fn submit(&mut self, line: &str) -> SolveResult {
        self.input.clear();
        self.input.push_str(line);
        self.evaluate()
    }
}
