use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a trace entry, used by renderers to pick an icon/colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Problem,
    Simplify,
    Substitute,
    Calculate,
    Rule,
    Result,
    Error,
    Note,
}

impl StepKind {
    /// Kinds that close a solve with an answer or a failure.
    pub fn is_terminal_answer(self) -> bool {
        matches!(self, StepKind::Result | StepKind::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            StepKind::Problem => "Problem",
            StepKind::Simplify => "Simplify",
            StepKind::Substitute => "Substitute",
            StepKind::Calculate => "Calculate",
            StepKind::Rule => "Rule",
            StepKind::Result => "Result",
            StepKind::Error => "Error",
            StepKind::Note => "Note",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled entry of the solution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub expression: String,
    pub explanation: String,
    pub kind: StepKind,
}

impl Step {
    pub fn new(kind: StepKind, expression: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            explanation: explanation.into(),
            kind,
        }
    }
}

/// Outcome of a single solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Human-readable answer. Never empty.
    pub solution: String,
    /// Trace in chronological order. Never empty; the first entry is the problem echo.
    pub steps: Vec<Step>,
    /// Numeric answer available for "ANS" recall, when the solve produced exactly one number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<String>,
}

impl SolveResult {
    /// The step that closed the solve.
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// True when the trace ended in an `Error` step (possibly followed by a hint).
    pub fn is_error(&self) -> bool {
        self.steps.iter().any(|s| s.kind == StepKind::Error)
    }

    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }
}
