//! Step accumulator owned by one solve call.

use crate::error::SolveError;
use stepcalc_types::{format_number, SolveResult, Step, StepKind};

/// What a solver produced when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A closed answer. `value` is set when the answer is a single number.
    Answer { solution: String, value: Option<f64> },
    /// Method description without a computed answer.
    Guidance { solution: String },
}

impl Outcome {
    pub fn answer(solution: impl Into<String>) -> Self {
        Outcome::Answer {
            solution: solution.into(),
            value: None,
        }
    }

    pub fn numeric(solution: impl Into<String>, value: f64) -> Self {
        Outcome::Answer {
            solution: solution.into(),
            value: Some(value),
        }
    }

    /// A bare number as both solution and recall value.
    pub fn value(value: f64) -> Self {
        Outcome::numeric(format_number(value), value)
    }

    pub fn guidance(solution: impl Into<String>) -> Self {
        Outcome::Guidance {
            solution: solution.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct StepTrace {
    steps: Vec<Step>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: StepKind,
        expression: impl Into<String>,
        explanation: impl Into<String>,
    ) {
        self.steps.push(Step::new(kind, expression, explanation));
    }

    pub fn problem(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Problem, expression, explanation);
    }

    pub fn simplify(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Simplify, expression, explanation);
    }

    pub fn substitute(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Substitute, expression, explanation);
    }

    pub fn calculate(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Calculate, expression, explanation);
    }

    pub fn rule(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Rule, expression, explanation);
    }

    /// Record a rule unless the identical rule is already in the trace.
    pub fn rule_once(&mut self, expression: &str, explanation: &str) {
        let seen = self.steps.iter().any(|s| {
            s.kind == StepKind::Rule && s.expression == expression && s.explanation == explanation
        });
        if !seen {
            self.rule(expression, explanation);
        }
    }

    pub fn note(&mut self, expression: impl Into<String>, explanation: impl Into<String>) {
        self.push(StepKind::Note, expression, explanation);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Close the trace with the solver's outcome.
    pub fn finish(mut self, outcome: Outcome) -> SolveResult {
        match outcome {
            Outcome::Answer { solution, value } => {
                self.push(StepKind::Result, solution.clone(), "Final answer");
                SolveResult {
                    solution,
                    steps: self.steps,
                    last_answer: value.map(format_number),
                }
            }
            Outcome::Guidance { solution } => {
                self.push(StepKind::Note, solution.clone(), "Method summary");
                SolveResult {
                    solution,
                    steps: self.steps,
                    last_answer: None,
                }
            }
        }
    }

    /// Close the trace with a failure: one `Result` or `Error` step, then a hint.
    pub fn fail(mut self, input: &str, error: SolveError) -> SolveResult {
        let hint = error.hint();
        let solution = match &error {
            SolveError::Unsupported { message, .. } => {
                self.push(StepKind::Result, message.clone(), "No supported pattern matched");
                message.clone()
            }
            e if e.is_format_mismatch() => {
                let solution = format!("Could not solve: {}", input);
                self.push(StepKind::Result, solution.clone(), e.to_string());
                solution
            }
            e => {
                let solution = format!("Could not solve: {}", e);
                self.push(StepKind::Error, solution.clone(), e.to_string());
                solution
            }
        };
        self.push(StepKind::Note, hint, "Hint");

        SolveResult {
            solution,
            steps: self.steps,
            last_answer: None,
        }
    }
}
