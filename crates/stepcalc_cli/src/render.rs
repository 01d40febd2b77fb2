//! Text and JSON rendering of solve results.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use stepcalc_types::SolveResult;

/// Numbered step listing followed by the solution line.
pub fn render_text(result: &SolveResult, show_steps: bool) -> String {
    if !show_steps {
        return result.solution.clone();
    }

    let mut out = String::new();
    for (i, step) in result.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, step.kind, step.expression);
        if !step.explanation.is_empty() {
            let _ = writeln!(out, "   {}", step.explanation);
        }
    }
    let _ = write!(out, "=> {}", result.solution);
    out
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
