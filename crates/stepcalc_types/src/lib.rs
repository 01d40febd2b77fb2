//! Shared solution-trace types.
//!
//! A solve produces a [`SolveResult`]: the final solution string plus the
//! ordered [`Step`] trace that explains how it was reached. These types carry
//! no engine logic so renderers (CLI, JSON, UI bindings) can depend on them
//! alone.

pub mod format;
pub mod step;

pub use format::format_number;
pub use step::{SolveResult, Step, StepKind};
