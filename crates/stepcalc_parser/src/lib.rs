//! Text front end of the solver: OCR normalization and arithmetic evaluation.
//!
//! [`normalize`] turns raw recognized text into canonical ASCII math;
//! [`calculate`] evaluates a purely numeric expression string.

pub mod error;
pub mod eval;
pub mod normalize;

pub use error::EvalError;
pub use eval::{calculate, MAX_DEPTH};
pub use normalize::{extract_problems, normalize};
