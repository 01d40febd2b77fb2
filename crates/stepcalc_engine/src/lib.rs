//! Step-by-step solver for OCR-normalized math problems.
//!
//! `raw text → normalize → classify → solver → SolveResult`. Every solve
//! returns a well-formed trace; errors never escape [`Engine::solve`].
//!
//! ```
//! let result = stepcalc_engine::solve("2x + 5 = 15");
//! assert_eq!(result.solution, "x = 5");
//! ```

pub mod classify;
pub mod engine;
pub mod error;
pub mod numeric;
pub mod options;
pub mod session;
pub mod solvers;
pub mod terms;
pub mod trace;

pub use classify::{classify, SolverKind};
pub use engine::{solve, Engine};
pub use error::SolveError;
pub use options::{AngleMode, SolverOptions};
pub use session::CalculatorSession;
pub use stepcalc_types::{format_number, SolveResult, Step, StepKind};
pub use trace::{Outcome, StepTrace};
