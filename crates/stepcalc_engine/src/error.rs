use stepcalc_parser::EvalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A value outside a function's domain (negative root, log of a non-positive number, ...).
    #[error("{0}")]
    Domain(String),
    /// No supported pattern recognizes the input.
    #[error("{message}")]
    Unsupported { message: String, hint: String },
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl SolveError {
    pub fn domain(message: impl Into<String>) -> Self {
        SolveError::Domain(message.into())
    }

    pub fn unsupported(message: impl Into<String>, hint: impl Into<String>) -> Self {
        SolveError::Unsupported {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Whether the failure means "input not understood" rather than "math went wrong".
    pub fn is_format_mismatch(&self) -> bool {
        match self {
            SolveError::Unsupported { .. } => true,
            SolveError::Eval(e) => !matches!(e, EvalError::DivisionByZero | EvalError::NonFinite),
            SolveError::Domain(_) => false,
        }
    }

    /// Follow-up advice shown after the failure.
    pub fn hint(&self) -> String {
        match self {
            SolveError::Unsupported { hint, .. } => hint.clone(),
            SolveError::Domain(_) => {
                "Check that every value lies inside the domain of the function applied to it."
                    .to_string()
            }
            SolveError::Eval(EvalError::DivisionByZero) => {
                "A divisor evaluated to zero; division by zero is undefined.".to_string()
            }
            SolveError::Eval(EvalError::NonFinite) => {
                "The result is too large or not a real number.".to_string()
            }
            SolveError::Eval(EvalError::TooDeep(limit)) => format!(
                "Expressions may nest at most {} levels of parentheses, signs or function calls.",
                limit
            ),
            SolveError::Eval(e) => format!(
                "Only numbers, + - * / ^, parentheses and supported functions can be evaluated ({}).",
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mismatch_classification() {
        assert!(SolveError::unsupported("x", "y").is_format_mismatch());
        assert!(SolveError::Eval(EvalError::UnexpectedChar('q', 0)).is_format_mismatch());
        assert!(!SolveError::Eval(EvalError::DivisionByZero).is_format_mismatch());
        assert!(SolveError::Eval(EvalError::TooDeep(256)).is_format_mismatch());
        assert!(!SolveError::domain("negative root").is_format_mismatch());
    }

    #[test]
    fn messages() {
        assert_eq!(SolveError::domain("bad").to_string(), "bad");
        assert_eq!(
            SolveError::Eval(EvalError::DivisionByZero).to_string(),
            "Division by zero"
        );
        assert_eq!(SolveError::unsupported("m", "h").hint(), "h");
    }
}
