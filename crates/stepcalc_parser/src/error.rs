use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("Unbalanced parentheses")]
    UnbalancedParens,
    #[error("Result is not a finite number")]
    NonFinite,
    #[error("Expression is nested more than {0} levels deep")]
    TooDeep(usize),
}
