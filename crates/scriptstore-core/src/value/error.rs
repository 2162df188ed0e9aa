//! Errors raised when a script value does not have the shape a caller needs.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl CoercionError {
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        CoercionError::TypeMismatch { expected, found }
    }
}
