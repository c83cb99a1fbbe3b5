#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Submission failed: {0}")]
    Submission(String),
}

impl CoreError {
    /// True for faults a client can fix by changing its input, as opposed
    /// to calling an operation in the wrong state.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}
