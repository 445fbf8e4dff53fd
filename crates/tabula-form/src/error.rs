use thiserror::Error;

use crate::submit::SubmissionError;

/// Failures the form core can report. Cursor clamping and typed patches keep
/// the first two unreachable from the wizard's own wiring; they exist for the
/// untyped boundaries (JSON answers, CLI arguments) and future extension.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid value '{given}' for field '{field}'")]
    InvalidFieldValue { field: String, given: String },
    #[error("step {0} is out of range for this operation (valid steps are 0..=5)")]
    OutOfRangeStep(usize),
    #[error("submission failed: {0}")]
    SubmissionFailure(#[from] SubmissionError),
}
