use thiserror::Error;
use tracing::info;

use crate::form::OrderForm;

/// Failure modes of a submission sink. The shipped sinks cannot fail in
/// practice; a real order service would populate `Rejected`.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("order payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("submission sink rejected the order: {0}")]
    Rejected(String),
}

/// Receives the complete answer record exactly once, at submit time. No
/// retry or acknowledgment contract is defined at this seam.
pub trait SubmissionSink {
    fn deliver(&mut self, order: &OrderForm) -> Result<(), SubmissionError>;
}

/// Logs the order payload instead of calling a real order service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl SubmissionSink for ConsoleSink {
    fn deliver(&mut self, order: &OrderForm) -> Result<(), SubmissionError> {
        let payload = serde_json::to_string(order)?;
        info!(target: "tabula::submit", %payload, "order submitted");
        Ok(())
    }
}

/// Test double retaining every delivered record.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub delivered: Vec<OrderForm>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionSink for MemorySink {
    fn deliver(&mut self, order: &OrderForm) -> Result<(), SubmissionError> {
        self.delivered.push(order.clone());
        Ok(())
    }
}
