use crate::error::FormError;
use crate::fields::FieldId;
use crate::form::{FieldPatch, OrderForm};
use crate::render::{RenderPayload, build_render_payload};
use crate::steps::{StepCursor, StepId};
use crate::submit::SubmissionSink;

/// One customer's wizard session: an answer record plus a step cursor.
/// Updates apply strictly in call order; submission consumes the session, so
/// no mutation can follow delivery.
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: OrderForm,
    cursor: StepCursor,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from previously collected answers, back at the first step.
    pub fn with_answers(form: OrderForm) -> Self {
        Self {
            form,
            cursor: StepCursor::new(),
        }
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn cursor(&self) -> StepCursor {
        self.cursor
    }

    pub fn current_step(&self) -> StepId {
        self.cursor.step()
    }

    /// Applies one typed patch to the record.
    pub fn apply(&mut self, patch: FieldPatch) -> Result<(), FormError> {
        self.form.apply(patch)
    }

    /// Parses raw user text for a field and applies it.
    pub fn set(&mut self, field: FieldId, raw: &str) -> Result<(), FormError> {
        self.apply(FieldPatch::parse(field, raw)?)
    }

    pub fn advance(&mut self) -> StepId {
        self.cursor.advance()
    }

    pub fn retreat(&mut self) -> StepId {
        self.cursor.retreat()
    }

    /// Render payload for the current step.
    pub fn render(&self) -> RenderPayload {
        build_render_payload(self.cursor, &self.form)
    }

    /// Delivers the full record to the sink and ends the session. Only the
    /// terminal step may submit; empty fields never block.
    pub fn submit(self, sink: &mut dyn SubmissionSink) -> Result<OrderForm, FormError> {
        if !self.cursor.is_terminal() {
            return Err(FormError::OutOfRangeStep(self.cursor.index()));
        }
        sink.deliver(&self.form)?;
        Ok(self.form)
    }
}
