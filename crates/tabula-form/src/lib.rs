#![allow(missing_docs)]

pub mod error;
pub mod fields;
pub mod form;
pub mod guard;
pub mod render;
pub mod schema;
pub mod session;
pub mod steps;
pub mod submit;
pub mod summary;
pub mod validate;
pub mod visibility;

pub use error::FormError;
pub use fields::{
    Budget, ChairStyle, FieldId, FieldKind, FieldValue, MainSeatFeature, MultiFunction, Ratio,
    SEAT_CHOICES, Shape, TableHeight, WOOD_CHOICES,
};
pub use form::{FieldPatch, OrderForm};
pub use guard::Guard;
pub use render::{
    RenderField, RenderNav, RenderPayload, RenderProgress, RenderStatus, build_render_payload,
    render_card, render_json_ui, render_text,
};
pub use schema::{form_schema, step_schema};
pub use session::Session;
pub use steps::{FieldBinding, STEP_COUNT, STEPS, StepCursor, StepId, StepSpec};
pub use submit::{ConsoleSink, MemorySink, SubmissionError, SubmissionSink};
pub use summary::{SummaryError, render_order};
pub use validate::{
    ValidationFinding, ValidationReport, unknown_fields, validate, validate_answers,
};
pub use visibility::{VisibilityMap, resolve_visibility, visible_fields};
