use serde_json::{Map, Value, json};

use crate::fields::{FieldId, FieldKind};
use crate::form::OrderForm;
use crate::schema::step_schema;
use crate::steps::{STEP_COUNT, StepCursor, StepId};
use crate::visibility::resolve_visibility;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one visible field is still at its default.
    NeedInput,
    /// Every visible field across all steps holds a non-default value.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters over visible fields across the whole wizard.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single field slot for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
    pub current_value: Value,
    pub choices: Option<&'static [&'static str]>,
    pub hint: Option<&'static str>,
    pub visible: bool,
}

/// Which navigation actions the view should offer.
#[derive(Debug, Clone, Copy)]
pub struct RenderNav {
    pub can_advance: bool,
    pub can_retreat: bool,
    pub is_terminal: bool,
}

/// Declarative description of one step for the widget layer: which fields,
/// with which current values and guard-gated visibility.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub step: StepId,
    pub step_index: usize,
    pub step_count: usize,
    pub title: &'static str,
    pub status: RenderStatus,
    pub progress: RenderProgress,
    pub nav: RenderNav,
    pub fields: Vec<RenderField>,
    pub schema: Value,
}

/// Builds the payload for the cursor's current step from the current record.
pub fn build_render_payload(cursor: StepCursor, form: &OrderForm) -> RenderPayload {
    let step = cursor.step();
    let visibility = resolve_visibility(step, form);

    let fields = step
        .spec()
        .bindings
        .iter()
        .map(|binding| RenderField {
            id: binding.field,
            label: binding.field.label(),
            kind: binding.field.kind(),
            current_value: form.get(binding.field).to_json(),
            choices: binding.field.choices(),
            hint: binding.field.hint(),
            visible: visibility.get(&binding.field).copied().unwrap_or(true),
        })
        .collect::<Vec<_>>();

    let progress = wizard_progress(form);
    let status = if progress.answered == progress.total {
        RenderStatus::Complete
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        step,
        step_index: cursor.index(),
        step_count: STEP_COUNT,
        title: step.title(),
        status,
        progress,
        nav: RenderNav {
            can_advance: cursor.can_advance(),
            can_retreat: cursor.can_retreat(),
            is_terminal: cursor.is_terminal(),
        },
        fields,
        schema: step_schema(step, form),
    }
}

fn wizard_progress(form: &OrderForm) -> RenderProgress {
    let mut answered = 0;
    let mut total = 0;
    for step in StepId::ALL {
        let visibility = resolve_visibility(step, form);
        for (field, visible) in visibility {
            if !visible {
                continue;
            }
            total += 1;
            if form.get(field).is_set() {
                answered += 1;
            }
        }
    }
    RenderProgress { answered, total }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.wire_name().into()));
            map.insert("label".into(), Value::String(field.label.into()));
            map.insert(
                "type".into(),
                Value::String(field_kind_label(field.kind).into()),
            );
            map.insert("current_value".into(), field.current_value.clone());
            if let Some(choices) = field.choices {
                map.insert(
                    "choices".into(),
                    Value::Array(
                        choices
                            .iter()
                            .map(|choice| Value::String((*choice).into()))
                            .collect(),
                    ),
                );
            }
            if let Some(hint) = field.hint {
                map.insert("hint".into(), Value::String(hint.into()));
            }
            map.insert("visible".into(), Value::Bool(field.visible));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "step": payload.step,
        "step_index": payload.step_index,
        "step_count": payload.step_count,
        "title": payload.title,
        "status": payload.status.as_str(),
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "nav": {
            "can_advance": payload.nav.can_advance,
            "can_retreat": payload.nav.can_retreat,
            "is_terminal": payload.nav.is_terminal,
        },
        "fields": fields,
        "schema": payload.schema,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Step {}/{}: {}",
        payload.step_index + 1,
        payload.step_count,
        payload.title
    ));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    for field in payload.fields.iter().filter(|field| field.visible) {
        let mut entry = format!(" - {} ({})", field.id, field.label);
        let current = value_to_display(&field.current_value);
        if !current.is_empty() {
            entry.push_str(&format!(" = {}", current));
        }
        if let Some(choices) = field.choices {
            entry.push_str(&format!(" [{}]", choices.join("/")));
        }
        lines.push(entry);
    }

    let mut nav = Vec::new();
    if payload.nav.can_retreat {
        nav.push("back");
    }
    if payload.nav.can_advance {
        nav.push("next");
    }
    if payload.nav.is_terminal {
        nav.push("submit");
    }
    lines.push(format!("Actions: {}", nav.join(", ")));

    lines.join("\n")
}

/// Render the payload as an Adaptive Card v1.3 transport.
pub fn render_card(payload: &RenderPayload) -> Value {
    let mut body = Vec::new();

    body.push(json!({
        "type": "TextBlock",
        "text": format!("Step {}/{}: {}", payload.step_index + 1, payload.step_count, payload.title),
        "weight": "Bolder",
        "size": "Large",
        "wrap": true,
    }));

    body.push(json!({
        "type": "FactSet",
        "facts": [
            { "title": "Answered", "value": payload.progress.answered.to_string() },
            { "title": "Total", "value": payload.progress.total.to_string() }
        ]
    }));

    for field in payload.fields.iter().filter(|field| field.visible) {
        let mut items = Vec::new();
        items.push(json!({
            "type": "TextBlock",
            "text": field.label,
            "weight": "Bolder",
            "wrap": true,
        }));
        if let Some(hint) = field.hint {
            items.push(json!({
                "type": "TextBlock",
                "text": hint,
                "wrap": true,
                "spacing": "Small",
            }));
        }
        items.push(field_input(field));
        body.push(json!({
            "type": "Container",
            "items": items,
        }));
    }

    let mut actions = Vec::new();
    if payload.nav.can_retreat {
        actions.push(json!({
            "type": "Action.Submit",
            "title": "Back",
            "data": { "tabula": { "nav": "retreat" } }
        }));
    }
    if payload.nav.is_terminal {
        actions.push(json!({
            "type": "Action.Submit",
            "title": "Submit order",
            "data": { "tabula": { "nav": "submit" } }
        }));
    } else {
        actions.push(json!({
            "type": "Action.Submit",
            "title": "Next",
            "data": { "tabula": { "nav": "advance" } }
        }));
    }

    json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": "1.3",
        "body": body,
        "actions": actions,
    })
}

fn field_input(field: &RenderField) -> Value {
    match field.kind {
        FieldKind::Flag => {
            let mut map = Map::new();
            map.insert("type".into(), Value::String("Input.Toggle".into()));
            map.insert("id".into(), Value::String(field.id.wire_name().into()));
            map.insert("title".into(), Value::String(field.label.into()));
            map.insert("valueOn".into(), Value::String("true".into()));
            map.insert("valueOff".into(), Value::String("false".into()));
            if field.current_value.as_bool() == Some(true) {
                map.insert("value".into(), Value::String("true".into()));
            } else {
                map.insert("value".into(), Value::String("false".into()));
            }
            Value::Object(map)
        }
        FieldKind::Date => {
            let mut map = Map::new();
            map.insert("type".into(), Value::String("Input.Date".into()));
            map.insert("id".into(), Value::String(field.id.wire_name().into()));
            let current = value_to_display(&field.current_value);
            if !current.is_empty() {
                map.insert("value".into(), Value::String(current));
            }
            Value::Object(map)
        }
        _ => {
            if let Some(choices) = field.choices {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("Input.ChoiceSet".into()));
                map.insert("id".into(), Value::String(field.id.wire_name().into()));
                map.insert("style".into(), Value::String("compact".into()));
                let choices = choices
                    .iter()
                    .map(|choice| {
                        json!({
                            "title": choice,
                            "value": choice,
                        })
                    })
                    .collect::<Vec<_>>();
                map.insert("choices".into(), Value::Array(choices));
                let current = value_to_display(&field.current_value);
                if !current.is_empty() {
                    map.insert("value".into(), Value::String(current));
                }
                Value::Object(map)
            } else {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("Input.Text".into()));
                map.insert("id".into(), Value::String(field.id.wire_name().into()));
                let current = value_to_display(&field.current_value);
                if !current.is_empty() {
                    map.insert("value".into(), Value::String(current));
                }
                Value::Object(map)
            }
        }
    }
}

fn field_kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Date => "date",
        FieldKind::Flag => "flag",
        FieldKind::Shape => "shape",
        FieldKind::Ratio => "ratio",
        FieldKind::Height => "height",
        FieldKind::ChairStyle => "chair_style",
        FieldKind::Budget => "budget",
        FieldKind::Functions => "functions",
        FieldKind::SeatFeatures => "seat_features",
    }
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
