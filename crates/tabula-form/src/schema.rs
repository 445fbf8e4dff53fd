use schemars::schema_for;
use serde_json::{Map, Value, json};

use crate::fields::{FieldId, FieldKind};
use crate::form::OrderForm;
use crate::steps::StepId;
use crate::visibility::resolve_visibility;

/// JSON Schema for the whole answer record, derived from the type.
pub fn form_schema() -> Value {
    serde_json::to_value(schema_for!(OrderForm)).unwrap_or(Value::Null)
}

/// Object schema for one step, restricted to its currently-visible fields.
/// Re-derived from the record on every call, like visibility itself.
pub fn step_schema(step: StepId, form: &OrderForm) -> Value {
    let visibility = resolve_visibility(step, form);
    let mut properties = Map::new();
    for binding in step.spec().bindings {
        if !visibility.get(&binding.field).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(binding.field.wire_name().into(), field_schema(binding.field));
    }

    json!({
        "type": "object",
        "title": step.title(),
        "properties": properties,
        "additionalProperties": false,
    })
}

fn field_schema(field: FieldId) -> Value {
    match field.kind() {
        FieldKind::Flag => json!({ "type": "boolean" }),
        FieldKind::Date => json!({ "type": "string", "format": "date" }),
        FieldKind::Functions | FieldKind::SeatFeatures => {
            let items = match field.choices() {
                Some(choices) => json!({ "type": "string", "enum": choices }),
                None => json!({ "type": "string" }),
            };
            json!({ "type": "array", "items": items, "uniqueItems": true })
        }
        _ => match field.choices() {
            Some(choices) => json!({ "type": "string", "enum": choices }),
            None => json!({ "type": "string" }),
        },
    }
}
