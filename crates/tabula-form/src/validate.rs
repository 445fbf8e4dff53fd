use std::collections::BTreeSet;

use serde_json::Value;

use crate::fields::{FieldId, due_date_is_well_formed};
use crate::form::OrderForm;
use crate::steps::StepId;
use crate::visibility::resolve_visibility;

/// One advisory finding about a stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFinding {
    pub field: FieldId,
    pub message: String,
    pub code: &'static str,
}

/// Advisory report over a record. Navigation and submission never consult
/// it; `missing` lists visible-but-empty fields as a courtesy, and only
/// `findings` and `unknown_fields` make a record unclean.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
    pub missing: Vec<FieldId>,
    pub unknown_fields: Vec<String>,
}

impl ValidationReport {
    pub fn clean(&self) -> bool {
        self.findings.is_empty() && self.unknown_fields.is_empty()
    }
}

/// Inspects a record the way a future order service would: malformed stored
/// values become findings, empty visible fields are listed as missing.
pub fn validate(form: &OrderForm) -> ValidationReport {
    let mut report = ValidationReport::default();

    for step in StepId::ALL {
        let visibility = resolve_visibility(step, form);
        for binding in step.spec().bindings {
            if !visibility.get(&binding.field).copied().unwrap_or(true) {
                continue;
            }
            if !form.get(binding.field).is_set() {
                report.missing.push(binding.field);
            }
        }
    }

    if !due_date_is_well_formed(&form.due_time) {
        report.findings.push(ValidationFinding {
            field: FieldId::DueTime,
            message: format!("'{}' is not a YYYY-MM-DD date", form.due_time),
            code: "date_shape",
        });
    }
    check_choice(&mut report, FieldId::Seats, &form.seats);
    check_choice(&mut report, FieldId::Wood, &form.wood);

    report
}

/// Validates raw answers JSON: unknown keys are reported, then the record is
/// decoded with defaults for anything absent and inspected with [`validate`].
pub fn validate_answers(answers: &Value) -> Result<ValidationReport, serde_json::Error> {
    let unknown = unknown_fields(answers);
    let form: OrderForm = serde_json::from_value(answers.clone())?;
    let mut report = validate(&form);
    report.unknown_fields = unknown;
    Ok(report)
}

/// Keys in the answers object that name no declared field.
pub fn unknown_fields(answers: &Value) -> Vec<String> {
    let Some(map) = answers.as_object() else {
        return Vec::new();
    };
    let known: BTreeSet<&str> = FieldId::ALL.iter().map(|field| field.wire_name()).collect();
    map.keys()
        .filter(|key| !known.contains(key.as_str()))
        .cloned()
        .collect()
}

fn check_choice(report: &mut ValidationReport, field: FieldId, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(choices) = field.choices()
        && !choices.contains(&value)
    {
        report.findings.push(ValidationFinding {
            field,
            message: format!("'{}' is outside the fixed list", value),
            code: "choice_mismatch",
        });
    }
}
