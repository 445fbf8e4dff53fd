use std::collections::BTreeMap;

use crate::fields::FieldId;
use crate::form::OrderForm;
use crate::steps::StepId;

pub type VisibilityMap = BTreeMap<FieldId, bool>;

/// Resolves which of a step's fields are currently visible. A binding with
/// no guard is always visible; guarded bindings follow their predicate,
/// re-evaluated from the current record on every call.
pub fn resolve_visibility(step: StepId, form: &OrderForm) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    for binding in step.spec().bindings {
        let visible = binding
            .guard
            .as_ref()
            .map(|guard| guard.evaluate(form))
            .unwrap_or(true);
        map.insert(binding.field, visible);
    }
    map
}

/// The step's visible fields, in binding order.
pub fn visible_fields(step: StepId, form: &OrderForm) -> Vec<FieldId> {
    step.spec()
        .bindings
        .iter()
        .filter(|binding| {
            binding
                .guard
                .as_ref()
                .map(|guard| guard.evaluate(form))
                .unwrap_or(true)
        })
        .map(|binding| binding.field)
        .collect()
}
