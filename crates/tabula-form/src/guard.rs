use crate::fields::{FieldId, FieldValue};
use crate::form::OrderForm;

/// Guard predicate over already-collected fields. Evaluation is pure and
/// re-run on every render; a guard turning false hides a field but never
/// erases its value.
///
/// The step table only needs `Eq`/`Ne`, the rest exist so new steps can
/// compose conditions without touching the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    Eq(FieldId, FieldValue),
    Ne(FieldId, FieldValue),
    IsSet(FieldId),
    All(&'static [Guard]),
    Any(&'static [Guard]),
    Not(&'static Guard),
}

impl Guard {
    pub fn evaluate(&self, form: &OrderForm) -> bool {
        match self {
            Guard::Eq(field, value) => form.get(*field) == *value,
            Guard::Ne(field, value) => form.get(*field) != *value,
            Guard::IsSet(field) => form.get(*field).is_set(),
            Guard::All(guards) => guards.iter().all(|guard| guard.evaluate(form)),
            Guard::Any(guards) => guards.iter().any(|guard| guard.evaluate(form)),
            Guard::Not(inner) => !inner.evaluate(form),
        }
    }
}
