use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::fields::{
    Budget, ChairStyle, FieldId, FieldValue, MainSeatFeature, MultiFunction, Ratio, Shape,
    TableHeight,
};

/// One customer's answer record. Every field is always present; enum fields
/// start at their unset sentinel, the table height at the preselected
/// standard. The wire form matches the original intake form, including the
/// empty-string sentinels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OrderForm {
    pub name: String,
    pub contact: String,
    pub shape: Shape,
    pub ratio: Ratio,
    pub seats: String,
    pub table_height: TableHeight,
    pub height_reason: String,
    pub chair_back: bool,
    pub chair_style: ChairStyle,
    // The next four fields are declared by the model but collected by no
    // step; they ride along in the record and the submitted payload.
    pub chair_armrest: bool,
    pub multi_function: BTreeSet<MultiFunction>,
    pub main_seat: bool,
    pub main_seat_features: BTreeSet<MainSeatFeature>,
    pub room_size: String,
    pub budget: Budget,
    pub due_time: String,
    pub wood: String,
    pub extra: String,
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of one field, as a tagged value.
    pub fn get(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::Name => FieldValue::Text(self.name.clone()),
            FieldId::Contact => FieldValue::Text(self.contact.clone()),
            FieldId::Shape => FieldValue::Shape(self.shape),
            FieldId::Ratio => FieldValue::Ratio(self.ratio),
            FieldId::Seats => FieldValue::Text(self.seats.clone()),
            FieldId::TableHeight => FieldValue::Height(self.table_height),
            FieldId::HeightReason => FieldValue::Text(self.height_reason.clone()),
            FieldId::ChairBack => FieldValue::Flag(self.chair_back),
            FieldId::ChairStyle => FieldValue::ChairStyle(self.chair_style),
            FieldId::ChairArmrest => FieldValue::Flag(self.chair_armrest),
            FieldId::MultiFunction => FieldValue::Functions(self.multi_function.clone()),
            FieldId::MainSeat => FieldValue::Flag(self.main_seat),
            FieldId::MainSeatFeatures => FieldValue::SeatFeatures(self.main_seat_features.clone()),
            FieldId::RoomSize => FieldValue::Text(self.room_size.clone()),
            FieldId::Budget => FieldValue::Budget(self.budget),
            FieldId::DueTime => FieldValue::Text(self.due_time.clone()),
            FieldId::Wood => FieldValue::Text(self.wood.clone()),
            FieldId::Extra => FieldValue::Text(self.extra.clone()),
        }
    }

    /// Replaces exactly the patched field and nothing else. A value whose
    /// kind does not match the field is rejected at this boundary.
    pub fn apply(&mut self, patch: FieldPatch) -> Result<(), FormError> {
        use FieldId as F;
        use FieldValue as V;
        match (patch.field, patch.value) {
            (F::Name, V::Text(value)) => self.name = value,
            (F::Contact, V::Text(value)) => self.contact = value,
            (F::Shape, V::Shape(value)) => self.shape = value,
            (F::Ratio, V::Ratio(value)) => self.ratio = value,
            (F::Seats, V::Text(value)) => self.seats = value,
            (F::TableHeight, V::Height(value)) => self.table_height = value,
            (F::HeightReason, V::Text(value)) => self.height_reason = value,
            (F::ChairBack, V::Flag(value)) => self.chair_back = value,
            (F::ChairStyle, V::ChairStyle(value)) => self.chair_style = value,
            (F::ChairArmrest, V::Flag(value)) => self.chair_armrest = value,
            (F::MultiFunction, V::Functions(value)) => self.multi_function = value,
            (F::MainSeat, V::Flag(value)) => self.main_seat = value,
            (F::MainSeatFeatures, V::SeatFeatures(value)) => self.main_seat_features = value,
            (F::RoomSize, V::Text(value)) => self.room_size = value,
            (F::Budget, V::Budget(value)) => self.budget = value,
            (F::DueTime, V::Text(value)) => self.due_time = value,
            (F::Wood, V::Text(value)) => self.wood = value,
            (F::Extra, V::Text(value)) => self.extra = value,
            (field, value) => {
                return Err(FormError::InvalidFieldValue {
                    field: field.to_string(),
                    given: value.display(),
                });
            }
        }
        Ok(())
    }
}

/// A single-field update command. Construct via [`FieldPatch::new`] with a
/// typed value, or [`FieldPatch::parse`] from raw user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPatch {
    pub field: FieldId,
    pub value: FieldValue,
}

impl FieldPatch {
    pub fn new(field: FieldId, value: FieldValue) -> Self {
        Self { field, value }
    }

    pub fn parse(field: FieldId, raw: &str) -> Result<Self, FormError> {
        Ok(Self {
            field,
            value: field.parse_value(raw)?,
        })
    }
}
