use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;

/// Seat counts offered by the intake form. `other` routes the customer to a
/// follow-up conversation instead of a number.
pub const SEAT_CHOICES: &[&str] = &["2", "4", "6", "8", "10", "12", "other"];

/// Fixed hardwood list offered at the materials step.
pub const WOOD_CHOICES: &[&str] = &[
    "zitan",
    "huanghuali",
    "xiangzhi",
    "black-rosewood",
    "red-rosewood",
    "ebony",
    "striped-ebony",
    "jichimu",
];

/// Table-top shape. The empty label is the unset sentinel the form starts
/// with; the UI never offers it as a choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Round,
    Rect,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Shape {
    pub fn label(self) -> &'static str {
        match self {
            Shape::Round => "round",
            Shape::Rect => "rect",
            Shape::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "round" => Some(Shape::Round),
            "rect" => Some(Shape::Rect),
            "" => Some(Shape::Unset),
            _ => None,
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["round", "rect"]
    }
}

/// Length-to-width ratio, only meaningful for rectangular tops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Ratio {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "4:3")]
    FourToThree,
    #[serde(rename = "16:9")]
    SixteenToNine,
    #[serde(rename = "custom")]
    Custom,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Ratio {
    pub fn label(self) -> &'static str {
        match self {
            Ratio::OneToOne => "1:1",
            Ratio::FourToThree => "4:3",
            Ratio::SixteenToNine => "16:9",
            Ratio::Custom => "custom",
            Ratio::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1:1" => Some(Ratio::OneToOne),
            "4:3" => Some(Ratio::FourToThree),
            "16:9" => Some(Ratio::SixteenToNine),
            "custom" => Some(Ratio::Custom),
            "" => Some(Ratio::Unset),
            _ => None,
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["1:1", "4:3", "16:9", "custom"]
    }
}

/// Table height. Defaults to standard; there is no unset sentinel because the
/// original form preselects the standard height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableHeight {
    Low,
    #[default]
    Standard,
    High,
}

impl TableHeight {
    pub fn label(self) -> &'static str {
        match self {
            TableHeight::Low => "low",
            TableHeight::Standard => "standard",
            TableHeight::High => "high",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "low" => Some(TableHeight::Low),
            "standard" => Some(TableHeight::Standard),
            "high" => Some(TableHeight::High),
            _ => None,
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["low", "standard", "high"]
    }

    /// Approximate surface height used in prompts and the order sheet.
    pub fn millimetres(self) -> &'static str {
        match self {
            TableHeight::Low => "≈720mm",
            TableHeight::Standard => "≈760mm",
            TableHeight::High => "≈830mm",
        }
    }
}

/// Chair back style, collected only when a backrest was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChairStyle {
    Circle,
    Square,
    Guan,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl ChairStyle {
    pub fn label(self) -> &'static str {
        match self {
            ChairStyle::Circle => "circle",
            ChairStyle::Square => "square",
            ChairStyle::Guan => "guan",
            ChairStyle::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "circle" => Some(ChairStyle::Circle),
            "square" => Some(ChairStyle::Square),
            "guan" => Some(ChairStyle::Guan),
            "" => Some(ChairStyle::Unset),
            _ => None,
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["circle", "square", "guan"]
    }
}

/// Budget bracket in CNY.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Budget {
    #[serde(rename = "<30k")]
    Under30k,
    #[serde(rename = "30-80k")]
    From30To80k,
    #[serde(rename = "80-200k")]
    From80To200k,
    #[serde(rename = ">200k")]
    Over200k,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Budget {
    pub fn label(self) -> &'static str {
        match self {
            Budget::Under30k => "<30k",
            Budget::From30To80k => "30-80k",
            Budget::From80To200k => "80-200k",
            Budget::Over200k => ">200k",
            Budget::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "<30k" => Some(Budget::Under30k),
            "30-80k" => Some(Budget::From30To80k),
            "80-200k" => Some(Budget::From80To200k),
            ">200k" => Some(Budget::Over200k),
            "" => Some(Budget::Unset),
            _ => None,
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["<30k", "30-80k", "80-200k", ">200k"]
    }
}

/// Secondary uses for the table. Declared by the model but collected by no
/// step today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MultiFunction {
    Tea,
    Guest,
}

impl MultiFunction {
    pub fn label(self) -> &'static str {
        match self {
            MultiFunction::Tea => "tea",
            MultiFunction::Guest => "guest",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "tea" => Some(MultiFunction::Tea),
            "guest" => Some(MultiFunction::Guest),
            _ => None,
        }
    }
}

/// Upgrades for a distinguished main seat. Declared by the model but
/// collected by no step today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MainSeatFeature {
    Wider,
    Higher,
    Carving,
    Inlay,
}

impl MainSeatFeature {
    pub fn label(self) -> &'static str {
        match self {
            MainSeatFeature::Wider => "wider",
            MainSeatFeature::Higher => "higher",
            MainSeatFeature::Carving => "carving",
            MainSeatFeature::Inlay => "inlay",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "wider" => Some(MainSeatFeature::Wider),
            "higher" => Some(MainSeatFeature::Higher),
            "carving" => Some(MainSeatFeature::Carving),
            "inlay" => Some(MainSeatFeature::Inlay),
            _ => None,
        }
    }
}

/// Identity of every order-form field. The wire name is the serde name used
/// by [`crate::form::OrderForm`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Contact,
    Shape,
    Ratio,
    Seats,
    TableHeight,
    HeightReason,
    ChairBack,
    ChairStyle,
    ChairArmrest,
    MultiFunction,
    MainSeat,
    MainSeatFeatures,
    RoomSize,
    Budget,
    DueTime,
    Wood,
    Extra,
}

impl FieldId {
    /// Every field in declaration order.
    pub const ALL: [FieldId; 18] = [
        FieldId::Name,
        FieldId::Contact,
        FieldId::Shape,
        FieldId::Ratio,
        FieldId::Seats,
        FieldId::TableHeight,
        FieldId::HeightReason,
        FieldId::ChairBack,
        FieldId::ChairStyle,
        FieldId::ChairArmrest,
        FieldId::MultiFunction,
        FieldId::MainSeat,
        FieldId::MainSeatFeatures,
        FieldId::RoomSize,
        FieldId::Budget,
        FieldId::DueTime,
        FieldId::Wood,
        FieldId::Extra,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Contact => "contact",
            FieldId::Shape => "shape",
            FieldId::Ratio => "ratio",
            FieldId::Seats => "seats",
            FieldId::TableHeight => "table_height",
            FieldId::HeightReason => "height_reason",
            FieldId::ChairBack => "chair_back",
            FieldId::ChairStyle => "chair_style",
            FieldId::ChairArmrest => "chair_armrest",
            FieldId::MultiFunction => "multi_function",
            FieldId::MainSeat => "main_seat",
            FieldId::MainSeatFeatures => "main_seat_features",
            FieldId::RoomSize => "room_size",
            FieldId::Budget => "budget",
            FieldId::DueTime => "due_time",
            FieldId::Wood => "wood",
            FieldId::Extra => "extra",
        }
    }

    /// Prompt label shown to the customer.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name / salutation",
            FieldId::Contact => "Phone / WeChat",
            FieldId::Shape => "Table shape",
            FieldId::Ratio => "Length-to-width ratio",
            FieldId::Seats => "Seats",
            FieldId::TableHeight => "Table height",
            FieldId::HeightReason => "Reason for the non-standard height",
            FieldId::ChairBack => "Chairs need a backrest",
            FieldId::ChairStyle => "Chair style",
            FieldId::ChairArmrest => "Chairs need armrests",
            FieldId::MultiFunction => "Secondary uses",
            FieldId::MainSeat => "Distinguished main seat",
            FieldId::MainSeatFeatures => "Main seat upgrades",
            FieldId::RoomSize => "Room size (L×W×H mm)",
            FieldId::Budget => "Budget",
            FieldId::DueTime => "Due date",
            FieldId::Wood => "Wood",
            FieldId::Extra => "Additional notes",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Name
            | FieldId::Contact
            | FieldId::Seats
            | FieldId::HeightReason
            | FieldId::RoomSize
            | FieldId::Wood
            | FieldId::Extra => FieldKind::Text,
            FieldId::DueTime => FieldKind::Date,
            FieldId::ChairBack | FieldId::ChairArmrest | FieldId::MainSeat => FieldKind::Flag,
            FieldId::Shape => FieldKind::Shape,
            FieldId::Ratio => FieldKind::Ratio,
            FieldId::TableHeight => FieldKind::Height,
            FieldId::ChairStyle => FieldKind::ChairStyle,
            FieldId::Budget => FieldKind::Budget,
            FieldId::MultiFunction => FieldKind::Functions,
            FieldId::MainSeatFeatures => FieldKind::SeatFeatures,
        }
    }

    /// Fixed choice list, where one exists.
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            FieldId::Shape => Some(Shape::choices()),
            FieldId::Ratio => Some(Ratio::choices()),
            FieldId::Seats => Some(SEAT_CHOICES),
            FieldId::TableHeight => Some(TableHeight::choices()),
            FieldId::ChairStyle => Some(ChairStyle::choices()),
            FieldId::Budget => Some(Budget::choices()),
            FieldId::MultiFunction => Some(&["tea", "guest"]),
            FieldId::MainSeatFeatures => Some(&["wider", "higher", "carving", "inlay"]),
            FieldId::Wood => Some(WOOD_CHOICES),
            _ => None,
        }
    }

    /// Extra prompt hint, where one helps.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            FieldId::TableHeight => Some("low ≈720mm, standard ≈760mm, high ≈830mm"),
            FieldId::DueTime => Some("YYYY-MM-DD"),
            FieldId::RoomSize => Some("e.g. 4500×3200×2800"),
            _ => None,
        }
    }

    /// Converts raw user text into a typed value for this field. This is the
    /// only place out-of-enumeration labels are rejected; typed callers never
    /// reach this path.
    pub fn parse_value(self, raw: &str) -> Result<FieldValue, FormError> {
        let reject = |raw: &str| FormError::InvalidFieldValue {
            field: self.wire_name().to_string(),
            given: raw.to_string(),
        };
        match self.kind() {
            FieldKind::Text => {
                if let Some(choices) = self.choices()
                    && !raw.is_empty()
                    && !choices.contains(&raw)
                {
                    return Err(reject(raw));
                }
                Ok(FieldValue::Text(raw.to_string()))
            }
            FieldKind::Date => {
                if raw.is_empty() || due_date_pattern().is_match(raw) {
                    Ok(FieldValue::Text(raw.to_string()))
                } else {
                    Err(reject(raw))
                }
            }
            FieldKind::Flag => parse_flag(raw).map(FieldValue::Flag).ok_or_else(|| reject(raw)),
            FieldKind::Shape => Shape::from_label(raw)
                .map(FieldValue::Shape)
                .ok_or_else(|| reject(raw)),
            FieldKind::Ratio => Ratio::from_label(raw)
                .map(FieldValue::Ratio)
                .ok_or_else(|| reject(raw)),
            FieldKind::Height => TableHeight::from_label(raw)
                .map(FieldValue::Height)
                .ok_or_else(|| reject(raw)),
            FieldKind::ChairStyle => ChairStyle::from_label(raw)
                .map(FieldValue::ChairStyle)
                .ok_or_else(|| reject(raw)),
            FieldKind::Budget => Budget::from_label(raw)
                .map(FieldValue::Budget)
                .ok_or_else(|| reject(raw)),
            FieldKind::Functions => parse_set(raw, MultiFunction::from_label)
                .map(FieldValue::Functions)
                .ok_or_else(|| reject(raw)),
            FieldKind::SeatFeatures => parse_set(raw, MainSeatFeature::from_label)
                .map(FieldValue::SeatFeatures)
                .ok_or_else(|| reject(raw)),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Value kind a field accepts. Used to check patches and to pick widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Flag,
    Shape,
    Ratio,
    Height,
    ChairStyle,
    Budget,
    Functions,
    SeatFeatures,
}

/// Tagged value union carried by a [`crate::form::FieldPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Shape(Shape),
    Ratio(Ratio),
    Height(TableHeight),
    ChairStyle(ChairStyle),
    Budget(Budget),
    Functions(BTreeSet<MultiFunction>),
    SeatFeatures(BTreeSet<MainSeatFeature>),
}

impl FieldValue {
    /// True when the value differs from its unset/default sentinel. A flag
    /// counts as set only when enabled; a table height is always set because
    /// the form preselects the standard height.
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Flag(flag) => *flag,
            FieldValue::Shape(shape) => *shape != Shape::Unset,
            FieldValue::Ratio(ratio) => *ratio != Ratio::Unset,
            FieldValue::Height(_) => true,
            FieldValue::ChairStyle(style) => *style != ChairStyle::Unset,
            FieldValue::Budget(budget) => *budget != Budget::Unset,
            FieldValue::Functions(set) => !set.is_empty(),
            FieldValue::SeatFeatures(set) => !set.is_empty(),
        }
    }

    /// Wire-shaped JSON for render payloads.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Flag(flag) => Value::Bool(*flag),
            FieldValue::Shape(shape) => Value::String(shape.label().to_string()),
            FieldValue::Ratio(ratio) => Value::String(ratio.label().to_string()),
            FieldValue::Height(height) => Value::String(height.label().to_string()),
            FieldValue::ChairStyle(style) => Value::String(style.label().to_string()),
            FieldValue::Budget(budget) => Value::String(budget.label().to_string()),
            FieldValue::Functions(set) => Value::Array(
                set.iter()
                    .map(|entry| Value::String(entry.label().to_string()))
                    .collect(),
            ),
            FieldValue::SeatFeatures(set) => Value::Array(
                set.iter()
                    .map(|entry| Value::String(entry.label().to_string()))
                    .collect(),
            ),
        }
    }

    /// Human-readable rendition used in prompts and text renders.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Flag(flag) => if *flag { "yes" } else { "no" }.to_string(),
            FieldValue::Shape(shape) => shape.label().to_string(),
            FieldValue::Ratio(ratio) => ratio.label().to_string(),
            FieldValue::Height(height) => height.label().to_string(),
            FieldValue::ChairStyle(style) => style.label().to_string(),
            FieldValue::Budget(budget) => budget.label().to_string(),
            FieldValue::Functions(set) => {
                set.iter().map(|entry| entry.label()).collect::<Vec<_>>().join(", ")
            }
            FieldValue::SeatFeatures(set) => {
                set.iter().map(|entry| entry.label()).collect::<Vec<_>>().join(", ")
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" => Some(true),
        "no" | "n" | "false" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_set<T: Ord>(raw: &str, from_label: impl Fn(&str) -> Option<T>) -> Option<BTreeSet<T>> {
    let mut set = BTreeSet::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        set.insert(from_label(part)?);
    }
    Some(set)
}

fn due_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded pattern compiles")
    })
}

/// Checks the due-date wire shape without parsing. Empty means "not decided".
pub fn due_date_is_well_formed(raw: &str) -> bool {
    raw.is_empty() || due_date_pattern().is_match(raw)
}
