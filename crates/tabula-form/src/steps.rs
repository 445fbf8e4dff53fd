use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::fields::{FieldId, FieldValue, Shape, TableHeight};
use crate::guard::Guard;

/// Number of wizard steps.
pub const STEP_COUNT: usize = 6;

/// The six fixed wizard steps, in order.
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
pub enum StepId {
    Basics,
    ShapeSeating,
    Height,
    Chairs,
    RoomBudget,
    Materials,
}

impl StepId {
    pub const ALL: [StepId; STEP_COUNT] = [
        StepId::Basics,
        StepId::ShapeSeating,
        StepId::Height,
        StepId::Chairs,
        StepId::RoomBudget,
        StepId::Materials,
    ];

    pub fn index(self) -> usize {
        match self {
            StepId::Basics => 0,
            StepId::ShapeSeating => 1,
            StepId::Height => 2,
            StepId::Chairs => 3,
            StepId::RoomBudget => 4,
            StepId::Materials => 5,
        }
    }

    /// Checked conversion for untyped input such as a CLI `--step` argument.
    pub fn from_index(index: usize) -> Result<Self, FormError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(FormError::OutOfRangeStep(index))
    }

    pub fn spec(self) -> &'static StepSpec {
        &STEPS[self.index()]
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }
}

/// One field slot within a step, optionally gated by a guard.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    pub field: FieldId,
    pub guard: Option<Guard>,
}

/// A step descriptor: which fields it presents and under which conditions.
/// Adding or removing a step is a change to [`STEPS`], not to control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSpec {
    pub id: StepId,
    pub title: &'static str,
    pub bindings: &'static [FieldBinding],
}

/// The full step sequence. Four declared fields (chair armrests, secondary
/// uses, main seat and its upgrades) are bound to no step; see DESIGN.md.
pub static STEPS: [StepSpec; STEP_COUNT] = [
    StepSpec {
        id: StepId::Basics,
        title: "Contact details",
        bindings: &[
            FieldBinding {
                field: FieldId::Name,
                guard: None,
            },
            FieldBinding {
                field: FieldId::Contact,
                guard: None,
            },
        ],
    },
    StepSpec {
        id: StepId::ShapeSeating,
        title: "Shape and seating",
        bindings: &[
            FieldBinding {
                field: FieldId::Shape,
                guard: None,
            },
            FieldBinding {
                field: FieldId::Ratio,
                guard: Some(Guard::Eq(FieldId::Shape, FieldValue::Shape(Shape::Rect))),
            },
            FieldBinding {
                field: FieldId::Seats,
                guard: None,
            },
        ],
    },
    StepSpec {
        id: StepId::Height,
        title: "Table height",
        bindings: &[
            FieldBinding {
                field: FieldId::TableHeight,
                guard: None,
            },
            FieldBinding {
                field: FieldId::HeightReason,
                guard: Some(Guard::Ne(
                    FieldId::TableHeight,
                    FieldValue::Height(TableHeight::Standard),
                )),
            },
        ],
    },
    StepSpec {
        id: StepId::Chairs,
        title: "Chair configuration",
        bindings: &[
            FieldBinding {
                field: FieldId::ChairBack,
                guard: None,
            },
            FieldBinding {
                field: FieldId::ChairStyle,
                guard: Some(Guard::Eq(FieldId::ChairBack, FieldValue::Flag(true))),
            },
        ],
    },
    StepSpec {
        id: StepId::RoomBudget,
        title: "Room and budget",
        bindings: &[
            FieldBinding {
                field: FieldId::RoomSize,
                guard: None,
            },
            FieldBinding {
                field: FieldId::Budget,
                guard: None,
            },
            FieldBinding {
                field: FieldId::DueTime,
                guard: None,
            },
        ],
    },
    StepSpec {
        id: StepId::Materials,
        title: "Wood and notes",
        bindings: &[
            FieldBinding {
                field: FieldId::Wood,
                guard: None,
            },
            FieldBinding {
                field: FieldId::Extra,
                guard: None,
            },
        ],
    },
];

/// Cursor over [`STEPS`]. Navigation clamps silently at both ends; the index
/// can never leave `0..STEP_COUNT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCursor {
    index: usize,
}

impl StepCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor positioned on a specific step, for rendering a step in
    /// isolation.
    pub fn at(step: StepId) -> Self {
        Self {
            index: step.index(),
        }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn step(self) -> StepId {
        STEPS[self.index].id
    }

    pub fn can_advance(self) -> bool {
        self.index + 1 < STEP_COUNT
    }

    pub fn can_retreat(self) -> bool {
        self.index > 0
    }

    /// True on the last step, where the terminal action is submit.
    pub fn is_terminal(self) -> bool {
        self.index == STEP_COUNT - 1
    }

    /// Moves one step forward; a no-op on the last step.
    pub fn advance(&mut self) -> StepId {
        if self.can_advance() {
            self.index += 1;
        }
        self.step()
    }

    /// Moves one step back; a no-op on the first step.
    pub fn retreat(&mut self) -> StepId {
        if self.can_retreat() {
            self.index -= 1;
        }
        self.step()
    }
}
