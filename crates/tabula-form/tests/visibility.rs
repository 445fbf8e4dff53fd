use tabula_form::{
    FieldId, FieldPatch, FieldValue, Guard, OrderForm, Ratio, STEPS, Shape, StepId, TableHeight,
    resolve_visibility, visible_fields,
};

#[test]
fn ratio_visible_only_for_rectangular_tables() {
    let mut form = OrderForm::new();
    let map = resolve_visibility(StepId::ShapeSeating, &form);
    assert_eq!(map.get(&FieldId::Ratio), Some(&false));

    form.apply(FieldPatch::new(FieldId::Shape, FieldValue::Shape(Shape::Rect)))
        .unwrap();
    let map = resolve_visibility(StepId::ShapeSeating, &form);
    assert_eq!(map.get(&FieldId::Ratio), Some(&true));

    form.apply(FieldPatch::new(
        FieldId::Shape,
        FieldValue::Shape(Shape::Round),
    ))
    .unwrap();
    let map = resolve_visibility(StepId::ShapeSeating, &form);
    assert_eq!(map.get(&FieldId::Ratio), Some(&false));
}

#[test]
fn hidden_ratio_value_is_retained() {
    let mut form = OrderForm::new();
    form.apply(FieldPatch::new(FieldId::Shape, FieldValue::Shape(Shape::Rect)))
        .unwrap();
    form.apply(FieldPatch::new(
        FieldId::Ratio,
        FieldValue::Ratio(Ratio::FourToThree),
    ))
    .unwrap();
    form.apply(FieldPatch::new(
        FieldId::Shape,
        FieldValue::Shape(Shape::Round),
    ))
    .unwrap();

    let visible = visible_fields(StepId::ShapeSeating, &form);
    assert!(!visible.contains(&FieldId::Ratio));
    assert_eq!(form.ratio, Ratio::FourToThree);
}

#[test]
fn height_reason_shown_for_non_standard_heights_only() {
    let mut form = OrderForm::new();
    assert_eq!(
        visible_fields(StepId::Height, &form),
        vec![FieldId::TableHeight]
    );

    form.apply(FieldPatch::new(
        FieldId::TableHeight,
        FieldValue::Height(TableHeight::High),
    ))
    .unwrap();
    assert_eq!(
        visible_fields(StepId::Height, &form),
        vec![FieldId::TableHeight, FieldId::HeightReason]
    );

    form.apply(FieldPatch::new(
        FieldId::TableHeight,
        FieldValue::Height(TableHeight::Standard),
    ))
    .unwrap();
    assert_eq!(
        visible_fields(StepId::Height, &form),
        vec![FieldId::TableHeight]
    );
}

#[test]
fn chair_style_follows_backrest_flag() {
    let mut form = OrderForm::new();
    assert_eq!(
        visible_fields(StepId::Chairs, &form),
        vec![FieldId::ChairBack]
    );

    form.apply(FieldPatch::new(FieldId::ChairBack, FieldValue::Flag(true)))
        .unwrap();
    assert_eq!(
        visible_fields(StepId::Chairs, &form),
        vec![FieldId::ChairBack, FieldId::ChairStyle]
    );
}

#[test]
fn reserved_fields_are_bound_to_no_step() {
    let reserved = [
        FieldId::ChairArmrest,
        FieldId::MultiFunction,
        FieldId::MainSeat,
        FieldId::MainSeatFeatures,
    ];
    for step in &STEPS {
        for binding in step.bindings {
            assert!(
                !reserved.contains(&binding.field),
                "step {:?} unexpectedly exposes {:?}",
                step.id,
                binding.field
            );
        }
    }
}

static REQUIRES_RECT_AND_BACKREST: [Guard; 2] = [
    Guard::Eq(FieldId::Shape, FieldValue::Shape(Shape::Rect)),
    Guard::Eq(FieldId::ChairBack, FieldValue::Flag(true)),
];
static RECT_GUARD: Guard = Guard::Eq(FieldId::Shape, FieldValue::Shape(Shape::Rect));

#[test]
fn guard_combinators_evaluate_over_the_record() {
    let mut form = OrderForm::new();
    let all = Guard::All(&REQUIRES_RECT_AND_BACKREST);
    let any = Guard::Any(&REQUIRES_RECT_AND_BACKREST);
    let not_rect = Guard::Not(&RECT_GUARD);

    assert!(!all.evaluate(&form));
    assert!(!any.evaluate(&form));
    assert!(not_rect.evaluate(&form));
    assert!(!Guard::IsSet(FieldId::Name).evaluate(&form));

    form.apply(FieldPatch::new(FieldId::Shape, FieldValue::Shape(Shape::Rect)))
        .unwrap();
    assert!(!all.evaluate(&form));
    assert!(any.evaluate(&form));
    assert!(!not_rect.evaluate(&form));

    form.apply(FieldPatch::new(FieldId::ChairBack, FieldValue::Flag(true)))
        .unwrap();
    assert!(all.evaluate(&form));
}
