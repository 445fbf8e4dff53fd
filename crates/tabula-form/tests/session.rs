use pretty_assertions::assert_eq;
use serde_json::json;
use tabula_form::{
    Budget, FieldId, FieldPatch, FieldValue, FormError, MemorySink, OrderForm, Ratio, Session,
    Shape, StepId, TableHeight, unknown_fields, validate, validate_answers,
};

#[test]
fn patches_touch_exactly_one_field() {
    let mut form = OrderForm::new();
    form.apply(FieldPatch::parse(FieldId::Seats, "6").unwrap())
        .unwrap();
    form.apply(FieldPatch::parse(FieldId::Name, "Zhang").unwrap())
        .unwrap();

    let mut expected = OrderForm::new();
    expected.seats = "6".to_string();
    expected.name = "Zhang".to_string();
    assert_eq!(form, expected);
}

#[test]
fn cursor_clamps_at_both_ends() {
    let mut session = Session::new();
    for _ in 0..10 {
        session.retreat();
    }
    assert_eq!(session.current_step(), StepId::Basics);
    assert_eq!(session.cursor().index(), 0);

    for _ in 0..10 {
        session.advance();
    }
    assert_eq!(session.current_step(), StepId::Materials);
    assert_eq!(session.cursor().index(), 5);
    assert!(session.cursor().is_terminal());
    assert!(!session.cursor().can_advance());
}

#[test]
fn retreat_on_first_step_is_a_noop() {
    let mut session = Session::new();
    assert_eq!(session.retreat(), StepId::Basics);
    assert_eq!(session.cursor().index(), 0);
}

#[test]
fn full_walkthrough_delivers_every_answer() {
    let mut session = Session::new();
    session.set(FieldId::Name, "Li").unwrap();
    session.set(FieldId::Shape, "rect").unwrap();
    session.set(FieldId::Ratio, "4:3").unwrap();
    for _ in 0..5 {
        session.advance();
    }

    let mut sink = MemorySink::new();
    let order = session.submit(&mut sink).unwrap();

    assert_eq!(order.name, "Li");
    assert_eq!(order.shape, Shape::Rect);
    assert_eq!(order.ratio, Ratio::FourToThree);
    assert_eq!(order.table_height, TableHeight::Standard);
    assert_eq!(order.budget, Budget::Unset);
    assert_eq!(order.height_reason, "");
    assert_eq!(sink.delivered.len(), 1);
    assert_eq!(sink.delivered[0], order);
}

#[test]
fn empty_fields_never_block_navigation() {
    let mut session = Session::new();
    session.set(FieldId::TableHeight, "high").unwrap();
    // Walk straight past the height step without giving a reason.
    for _ in 0..5 {
        session.advance();
    }
    let mut sink = MemorySink::new();
    let order = session.submit(&mut sink).unwrap();
    assert_eq!(order.table_height, TableHeight::High);
    assert_eq!(order.height_reason, "");
}

#[test]
fn hidden_values_still_reach_the_sink() {
    let mut session = Session::new();
    session.set(FieldId::Shape, "rect").unwrap();
    session.set(FieldId::Ratio, "4:3").unwrap();
    session.set(FieldId::Shape, "round").unwrap();
    for _ in 0..5 {
        session.advance();
    }
    let mut sink = MemorySink::new();
    let order = session.submit(&mut sink).unwrap();
    assert_eq!(order.shape, Shape::Round);
    assert_eq!(order.ratio, Ratio::FourToThree);
}

#[test]
fn submit_requires_the_terminal_step() {
    let session = Session::new();
    let mut sink = MemorySink::new();
    match session.submit(&mut sink) {
        Err(FormError::OutOfRangeStep(0)) => {}
        other => panic!("expected OutOfRangeStep, got {other:?}"),
    }
    assert!(sink.delivered.is_empty());
}

#[test]
fn mismatched_patch_kinds_are_rejected() {
    let mut form = OrderForm::new();
    let err = form
        .apply(FieldPatch::new(FieldId::Shape, FieldValue::Flag(true)))
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidFieldValue { .. }));
    assert_eq!(form, OrderForm::new());
}

#[test]
fn parse_accepts_wire_labels_and_rejects_the_rest() {
    assert!(FieldId::Shape.parse_value("round").is_ok());
    assert!(FieldId::Shape.parse_value("hexagon").is_err());
    assert!(FieldId::Seats.parse_value("12").is_ok());
    assert!(FieldId::Seats.parse_value("5").is_err());
    assert!(FieldId::Budget.parse_value("<30k").is_ok());
    assert!(FieldId::Budget.parse_value("30k").is_err());
    assert!(FieldId::DueTime.parse_value("2026-10-01").is_ok());
    assert!(FieldId::DueTime.parse_value("next month").is_err());
    assert!(FieldId::ChairBack.parse_value("yes").is_ok());
    assert!(FieldId::ChairBack.parse_value("maybe").is_err());
    assert!(FieldId::MultiFunction.parse_value("tea, guest").is_ok());
    assert!(FieldId::MultiFunction.parse_value("tea, mahjong").is_err());
    assert!(FieldId::Wood.parse_value("zitan").is_ok());
    assert!(FieldId::Wood.parse_value("pine").is_err());
}

#[test]
fn answers_json_decodes_with_defaults() {
    let form: OrderForm = serde_json::from_value(json!({})).unwrap();
    assert_eq!(form, OrderForm::new());

    let form: OrderForm =
        serde_json::from_value(json!({ "name": "Li", "shape": "rect", "ratio": "4:3" })).unwrap();
    assert_eq!(form.shape, Shape::Rect);
    assert_eq!(form.ratio, Ratio::FourToThree);
    assert_eq!(form.table_height, TableHeight::Standard);
}

#[test]
fn unknown_answer_keys_are_reported() {
    let answers = json!({ "name": "Li", "colour": "red" });
    assert_eq!(unknown_fields(&answers), vec!["colour".to_string()]);

    let report = validate_answers(&answers).unwrap();
    assert!(!report.clean());
    assert_eq!(report.unknown_fields, vec!["colour".to_string()]);
}

#[test]
fn validation_is_advisory_and_flags_malformed_values() {
    let mut form = OrderForm::new();
    let report = validate(&form);
    // A fresh record has plenty of missing fields but nothing malformed.
    assert!(report.clean());
    assert!(report.missing.contains(&FieldId::Name));
    assert!(!report.missing.contains(&FieldId::TableHeight));

    form.due_time = "soon".to_string();
    form.seats = "5".to_string();
    let report = validate(&form);
    assert!(!report.clean());
    let codes: Vec<_> = report.findings.iter().map(|finding| finding.code).collect();
    assert_eq!(codes, vec!["date_shape", "choice_mismatch"]);
}

#[test]
fn reserved_fields_survive_serialization() {
    let mut form = OrderForm::new();
    form.apply(FieldPatch::parse(FieldId::MultiFunction, "tea").unwrap())
        .unwrap();
    form.apply(FieldPatch::new(FieldId::MainSeat, FieldValue::Flag(true)))
        .unwrap();

    let payload = serde_json::to_value(&form).unwrap();
    assert_eq!(payload["multi_function"], json!(["tea"]));
    assert_eq!(payload["main_seat"], json!(true));
    assert_eq!(payload["chair_armrest"], json!(false));
}
