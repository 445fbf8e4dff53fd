use handlebars::{Handlebars, no_escape};
use serde_json::{Value, json};
use thiserror::Error;

use crate::fields::{Budget, ChairStyle, Ratio, Shape};
use crate::form::OrderForm;

const ORDER_SUMMARY: &str = include_str!("../templates/order_summary.hbs");

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary template failed to compile: {0}")]
    Template(String),
    #[error("summary rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders the record into a markdown order sheet for the workshop. The
/// template runs in strict mode, so the context carries every key it names.
pub fn render_order(form: &OrderForm) -> Result<String, SummaryError> {
    let mut engine = Handlebars::new();
    engine.set_strict_mode(true);
    engine.register_escape_fn(no_escape);
    engine
        .register_template_string("order_summary", ORDER_SUMMARY)
        .map_err(|err| SummaryError::Template(err.to_string()))?;
    Ok(engine.render("order_summary", &summary_context(form))?)
}

fn summary_context(form: &OrderForm) -> Value {
    let shape = match form.shape {
        Shape::Round => "round",
        Shape::Rect => "rectangular",
        Shape::Unset => "not specified",
    };
    let show_ratio = form.shape == Shape::Rect && form.ratio != Ratio::Unset;
    let chairs = if form.chair_back {
        match form.chair_style {
            ChairStyle::Unset => "with backrest, style undecided".to_string(),
            style => format!("with backrest, {} style", style.label()),
        }
    } else {
        "no backrest".to_string()
    };
    let budget = match form.budget {
        Budget::Unset => "not specified".to_string(),
        bracket => format!("CNY {}", bracket.label()),
    };
    let mut reserved = Vec::new();
    if form.chair_armrest {
        reserved.push("chair armrests".to_string());
    }
    if !form.multi_function.is_empty() {
        reserved.push(format!(
            "secondary uses: {}",
            join_labels(form.multi_function.iter().map(|entry| entry.label()))
        ));
    }
    if form.main_seat {
        let upgrades = if form.main_seat_features.is_empty() {
            "main seat".to_string()
        } else {
            format!(
                "main seat ({})",
                join_labels(form.main_seat_features.iter().map(|entry| entry.label()))
            )
        };
        reserved.push(upgrades);
    }

    json!({
        "name": or_unspecified(&form.name),
        "contact": or_unspecified(&form.contact),
        "shape": shape,
        "show_ratio": show_ratio,
        "ratio": form.ratio.label(),
        "seats": or_unspecified(&form.seats),
        "table_height": form.table_height.label(),
        "height_mm": form.table_height.millimetres(),
        "has_height_reason": !form.height_reason.is_empty(),
        "height_reason": form.height_reason,
        "chairs": chairs,
        "room_size": or_unspecified(&form.room_size),
        "budget": budget,
        "due_time": or_unspecified(&form.due_time),
        "wood": or_unspecified(&form.wood),
        "has_extra": !form.extra.is_empty(),
        "extra": form.extra,
        "has_reserved": !reserved.is_empty(),
        "reserved": reserved,
    })
}

fn or_unspecified(value: &str) -> String {
    if value.is_empty() {
        "not specified".to_string()
    } else {
        value.to_string()
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
