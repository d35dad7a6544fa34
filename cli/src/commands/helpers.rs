use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use pantry_core::freshness::classify_extended;
use pantry_core::models::IngredientCard;

/// Extended-variant table: the status column distinguishes long-life
/// stock (> 30 days), unlike the session view's base classifier.
pub(crate) fn print_card_table(cards: &[&IngredientCard]) {
    #[derive(Tabled)]
    struct CardRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Type")]
        ingredient_type: String,
        #[tabled(rename = "Batch")]
        batch_id: String,
        #[tabled(rename = "Qty")]
        quantity: String,
        #[tabled(rename = "Unit")]
        unit: String,
        #[tabled(rename = "Expiry")]
        expiry: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    let rows: Vec<CardRow> = cards
        .iter()
        .map(|c| CardRow {
            id: c.id,
            name: truncate(&c.name, 30),
            ingredient_type: c.ingredient_type.to_string(),
            batch_id: truncate(&c.batch_id, 12),
            quantity: format_quantity(c.quantity),
            unit: c.unit.clone(),
            expiry: c.expiry_date.clone(),
            status: classify_extended(c.days_left).label,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..5)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_card_detail(card: &IngredientCard) {
    let freshness = classify_extended(card.days_left);
    println!("{} (id: {})", card.name, card.id);
    println!("  Type:      {}", card.ingredient_type);
    println!("  Batch ID:  {}", card.batch_id);
    println!("  Quantity:  {} {}", format_quantity(card.quantity), card.unit);
    println!("  Purchased: {}", card.purchased_date);
    println!("  Expiry:    {}", card.expiry_date);
    println!("  Status:    {} ({})", freshness.label, freshness.bucket);
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn format_quantity(q: f64) -> String {
    if (q - q.trunc()).abs() < f64::EPSILON {
        format!("{q:.0}")
    } else {
        format!("{q:.2}")
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
