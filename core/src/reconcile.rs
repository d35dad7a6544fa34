use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{
    DEFAULT_DAYS_LEFT, IngredientCard, IngredientDefinition, StockEntry, UNAVAILABLE,
};

/// Join stock entries onto ingredient definitions by ingredient identity.
///
/// Every definition yields exactly one card, in input order. Definitions
/// without stock get the documented defaults (batch `"N/A"`, quantity 0,
/// dates `"N/A"`). Stock entries without a matching definition are ignored.
/// Duplicate stock entries for one ingredient resolve last-write-wins.
///
/// This variant keeps the placeholder `days_left` for every card; use
/// [`reconcile_at`] to derive freshness from expiry dates.
#[must_use]
pub fn reconcile(
    ingredients: &[IngredientDefinition],
    stocks: &[StockEntry],
) -> Vec<IngredientCard> {
    reconcile_with(ingredients, stocks, |_| DEFAULT_DAYS_LEFT)
}

/// Like [`reconcile`], but computes each card's `days_left` as the number
/// of days between `today` and the stock's expiry date. Unparseable or
/// absent expiry dates fall back to the placeholder default.
#[must_use]
pub fn reconcile_at(
    ingredients: &[IngredientDefinition],
    stocks: &[StockEntry],
    today: NaiveDate,
) -> Vec<IngredientCard> {
    reconcile_with(ingredients, stocks, |stock| {
        parse_service_date(&stock.expiry_date)
            .map_or(DEFAULT_DAYS_LEFT, |expiry| (expiry - today).num_days())
    })
}

fn reconcile_with(
    ingredients: &[IngredientDefinition],
    stocks: &[StockEntry],
    days_left: impl Fn(&StockEntry) -> i64,
) -> Vec<IngredientCard> {
    // Last write wins on duplicate ingredient ids.
    let mut by_id: HashMap<i64, &StockEntry> = HashMap::new();
    for stock in stocks {
        by_id.insert(stock.ingredient_id, stock);
    }

    ingredients
        .iter()
        .map(|item| {
            let stock = by_id.get(&item.id);
            IngredientCard {
                id: item.id,
                name: item.name.clone(),
                ingredient_type: item.ingredient_type,
                unit: item.unit.clone(),
                batch_id: stock.map_or_else(|| UNAVAILABLE.to_string(), |s| s.order_id.clone()),
                quantity: stock.map_or(0.0, |s| s.quantity),
                purchased_date: stock
                    .map_or_else(|| UNAVAILABLE.to_string(), |s| s.purchased_date.clone()),
                expiry_date: stock
                    .map_or_else(|| UNAVAILABLE.to_string(), |s| s.expiry_date.clone()),
                days_left: stock.map_or(DEFAULT_DAYS_LEFT, |s| days_left(s)),
            }
        })
        .collect()
}

/// Parse a date string as the service sends it: ISO `YYYY-MM-DD`, with
/// RFC 3339 timestamps accepted and truncated to their date part.
fn parse_service_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}
