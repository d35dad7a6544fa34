use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::models::{IngredientCard, IngredientType};
use crate::view::{ViewFilter, project};

/// Explicit load tri-state. A fetch failure is an `Error`, never an empty
/// `Ready` — the two must stay distinguishable.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Error(String),
    Ready(Vec<IngredientCard>),
}

/// One line of the pending consume preview.
#[derive(Debug, Clone)]
pub struct ConsumeLine {
    pub card: IngredientCard,
    pub quantity: u32,
}

/// The dashboard's state container: load state, identity-based selection,
/// pending consume quantities, and the active view filter.
///
/// Single logical owner, mutated only through these operations. Selection
/// and quantities key on ingredient identity (never a position in the
/// filtered view) and survive filter/search changes; they are pruned
/// whenever a refetch replaces the card collection.
#[derive(Debug)]
pub struct Dashboard {
    load: LoadState,
    selected: HashSet<i64>,
    consume: HashMap<i64, u32>,
    filter: ViewFilter,
    generation: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            selected: HashSet::new(),
            consume: HashMap::new(),
            filter: ViewFilter::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Start a fetch cycle; the returned token must be handed back to
    /// [`apply_fetch`] so stale completions can be discarded.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Complete a fetch cycle. Completions carrying an out-of-date token
    /// are dropped so a slow response cannot overwrite newer state. On
    /// success the card collection is replaced wholesale and selection and
    /// consume entries for ids that no longer exist are pruned.
    pub fn apply_fetch(&mut self, token: u64, result: Result<Vec<IngredientCard>>) {
        if token != self.generation {
            return;
        }
        match result {
            Ok(cards) => {
                let known: HashSet<i64> = cards.iter().map(|c| c.id).collect();
                self.selected.retain(|id| known.contains(id));
                self.consume.retain(|id, _| known.contains(id));
                self.load = LoadState::Ready(cards);
            }
            Err(e) => self.load = LoadState::Error(format!("{e:#}")),
        }
    }

    /// The current card collection, if the dashboard is ready.
    #[must_use]
    pub fn cards(&self) -> Option<&[IngredientCard]> {
        match &self.load {
            LoadState::Ready(cards) => Some(cards.as_slice()),
            _ => None,
        }
    }

    fn is_known(&self, id: i64) -> bool {
        self.cards().is_some_and(|cards| cards.iter().any(|c| c.id == id))
    }

    // --- Selection ---

    /// Flip membership of `id` in the selection set. Ids not present in
    /// the current card collection are ignored.
    pub fn toggle_selected(&mut self, id: i64) {
        if !self.is_known(id) {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected cards in canonical (reconciler) order.
    #[must_use]
    pub fn selected_cards(&self) -> Vec<&IngredientCard> {
        self.cards()
            .map(|cards| {
                cards
                    .iter()
                    .filter(|c| self.selected.contains(&c.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    // --- Consume quantities ---

    /// Pending consume amount for `id`. `None` means the user has not
    /// specified one yet; render as empty, not as 0.
    #[must_use]
    pub fn consume_quantity(&self, id: i64) -> Option<u32> {
        self.consume.get(&id).copied()
    }

    /// Pending consume amount for arithmetic, defaulting to 0.
    #[must_use]
    pub fn consume_or_zero(&self, id: i64) -> u32 {
        self.consume_quantity(id).unwrap_or(0)
    }

    pub fn increment(&mut self, id: i64) {
        if !self.is_known(id) {
            return;
        }
        *self.consume.entry(id).or_insert(0) += 1;
    }

    /// Decrement with a floor of 0; going below is a no-op, not an error.
    pub fn decrement(&mut self, id: i64) {
        if let Some(qty) = self.consume.get_mut(&id) {
            *qty = qty.saturating_sub(1);
        }
    }

    /// Set the pending amount outright. Values outside the representable
    /// range — negative (observed behavior, preserved) or past `u32::MAX`
    /// — are silently rejected.
    pub fn set_quantity(&mut self, id: i64, value: i64) {
        let Ok(value) = u32::try_from(value) else {
            return;
        };
        if !self.is_known(id) {
            return;
        }
        self.consume.insert(id, value);
    }

    // --- View filter ---

    #[must_use]
    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Selection and quantities deliberately persist across filter changes.
    pub fn toggle_filter_type(&mut self, ingredient_type: IngredientType) {
        self.filter.toggle_type(ingredient_type);
    }

    pub fn set_search(&mut self, search: &str) {
        self.filter.set_search(search);
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// The cards visible under the active filter, in canonical order.
    /// Empty while loading or errored.
    #[must_use]
    pub fn visible(&self) -> Vec<&IngredientCard> {
        self.cards()
            .map(|cards| project(cards, &self.filter))
            .unwrap_or_default()
    }

    // --- Consume confirmation ---

    /// The pending consume preview: selected cards with their quantities,
    /// in canonical order. Unspecified quantities preview as 0.
    #[must_use]
    pub fn preview(&self) -> Vec<ConsumeLine> {
        self.selected_cards()
            .into_iter()
            .map(|card| ConsumeLine {
                quantity: self.consume_or_zero(card.id),
                card: card.clone(),
            })
            .collect()
    }

    /// Confirm the pending consume: drains the preview and clears the
    /// selection and all pending quantities.
    pub fn take_consume_request(&mut self) -> Vec<ConsumeLine> {
        let lines = self.preview();
        self.selected.clear();
        self.consume.clear();
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crate::models::{DEFAULT_DAYS_LEFT, UNAVAILABLE};

    fn card(id: i64, name: &str, ingredient_type: IngredientType) -> IngredientCard {
        IngredientCard {
            id,
            name: name.to_string(),
            ingredient_type,
            unit: "kg".to_string(),
            batch_id: UNAVAILABLE.to_string(),
            quantity: 0.0,
            purchased_date: UNAVAILABLE.to_string(),
            expiry_date: UNAVAILABLE.to_string(),
            days_left: DEFAULT_DAYS_LEFT,
        }
    }

    fn ready_dashboard() -> Dashboard {
        let mut dash = Dashboard::new();
        let token = dash.begin_fetch();
        dash.apply_fetch(
            token,
            Ok(vec![
                card(1, "Milk", IngredientType::Dairy),
                card(2, "Flour", IngredientType::Grain),
                card(7, "Basil", IngredientType::Spice),
            ]),
        );
        dash
    }

    #[test]
    fn test_starts_loading() {
        let dash = Dashboard::new();
        assert!(matches!(dash.load_state(), LoadState::Loading));
        assert!(dash.cards().is_none());
        assert!(dash.visible().is_empty());
    }

    #[test]
    fn test_fetch_error_is_not_empty_ready() {
        let mut dash = Dashboard::new();
        let token = dash.begin_fetch();
        dash.apply_fetch(token, Err(anyhow!("connection refused")));
        match dash.load_state() {
            LoadState::Error(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected Error, got {other:?}"),
        }
        assert!(dash.cards().is_none());
    }

    #[test]
    fn test_stale_fetch_discarded() {
        let mut dash = Dashboard::new();
        let first = dash.begin_fetch();
        let second = dash.begin_fetch();
        dash.apply_fetch(second, Ok(vec![card(1, "Milk", IngredientType::Dairy)]));
        // The slow first response must not overwrite the newer state
        dash.apply_fetch(first, Ok(vec![card(99, "Stale", IngredientType::Meat)]));
        let cards = dash.cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, 1);
    }

    #[test]
    fn test_stale_error_discarded() {
        let mut dash = ready_dashboard();
        let stale = dash.generation - 1;
        dash.apply_fetch(stale, Err(anyhow!("too late")));
        assert!(matches!(dash.load_state(), LoadState::Ready(_)));
    }

    #[test]
    fn test_toggle_selection_involution() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(1);
        assert!(dash.is_selected(1));
        dash.toggle_selected(1);
        assert!(!dash.is_selected(1));
        assert_eq!(dash.selection_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(42);
        assert!(!dash.is_selected(42));
        assert_eq!(dash.selection_count(), 0);
    }

    #[test]
    fn test_selected_cards_canonical_order() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(7);
        dash.toggle_selected(1);
        let ids: Vec<i64> = dash.selected_cards().iter().map(|c| c.id).collect();
        // Reconciler order, not selection order
        assert_eq!(ids, vec![1, 7]);
    }

    #[test]
    fn test_consume_unspecified_is_none() {
        let dash = ready_dashboard();
        assert_eq!(dash.consume_quantity(1), None);
        assert_eq!(dash.consume_or_zero(1), 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut dash = ready_dashboard();
        dash.increment(1);
        dash.increment(1);
        assert_eq!(dash.consume_quantity(1), Some(2));
        dash.decrement(1);
        assert_eq!(dash.consume_quantity(1), Some(1));
    }

    #[test]
    fn test_decrement_floor_clamp() {
        let mut dash = ready_dashboard();
        dash.increment(1);
        dash.decrement(1);
        assert_eq!(dash.consume_quantity(1), Some(0));
        dash.decrement(1);
        assert_eq!(dash.consume_quantity(1), Some(0));
    }

    #[test]
    fn test_decrement_absent_does_not_create_entry() {
        let mut dash = ready_dashboard();
        dash.decrement(1);
        assert_eq!(dash.consume_quantity(1), None);
    }

    #[test]
    fn test_increment_unknown_id_is_noop() {
        let mut dash = ready_dashboard();
        dash.increment(42);
        assert_eq!(dash.consume_quantity(42), None);
    }

    #[test]
    fn test_set_quantity() {
        let mut dash = ready_dashboard();
        dash.set_quantity(1, 5);
        assert_eq!(dash.consume_quantity(1), Some(5));
        dash.set_quantity(1, 0);
        assert_eq!(dash.consume_quantity(1), Some(0));
    }

    #[test]
    fn test_set_quantity_negative_silently_rejected() {
        let mut dash = ready_dashboard();
        dash.set_quantity(1, 5);
        dash.set_quantity(1, -3);
        assert_eq!(dash.consume_quantity(1), Some(5));
    }

    #[test]
    fn test_set_quantity_overflow_silently_rejected() {
        let mut dash = ready_dashboard();
        dash.set_quantity(1, 5);
        // One past u32::MAX must not wrap to 0
        dash.set_quantity(1, i64::from(u32::MAX) + 1);
        assert_eq!(dash.consume_quantity(1), Some(5));
        dash.set_quantity(1, i64::from(u32::MAX));
        assert_eq!(dash.consume_quantity(1), Some(u32::MAX));
    }

    #[test]
    fn test_refetch_prunes_stale_selection_and_quantities() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(7);
        dash.toggle_selected(1);
        dash.set_quantity(7, 4);
        dash.set_quantity(1, 2);

        // Refetch drops ingredient 7
        let token = dash.begin_fetch();
        dash.apply_fetch(
            token,
            Ok(vec![
                card(1, "Milk", IngredientType::Dairy),
                card(2, "Flour", IngredientType::Grain),
            ]),
        );

        assert!(!dash.is_selected(7));
        assert_eq!(dash.consume_quantity(7), None);
        assert!(dash.is_selected(1));
        assert_eq!(dash.consume_quantity(1), Some(2));
    }

    #[test]
    fn test_selection_persists_across_filter_changes() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(1);
        dash.set_quantity(1, 3);
        dash.toggle_filter_type(IngredientType::Spice);
        dash.set_search("basil");
        // Milk is filtered out of the view but stays selected
        let visible: Vec<i64> = dash.visible().iter().map(|c| c.id).collect();
        assert_eq!(visible, vec![7]);
        assert!(dash.is_selected(1));
        assert_eq!(dash.consume_quantity(1), Some(3));
    }

    #[test]
    fn test_toggle_through_filtered_view_uses_identity() {
        let mut dash = ready_dashboard();
        dash.toggle_filter_type(IngredientType::Spice);
        // Basil is the only visible card; selecting it must hit id 7,
        // not position 0 of the full collection
        let id = dash.visible()[0].id;
        dash.toggle_selected(id);
        assert!(dash.is_selected(7));
        assert!(!dash.is_selected(1));
    }

    #[test]
    fn test_preview_in_canonical_order_with_zero_defaults() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(7);
        dash.toggle_selected(2);
        dash.set_quantity(7, 4);
        let lines = dash.preview();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].card.id, 2);
        assert_eq!(lines[0].quantity, 0);
        assert_eq!(lines[1].card.id, 7);
        assert_eq!(lines[1].quantity, 4);
    }

    #[test]
    fn test_take_consume_request_drains_state() {
        let mut dash = ready_dashboard();
        dash.toggle_selected(1);
        dash.set_quantity(1, 2);
        let lines = dash.take_consume_request();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].card.id, 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(dash.selection_count(), 0);
        assert_eq!(dash.consume_quantity(1), None);
    }
}
