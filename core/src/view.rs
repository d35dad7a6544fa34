use std::collections::HashSet;

use crate::models::{IngredientCard, IngredientType};

/// Active type filters and search text. An empty type set means "show
/// all"; an empty search string matches everything.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub types: HashSet<IngredientType>,
    pub search: String,
}

impl ViewFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a type in or out of the active filter set.
    pub fn toggle_type(&mut self, ingredient_type: IngredientType) {
        if !self.types.remove(&ingredient_type) {
            self.types.insert(ingredient_type);
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn clear(&mut self) {
        self.types.clear();
        self.search.clear();
    }

    #[must_use]
    pub fn matches(&self, card: &IngredientCard) -> bool {
        let type_ok = self.types.is_empty() || self.types.contains(&card.ingredient_type);
        let search_ok = card
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        type_ok && search_ok
    }
}

/// Project the card collection through the active filter. Order is stable
/// and equal to the reconciler's output order; this is a pure derived view
/// recomputed on every call.
#[must_use]
pub fn project<'a>(cards: &'a [IngredientCard], filter: &ViewFilter) -> Vec<&'a IngredientCard> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}
