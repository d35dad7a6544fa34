use anyhow::Result;

use pantry_core::models::{IngredientType, NewIngredient};

use crate::api::InventoryClient;

use super::helpers::print_card_table;

/// Create a new ingredient, then run a full refetch-and-reconcile cycle so
/// the rendered list reflects the service's state, not an optimistic merge.
pub(crate) async fn cmd_add(
    client: &InventoryClient,
    name: &str,
    ingredient_type: IngredientType,
    unit: &str,
    json: bool,
) -> Result<()> {
    let draft = NewIngredient {
        name: name.to_string(),
        ingredient_type,
        unit: unit.to_string(),
    };

    if let Err(e) = client.create_ingredient(&draft).await {
        // Keep the draft visible so the user can retry it as-is
        eprintln!(
            "Draft not saved: name='{}' type={} unit='{}'",
            draft.name, draft.ingredient_type, draft.unit
        );
        return Err(e);
    }

    let cards = client.fetch_cards().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        println!("Added ingredient: {name}");
        let refs: Vec<_> = cards.iter().collect();
        print_card_table(&refs);
    }

    Ok(())
}
