use anyhow::{Result, bail};
use std::process;

use pantry_core::models::{IngredientCard, IngredientType};
use pantry_core::view::{ViewFilter, project};

use crate::api::InventoryClient;

use super::helpers::{json_error, print_card_detail, print_card_table};

pub(crate) async fn cmd_list(
    client: &InventoryClient,
    types: Vec<IngredientType>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let cards = client.fetch_cards().await?;

    let mut filter = ViewFilter::new();
    filter.types = types.into_iter().collect();
    if let Some(s) = search {
        filter.set_search(&s);
    }
    let visible = project(&cards, &filter);

    if visible.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No ingredients match the current filter");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        print_card_table(&visible);
    }

    Ok(())
}

pub(crate) async fn cmd_show(client: &InventoryClient, id: i64, json: bool) -> Result<()> {
    let cards = client.fetch_cards().await?;
    let card: &IngredientCard = match cards.iter().find(|c| c.id == id) {
        Some(card) => card,
        None if json => {
            println!("{}", json_error(&format!("No ingredient with id {id}")));
            process::exit(2);
        }
        None => bail!("No ingredient with id {id}"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(card)?);
    } else {
        print_card_detail(card);
    }

    Ok(())
}
