use anyhow::{Context, Result};
use chrono::Local;

use pantry_core::models::{IngredientCard, IngredientDefinition, NewIngredient, StockEntry};
use pantry_core::reconcile::reconcile_at;

/// HTTP client for the remote inventory service.
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "pantry-cli/{} (inventory dashboard)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_ingredients(&self) -> Result<Vec<IngredientDefinition>> {
        let url = format!("{}/ingredients", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach inventory service")?
            .error_for_status()
            .context("Inventory service rejected the ingredient request")?;

        resp.json()
            .await
            .context("Failed to parse ingredient list response")
    }

    pub async fn fetch_stocks(&self) -> Result<Vec<StockEntry>> {
        let url = format!("{}/ingredients-stocks", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach inventory service")?
            .error_for_status()
            .context("Inventory service rejected the stock request")?;

        resp.json()
            .await
            .context("Failed to parse stock list response")
    }

    /// Fetch both collections concurrently. The pair is a join barrier:
    /// either failure fails the fetch as a unit, so partial data is never
    /// rendered as complete.
    pub async fn fetch_inventory(&self) -> Result<(Vec<IngredientDefinition>, Vec<StockEntry>)> {
        tokio::try_join!(self.fetch_ingredients(), self.fetch_stocks())
    }

    /// Fetch and reconcile into cards, deriving freshness from today's date.
    pub async fn fetch_cards(&self) -> Result<Vec<IngredientCard>> {
        let (ingredients, stocks) = self.fetch_inventory().await?;
        Ok(reconcile_at(
            &ingredients,
            &stocks,
            Local::now().date_naive(),
        ))
    }

    /// `POST /ingredients`. The draft is validated before anything goes
    /// over the wire; a non-2xx response is a write failure.
    pub async fn create_ingredient(&self, draft: &NewIngredient) -> Result<()> {
        draft.validate()?;
        let url = format!("{}/ingredients", self.base_url);
        self.client
            .post(&url)
            .json(draft)
            .send()
            .await
            .context("Failed to reach inventory service")?
            .error_for_status()
            .with_context(|| format!("Inventory service rejected new ingredient '{}'", draft.name))?;
        Ok(())
    }
}
