use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Sentinel shown wherever a card has no backing stock entry.
pub const UNAVAILABLE: &str = "N/A";

/// Placeholder freshness value used when no expiry date is available.
/// Also the fixture default for tests; `reconcile_at` computes the real
/// value from the expiry date when it parses.
pub const DEFAULT_DAYS_LEFT: i64 = 3;

/// The inventory service's fixed ingredient type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientType {
    Produce,
    Dairy,
    Spice,
    Sweetener,
    Meat,
    Grain,
    Sauce,
}

pub const INGREDIENT_TYPES: &[IngredientType] = &[
    IngredientType::Produce,
    IngredientType::Dairy,
    IngredientType::Spice,
    IngredientType::Sweetener,
    IngredientType::Meat,
    IngredientType::Grain,
    IngredientType::Sauce,
];

impl IngredientType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Dairy => "Dairy",
            Self::Spice => "Spice",
            Self::Sweetener => "Sweetener",
            Self::Meat => "Meat",
            Self::Grain => "Grain",
            Self::Sauce => "Sauce",
        }
    }
}

impl fmt::Display for IngredientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let found = INGREDIENT_TYPES
            .iter()
            .find(|t| t.as_str().to_lowercase() == lower);
        match found {
            Some(t) => Ok(*t),
            None => bail!(
                "Invalid ingredient type '{s}'. Must be one of: {}",
                INGREDIENT_TYPES
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Static ingredient metadata as returned by `GET /ingredients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDefinition {
    #[serde(rename = "IngredientID")]
    pub id: i64,
    #[serde(rename = "IngredientName")]
    pub name: String,
    #[serde(rename = "IngredientType")]
    pub ingredient_type: IngredientType,
    #[serde(rename = "Unit")]
    pub unit: String,
}

/// A purchased batch as returned by `GET /ingredients-stocks`.
/// Dates are passed through as the service sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    #[serde(rename = "IngredientID")]
    pub ingredient_id: i64,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "PurchasedDate")]
    pub purchased_date: String,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: String,
}

/// One reconciled card per ingredient definition: metadata joined with its
/// (possibly absent) stock entry.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientCard {
    pub id: i64,
    pub name: String,
    pub ingredient_type: IngredientType,
    pub unit: String,
    pub batch_id: String,
    pub quantity: f64,
    pub purchased_date: String,
    pub expiry_date: String,
    pub days_left: i64,
}

/// Draft for the create-ingredient flow (`POST /ingredients`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIngredient {
    #[serde(rename = "IngredientName")]
    pub name: String,
    #[serde(rename = "IngredientType")]
    pub ingredient_type: IngredientType,
    #[serde(rename = "Unit")]
    pub unit: String,
}

impl NewIngredient {
    /// Client-side validation before the draft goes over the wire.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Ingredient name must not be empty");
        }
        if self.unit.trim().is_empty() {
            bail!("Ingredient unit must not be empty");
        }
        Ok(())
    }
}
