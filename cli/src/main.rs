mod api;
mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::api::InventoryClient;
use crate::commands::{cmd_add, cmd_list, cmd_session, cmd_show};
use crate::config::Config;
use pantry_core::models::IngredientType;

#[derive(Parser)]
#[command(
    name = "pantry",
    version,
    about = "A terminal dashboard for a remote ingredient inventory",
    long_about = "\n\n  ██████╗  █████╗ ███╗   ██╗████████╗██████╗ ██╗   ██╗
  ██╔══██╗██╔══██╗████╗  ██║╚══██╔══╝██╔══██╗╚██╗ ██╔╝
  ██████╔╝███████║██╔██╗ ██║   ██║   ██████╔╝ ╚████╔╝
  ██╔═══╝ ██╔══██║██║╚██╗██║   ██║   ██╔══██╗  ╚██╔╝
  ██║     ██║  ██║██║ ╚████║   ██║   ██║  ██║   ██║
  ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝   ╚═╝
           know what's on your shelves.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reconciled ingredient cards
    List {
        /// Only show these types (repeatable): Produce, Dairy, Spice, Sweetener, Meat, Grain, Sauce
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<IngredientType>,
        /// Case-insensitive name substring to match
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one ingredient card in full detail
    Show {
        /// Ingredient ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new ingredient, then refresh the list
    Add {
        /// Ingredient name
        name: String,
        /// Ingredient type: Produce, Dairy, Spice, Sweetener, Meat, Grain, Sauce
        #[arg(short = 't', long = "type")]
        ingredient_type: IngredientType,
        /// Unit of measure (e.g. kg, L, bottle)
        #[arg(short, long)]
        unit: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive dashboard session (select, adjust, consume)
    Session,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let client = InventoryClient::new(&config.server_url);

    match cli.command {
        Commands::List {
            types,
            search,
            json,
        } => cmd_list(&client, types, search, json).await,
        Commands::Show { id, json } => cmd_show(&client, id, json).await,
        Commands::Add {
            name,
            ingredient_type,
            unit,
            json,
        } => cmd_add(&client, &name, ingredient_type, &unit, json).await,
        Commands::Session => cmd_session(&client).await,
    }
}
