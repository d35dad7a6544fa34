use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use pantry_core::freshness::classify;
use pantry_core::models::{IngredientType, NewIngredient};
use pantry_core::state::{Dashboard, LoadState};

use crate::api::InventoryClient;

use super::helpers::{format_quantity, truncate};

/// One line of session input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionCmd {
    Select(i64),
    Increment(i64),
    Decrement(i64),
    Set(i64, i64),
    Filter(IngredientType),
    Search(String),
    ClearFilter,
    Refresh,
    Add(NewIngredient),
    Show,
    Preview,
    Confirm,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<SessionCmd> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let parse_id = |s: &str| -> Result<i64> {
        s.parse().with_context(|| format!("Invalid ingredient id '{s}'"))
    };

    match word {
        "select" | "s" => Ok(SessionCmd::Select(parse_id(rest)?)),
        "+" => Ok(SessionCmd::Increment(parse_id(rest)?)),
        "-" => Ok(SessionCmd::Decrement(parse_id(rest)?)),
        "set" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() != 2 {
                bail!("Usage: set <id> <quantity>");
            }
            let id = parse_id(parts[0])?;
            let value: i64 = parts[1]
                .parse()
                .with_context(|| format!("Invalid quantity '{}'", parts[1]))?;
            Ok(SessionCmd::Set(id, value))
        }
        "filter" | "f" => Ok(SessionCmd::Filter(rest.parse()?)),
        "search" | "/" => Ok(SessionCmd::Search(rest.to_string())),
        "clear" => Ok(SessionCmd::ClearFilter),
        "refresh" | "r" => Ok(SessionCmd::Refresh),
        "add" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() < 3 {
                bail!("Usage: add <name> <type> <unit>");
            }
            // Everything before the trailing type and unit is the name
            let unit = parts[parts.len() - 1];
            let ingredient_type: IngredientType = parts[parts.len() - 2].parse()?;
            let name = parts[..parts.len() - 2].join(" ");
            Ok(SessionCmd::Add(NewIngredient {
                name,
                ingredient_type,
                unit: unit.to_string(),
            }))
        }
        "show" | "ls" => Ok(SessionCmd::Show),
        "preview" | "p" => Ok(SessionCmd::Preview),
        "confirm" => Ok(SessionCmd::Confirm),
        "help" | "?" => Ok(SessionCmd::Help),
        "quit" | "q" | "exit" => Ok(SessionCmd::Quit),
        "" => bail!("Empty command (try 'help')"),
        other => bail!("Unknown command '{other}' (try 'help')"),
    }
}

pub(crate) async fn cmd_session(client: &InventoryClient) -> Result<()> {
    let mut dash = Dashboard::new();
    refresh(client, &mut dash).await;
    render(&dash);

    let stdin = io::stdin();
    loop {
        eprint!("pantry> ");
        io::stderr().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;

        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };

        match cmd {
            SessionCmd::Select(id) => {
                dash.toggle_selected(id);
                render(&dash);
            }
            SessionCmd::Increment(id) => dash.increment(id),
            SessionCmd::Decrement(id) => dash.decrement(id),
            SessionCmd::Set(id, value) => dash.set_quantity(id, value),
            SessionCmd::Filter(t) => {
                dash.toggle_filter_type(t);
                render(&dash);
            }
            SessionCmd::Search(text) => {
                dash.set_search(&text);
                render(&dash);
            }
            SessionCmd::ClearFilter => {
                dash.clear_filter();
                render(&dash);
            }
            SessionCmd::Refresh => {
                refresh(client, &mut dash).await;
                render(&dash);
            }
            SessionCmd::Add(draft) => {
                // A failed create keeps the session (and the draft context)
                // alive; the error is shown, not swallowed.
                match client.create_ingredient(&draft).await {
                    Ok(()) => {
                        println!("Added ingredient: {}", draft.name);
                        refresh(client, &mut dash).await;
                        render(&dash);
                    }
                    Err(e) => eprintln!("Could not add '{}': {e:#}", draft.name),
                }
            }
            SessionCmd::Show => render(&dash),
            SessionCmd::Preview => render_preview(&dash),
            SessionCmd::Confirm => {
                let lines = dash.take_consume_request();
                if lines.is_empty() {
                    eprintln!("Nothing selected to consume");
                } else {
                    for line in &lines {
                        println!(
                            "Consume {} {} of {} (batch {})",
                            line.quantity, line.card.unit, line.card.name, line.card.batch_id
                        );
                    }
                }
            }
            SessionCmd::Help => print_help(),
            SessionCmd::Quit => break,
        }
    }

    Ok(())
}

async fn refresh(client: &InventoryClient, dash: &mut Dashboard) {
    let token = dash.begin_fetch();
    dash.apply_fetch(token, client.fetch_cards().await);
}

/// Draw the dashboard for the current load state. The status column uses
/// the base classifier (anything past the warning band reads "Fresh");
/// the `list`/`show` tables are the extended-variant view and add the
/// long-life bucket on top.
fn render(dash: &Dashboard) {
    match dash.load_state() {
        LoadState::Loading => eprintln!("Loading..."),
        LoadState::Error(msg) => eprintln!("Inventory unavailable: {msg}"),
        LoadState::Ready(_) => {
            let visible = dash.visible();
            if visible.is_empty() {
                eprintln!("No ingredients match the current filter");
                return;
            }

            #[derive(Tabled)]
            struct SessionRow {
                #[tabled(rename = "Sel")]
                selected: String,
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
                #[tabled(rename = "Consume")]
                consume: String,
                #[tabled(rename = "Status")]
                status: String,
            }

            let rows: Vec<SessionRow> = visible
                .iter()
                .map(|c| SessionRow {
                    selected: (if dash.is_selected(c.id) { "*" } else { "" }).to_string(),
                    id: c.id,
                    name: truncate(&c.name, 30),
                    ingredient_type: c.ingredient_type.to_string(),
                    batch_id: truncate(&c.batch_id, 12),
                    quantity: format_quantity(c.quantity),
                    // Unspecified renders as empty, not as 0
                    consume: dash
                        .consume_quantity(c.id)
                        .map(|q| q.to_string())
                        .unwrap_or_default(),
                    status: classify(c.days_left).label,
                })
                .collect();

            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(5..7)).with(Alignment::right()))
                .to_string();
            println!("{table}");
        }
    }
}

fn render_preview(dash: &Dashboard) {
    let lines = dash.preview();
    if lines.is_empty() {
        eprintln!("Nothing selected");
        return;
    }
    for line in &lines {
        println!(
            "{}  batch {}  consume {} {}",
            line.card.name, line.card.batch_id, line.quantity, line.card.unit
        );
    }
}

fn print_help() {
    eprintln!("Commands:");
    eprintln!("  select <id>          toggle selection of an ingredient");
    eprintln!("  + <id> / - <id>      adjust the pending consume quantity");
    eprintln!("  set <id> <n>         set the pending consume quantity");
    eprintln!("  filter <type>        toggle a type filter (Produce, Dairy, ...)");
    eprintln!("  search <text>        filter by name substring");
    eprintln!("  clear                clear all filters and the search text");
    eprintln!("  refresh              refetch and reconcile the inventory");
    eprintln!("  add <name> <type> <unit>   create a new ingredient");
    eprintln!("  show                 redraw the dashboard");
    eprintln!("  preview              show the pending consume lines");
    eprintln!("  confirm              consume the selected quantities");
    eprintln!("  quit                 leave the session");
}
