//! # catalog-browser
//!
//! Command-line front end over the load coordinator and the note store.
//!
//! ```bash
//! catalog-browser list --kind episode --page 2
//! catalog-browser list --search rick
//! catalog-browser note set 1 "Never trust him"
//! RUST_LOG=debug catalog-browser note show 1
//! ```

use catalog_api::tracing::setup_tracing;
use catalog_api::ResourceKind;
use catalog_browser::config::BrowserConfig;
use catalog_browser::coordinator::{BrowserState, CoordinatorClient, LoadState};
use catalog_browser::lifecycle::BrowserSystem;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Instrument};

#[derive(Parser)]
#[command(name = "catalog-browser", about = "Browse the catalog and keep notes on characters")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of a resource kind.
    List {
        #[arg(long, default_value = "character")]
        kind: ResourceKind,
        /// Filter by name.
        #[arg(long)]
        search: Option<String>,
        /// Page to stop at; stops early when there is no next page.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Read or write character notes.
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    Show { id: u32 },
    Set { id: u32, text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BrowserConfig::load(path)?,
        None => BrowserConfig::default(),
    };
    let system = BrowserSystem::from_config(&config)?;

    match cli.command {
        Command::List { kind, search, page } => {
            let span = tracing::info_span!("list", %kind, page);
            let state = browse(&system.coordinator, kind, search, page)
                .instrument(span)
                .await?;
            print_state(&state);
        }
        Command::Note { action } => match action {
            NoteAction::Show { id } => {
                let note = system.notes.load(id)?;
                if note.is_empty() {
                    println!("(no note for character {id})");
                } else {
                    println!("{note}");
                }
            }
            NoteAction::Set { id, text } => {
                system.notes.save(id, &text)?;
                info!(id, "Note saved");
            }
        },
    }

    system.shutdown().await?;
    Ok(())
}

/// Drives the coordinator the way a list screen would and returns the final state.
async fn browse(
    coordinator: &CoordinatorClient,
    kind: ResourceKind,
    search: Option<String>,
    page: u32,
) -> Result<BrowserState, Box<dyn std::error::Error>> {
    let selected = coordinator.select_resource(kind).await?;
    let outcome = match search {
        Some(text) => coordinator.apply_search(text).await?,
        None if selected.is_issued() => selected,
        None => coordinator.first_load().await?,
    };
    let mut state = coordinator.settled(outcome).await?;

    while state.page < page && state.load_state == LoadState::Loaded && state.has_next() {
        let outcome = coordinator.next_page().await?;
        state = coordinator.settled(outcome).await?;
    }
    Ok(state)
}

fn print_state(state: &BrowserState) {
    if let LoadState::Failed(message) = &state.load_state {
        println!("Error: {message}");
        println!("(run again to retry)");
        return;
    }

    println!("{} (page {})", state.selected.label(), state.page);
    match state.selected {
        ResourceKind::Character => {
            for c in &state.characters {
                println!("  #{:<4} {} [{}] {}", c.id, c.name, c.status, c.species);
            }
        }
        ResourceKind::Episode => {
            for e in &state.episodes {
                println!("  #{:<4} {} {} ({})", e.id, e.code, e.name, e.air_date);
            }
        }
        ResourceKind::Location => {
            for l in &state.locations {
                println!("  #{:<4} {} [{}] {}", l.id, l.name, l.kind, l.dimension);
            }
        }
    }
    if state.item_count() == 0 {
        println!("  (no results)");
    }

    if let Some(info) = &state.info {
        println!(
            "{} total, {} pages | prev: {} | next: {}",
            info.count,
            info.pages,
            if state.has_prev() { "yes" } else { "no" },
            if state.has_next() { "yes" } else { "no" },
        );
    }
}
