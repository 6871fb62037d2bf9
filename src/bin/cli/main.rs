mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "webmemo-cli", about = "Flashcard decks with saved review results", version)]
struct Cli {
    /// Config file (default: <config dir>/webmemo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the deck store (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show all decks and their saved results as a tree
    List,

    /// Import a deck from CSV (question,answer,memo,learned,hide,review)
    Add {
        /// Deck name
        name: String,
        /// CSV file to import
        csv: PathBuf,
    },

    /// Delete a deck, and every copy of it nested under other decks
    Delete {
        /// Deck id or name (case-insensitive prefix match)
        deck: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Print a deck's cards and flags
    Show {
        /// Deck id or name
        deck: String,
    },

    /// Review a deck interactively
    #[cfg(feature = "tui")]
    Review {
        /// Deck id or name
        deck: String,
    },

    /// Run a throwaway quiz from a CSV with 問題/答え headers
    #[cfg(feature = "tui")]
    Quiz {
        /// CSV file to quiz from
        csv: PathBuf,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(app, tui::Launch::Browse)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::List) => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Add { name, csv }) => {
            commands::add::run(&mut app, &name, &csv, &cli.format)?;
        }
        Some(Command::Delete { deck, yes }) => {
            commands::delete::run(&mut app, &deck, yes)?;
        }
        Some(Command::Show { deck }) => {
            commands::show::run(&app, &deck, &cli.format, use_color)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Review { deck }) => {
            let id = app.find_deck(&deck)?.id.clone();
            tui::run(app, tui::Launch::Review(id))?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Quiz { csv }) => {
            let cards = app.read_quiz(&csv)?;
            tui::run(app, tui::Launch::Quiz(cards))?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(app, tui::Launch::Browse)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
