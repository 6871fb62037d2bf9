use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.store.decks();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(decks)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
                return Ok(());
            }
            for line in terminal::render_forest(decks, use_color) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
