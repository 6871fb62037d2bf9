use std::path::Path;

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, name: &str, csv_path: &Path, format: &OutputFormat) -> Result<()> {
    let id = app.import_deck(name, csv_path)?;
    let deck = app.find_deck(&id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id,
                "name": deck.name,
                "cardCount": deck.cards.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported \"{}\" ({} cards)", deck.name, deck.cards.len());
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}
