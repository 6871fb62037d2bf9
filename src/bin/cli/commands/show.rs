use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, reference: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(reference)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(deck)?);
        return Ok(());
    }

    // Print header
    if use_color {
        println!("{}{}{}", terminal::Color::BOLD, deck.name, terminal::Color::RESET);
    } else {
        println!("{}", deck.name);
    }
    println!("ID: {}  Results: {}", deck.id, deck.children.len());

    for (i, card) in deck.cards.iter().enumerate() {
        println!();
        for line in terminal::render_card(i, card, app.labels(), use_color) {
            println!("{}", line);
        }
    }

    Ok(())
}
