use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, reference: &str, yes: bool) -> Result<()> {
    let deck = app.find_deck(reference)?;
    let (id, name) = (deck.id.clone(), deck.name.clone());

    if !yes && !confirm(&format!("{} \"{}\" [y/N] ", app.labels().delete_prompt, name))? {
        println!("Cancelled");
        return Ok(());
    }

    if app.delete_deck(&id)? {
        println!("Deleted \"{}\" ({})", name, id);
    } else {
        println!("Nothing to delete for {}", id);
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but y/yes declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
