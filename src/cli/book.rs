use anyhow::{Context, Result};

use babel::config::BabelConfig;
use babel::library::{Book, Coordinate};

/// Print the book at a coordinate. Components are validated strictly.
pub async fn show(config: &BabelConfig, parts: [&str; 4], json: bool) -> Result<()> {
    let [hexagon, wall, shelf, volume] = parts;
    let coordinate = Coordinate::parse_parts(hexagon, wall, shelf, volume)?;

    let state = super::open(config)?;
    let library = state.library_arc();
    let book = tokio::task::spawn_blocking(move || library.generate_book(&coordinate)).await?;

    if json {
        let out = serde_json::to_string_pretty(&book).context("failed to serialize book")?;
        println!("{out}");
    } else {
        print_book(&book);
    }
    Ok(())
}

fn print_book(book: &Book) {
    println!("{}", book.title);
    println!("by {} ({}, {})", book.author, book.genre, book.publication_year);
    println!("{} · {} words\n", book.coordinate, book.word_count);
    println!("{}\n", book.summary);

    for chapter in &book.chapters {
        println!(
            "  {:>2}. {} ({} words)",
            chapter.number, chapter.title, chapter.word_count
        );
        if !chapter.key_terms.is_empty() {
            println!("      key terms: {}", chapter.key_terms.join(", "));
        }
    }

    println!("\nBibliography");
    for entry in &book.bibliography {
        println!(
            "  {} ({}). {}. {}.",
            entry.author, entry.year, entry.title, entry.publisher
        );
    }
}
