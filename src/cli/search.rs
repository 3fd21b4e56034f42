use anyhow::Result;

use babel::config::BabelConfig;
use babel::search::SearchMode;

/// Run a search from the terminal and print the ranked results.
pub async fn search(
    config: &BabelConfig,
    query: &str,
    mode: Option<&str>,
    max_results: Option<usize>,
) -> Result<()> {
    let state = super::open(config)?;
    let mode = match mode {
        Some(m) => m.parse::<SearchMode>()?,
        None => state.default_mode(),
    };

    let outcome = state.search().search(query, mode, max_results).await?;

    if let Some(reason) = &outcome.fallback_reason {
        println!("(enhanced search unavailable: {reason}; showing procedural results)\n");
    }
    if outcome.results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!(
        "Found {} result(s) in {} explored books ({} mode{})\n",
        outcome.results.len(),
        outcome.total_explored,
        outcome.mode,
        if outcome.truncated { ", truncated" } else { "" }
    );

    for (i, result) in outcome.results.iter().enumerate() {
        println!(
            "  {}. {} (score: {:.4})",
            i + 1,
            result.book.title,
            result.score,
        );
        println!(
            "     {} · {} · {}",
            result.book.author, result.book.publication_year, result.book.id
        );
        println!("     {}", super::preview(&result.book.summary, 120));
        println!();
    }

    Ok(())
}
