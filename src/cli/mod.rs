pub mod book;
pub mod concepts;
pub mod search;

use anyhow::Result;

use babel::config::BabelConfig;
use babel::server::AppState;

/// Build the same state the server runs with, so terminal output matches the API.
fn open(config: &BabelConfig) -> Result<AppState> {
    AppState::new(config.clone())
}

/// Cut `text` to at most `max` characters on a char boundary.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
