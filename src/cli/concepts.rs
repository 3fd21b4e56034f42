use anyhow::Result;

use babel::config::BabelConfig;
use babel::library::coordinate::BOOKS_PER_HEXAGON;

/// Print the vocabulary tables and library geometry.
pub fn show(config: &BabelConfig) -> Result<()> {
    let state = super::open(config)?;
    let library = state.library();
    let vocab = library.vocabulary();
    let years = library.years();

    println!("Base seed: {}", library.base_seed());
    println!("Years:     {}-{}", years.earliest, years.latest);
    println!("Geometry:  {BOOKS_PER_HEXAGON} books per hexagon, unbounded hexagons\n");

    println!("Concepts ({}):", vocab.concepts.len());
    println!("  {}\n", vocab.concept_names().join(", "));
    println!("Fields ({}):", vocab.field_names().len());
    println!("  {}\n", vocab.field_names().join(", "));
    println!("Adjectives ({}):", vocab.adjectives.len());
    println!("  {}\n", vocab.adjectives.join(", "));
    println!(
        "Templates: {} title, {} abstract, {} chapter title, {} sentence, {} citation",
        vocab.title_templates.len(),
        vocab.abstract_templates.len(),
        vocab.chapter_title_templates.len(),
        vocab.sentence_templates.len(),
        vocab.citation_templates.len(),
    );
    Ok(())
}
