use anyhow::{Context, Result};

use brain::config::BrainConfig;
use brain::Brain;

/// Run a semantic search from the terminal.
pub fn search(config: &BrainConfig, query: &str, limit: usize, tags: &[String]) -> Result<()> {
    let brain = Brain::open(config).context("failed to initialize brain")?;
    let results = brain.search(query, limit, tags).context("search failed")?;

    if results.is_empty() {
        println!("No matching notes found.");
        return Ok(());
    }

    println!("Found {} relevant note(s):\n", results.len());
    super::print_results(&results);
    Ok(())
}
