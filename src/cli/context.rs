//! CLI `context` command: surface notes relevant to where you are working.

use anyhow::{Context, Result};

use brain::config::BrainConfig;
use brain::{Brain, WorkContext};

pub fn context(config: &BrainConfig) -> Result<()> {
    let brain = Brain::open(config).context("failed to initialize brain")?;
    let work = WorkContext::detect();

    println!("Current context: {}", work.description);
    if let Some(ref project) = work.project {
        println!("Project: {project}");
    }
    println!();

    let results = brain
        .contextual_search(&work, config.retrieval.context_limit)
        .context("failed to get contextual notes")?;

    if results.is_empty() {
        println!("No relevant notes found for this context.");
        println!("Try adding some notes with: brain add \"your insight here\"");
        return Ok(());
    }

    println!("Found {} relevant note(s) for this context:\n", results.len());
    super::print_results(&results);
    Ok(())
}
