//! CLI `ask` command: answer a question with the most relevant notes.

use anyhow::{Context, Result};

use brain::config::BrainConfig;
use brain::Brain;

pub fn ask(config: &BrainConfig, question: &str) -> Result<()> {
    let brain = Brain::open(config).context("failed to initialize brain")?;
    let results = brain
        .search(question, config.retrieval.ask_limit, &[])
        .context("search failed")?;

    if results.is_empty() {
        println!("I don't have any notes that might answer that question.");
        println!("Try adding some notes first with: brain add \"your insight\"");
        return Ok(());
    }

    println!("Based on your notes, here's what I found:\n");
    println!("Question: {question}\n");
    println!("Relevant notes:");
    for (i, result) in results.iter().enumerate() {
        println!("{}. {}", i + 1, result.note.content);
        if !result.note.tags.is_empty() {
            println!("   Tags: {}", result.note.tags.join(", "));
        }
        println!("   Relevance: {:.0}%\n", result.relevance_percent());
    }

    Ok(())
}
