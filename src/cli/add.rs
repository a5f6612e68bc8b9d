//! CLI `add` command: embed and save a new note.

use anyhow::{Context, Result};

use brain::config::BrainConfig;
use brain::Brain;

pub fn add(
    config: &BrainConfig,
    content: &str,
    tags: Vec<String>,
    project: Option<String>,
) -> Result<()> {
    let brain = Brain::open(config).context("failed to initialize brain")?;
    let note = brain
        .add(content, tags, project)
        .context("failed to add note")?;

    println!("Note added successfully (ID: {})", note.id);
    Ok(())
}
