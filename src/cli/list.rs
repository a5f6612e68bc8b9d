use anyhow::{Context, Result};

use brain::config::BrainConfig;
use brain::memory::types::sort_recent_first;
use brain::Brain;

/// List notes most recent first. `limit == 0` shows all.
pub fn list(config: &BrainConfig, limit: usize, tags: &[String]) -> Result<()> {
    let brain = Brain::open(config).context("failed to initialize brain")?;
    let mut notes = brain.list(tags);

    if notes.is_empty() {
        println!("No notes found.");
        println!("Add your first note with: brain add \"your insight here\"");
        return Ok(());
    }

    sort_recent_first(&mut notes);
    if limit > 0 {
        notes.truncate(limit);
    }

    println!("Found {} note(s):\n", notes.len());
    for (i, note) in notes.iter().enumerate() {
        println!(
            "{}. [{}] {}",
            i + 1,
            note.timestamp.format("%Y-%m-%d %H:%M"),
            note.content
        );
        if !note.tags.is_empty() {
            println!("   Tags: {}", note.tags.join(", "));
        }
        if let Some(ref project) = note.project {
            println!("   Project: {project}");
        }
        println!("   ID: {}\n", note.id);
    }

    Ok(())
}
