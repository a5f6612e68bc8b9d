pub mod add;
pub mod ask;
pub mod context;
pub mod list;
pub mod search;

use brain::SearchResult;

/// Print ranked results: rank, date, content, tags, project and relevance.
pub fn print_results(results: &[SearchResult]) {
    for (i, result) in results.iter().enumerate() {
        let note = &result.note;
        println!(
            "{}. [{}] {}",
            i + 1,
            note.timestamp.format("%Y-%m-%d"),
            note.content
        );
        if !note.tags.is_empty() {
            println!("   Tags: {}", note.tags.join(", "));
        }
        if let Some(ref project) = note.project {
            println!("   Project: {project}");
        }
        println!("   Relevance: {:.2}%", result.relevance_percent());
        println!();
    }
}
