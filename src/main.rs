mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use brain::config::BrainConfig;

#[derive(Parser)]
#[command(
    name = "brain",
    version,
    about = "A second brain CLI for storing and retrieving ideas semantically"
)]
struct Cli {
    /// Config file (default: ~/.brain/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new note to your brain
    Add {
        /// The note text
        content: String,
        /// Tags for the note (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Project this note belongs to
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Search your notes semantically
    Search {
        query: String,
        /// Maximum number of results to return (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only notes with any of these tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Ask a question and get the notes that answer it
    Ask { question: String },
    /// List notes, most recent first
    List {
        /// Maximum number of notes to show (0 = all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,
        /// Only notes with any of these tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Show notes relevant to your current directory and git project
    Context,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BrainConfig::load_from(path)?,
        None => BrainConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add {
            content,
            tags,
            project,
        } => cli::add::add(&config, &content, tags, project),
        Command::Search { query, limit, tags } => {
            let limit = limit.unwrap_or(config.retrieval.default_limit);
            cli::search::search(&config, &query, limit, &tags)
        }
        Command::Ask { question } => cli::ask::ask(&config, &question),
        Command::List { limit, tags } => cli::list::list(&config, limit, &tags),
        Command::Context => cli::context::context(&config),
    }
}
