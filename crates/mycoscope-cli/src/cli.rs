use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mycoscope: mycology research sessions from the terminal.
#[derive(Parser, Debug)]
#[command(name = "mycoscope", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Backend base address override.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a research session and stream its events.
    Research {
        query: String,

        #[arg(long)]
        report_type: Option<String>,

        #[arg(long)]
        tone: Option<String>,

        /// Data source (pubmed, arxiv, web, local). Repeatable.
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Domain filter (mycology, microbiology, medical). Repeatable.
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Follow-up chat message sent once the session is open. Repeatable.
        #[arg(long = "chat")]
        chat: Vec<String>,
    },

    /// Print the query enriched with domain keywords.
    Enhance {
        query: String,

        /// Keyword category. Repeatable; defaults to `general`.
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Print related follow-up queries.
    Suggest {
        query: String,

        #[arg(long)]
        category: Option<String>,
    },

    /// Manage documents uploaded to the backend.
    Files {
        #[command(subcommand)]
        action: FilesCommand,
    },

    /// Print the effective configuration as JSON.
    Config,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    List,
    Upload { path: PathBuf },
    Delete { name: String },
}

pub fn parse() -> Args {
    Args::parse()
}
