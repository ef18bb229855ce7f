use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "reviewbot",
    version,
    about = "LLM-assisted code review from your terminal"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// File containing the code to review; reads stdin if omitted
    pub file: Option<PathBuf>,

    /// Kind of review: syntax, optimization, best_practices, security,
    /// or any free-form label (falls back to a generic review)
    #[arg(short = 't', long, default_value = "best_practices")]
    pub review_type: String,

    /// Model name to use (e.g. gpt-4o-mini)
    #[arg(long)]
    pub model: Option<String>,

    /// Disable model calls; return a dummy review instead
    #[arg(long)]
    pub no_model: bool,

    /// API key (otherwise uses OPENAI_API_KEY env var)
    #[arg(long, env = "OPENAI_API_KEY")]
    pub api_key: Option<String>,

    /// Write the review to this file as markdown
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum attempts for the model call (retried with exponential backoff)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
