mod cli_args;
mod config;
mod error;
mod input;
mod llm;
mod logging;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::time::Duration;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::llm::prompt_builder;
use crate::llm::retry::{self, RetryPolicy};

/// What kind of review the user asked for.
///
/// The known labels map to dedicated instruction templates; anything else is
/// carried through as-is and reviewed with the generic template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCategory {
    Syntax,
    Optimization,
    BestPractices,
    Security,
    Other(String),
}

impl ReviewCategory {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "syntax" => ReviewCategory::Syntax,
            "optimization" => ReviewCategory::Optimization,
            "best_practices" => ReviewCategory::BestPractices,
            "security" => ReviewCategory::Security,
            other => ReviewCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReviewCategory::Syntax => "syntax",
            ReviewCategory::Optimization => "optimization",
            ReviewCategory::BestPractices => "best_practices",
            ReviewCategory::Security => "security",
            ReviewCategory::Other(label) => label,
        }
    }
}

/// One review round trip: the code under review plus how to review it.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub source: String,
    pub category: ReviewCategory,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let source = input::read_source(cli.file.as_deref())?;
    let cfg = Config::from_sources(&cli);
    let client = setup::build_client(&cfg, cli.no_model)?;

    let request = ReviewRequest {
        source,
        category: ReviewCategory::parse(&cli.review_type),
    };

    log::info!(
        "Analyzing code ({} review, model {})...",
        request.category.as_str(),
        cfg.model
    );

    let prompt = prompt_builder::review_prompt(&request);
    let policy = RetryPolicy {
        max_attempts: cfg.max_attempts,
        base_delay: Duration::from_millis(cfg.retry_base_delay_ms),
    };

    let review = retry::complete_with_retry(client.as_ref(), &prompt, &policy)?;

    println!();
    println!("----- Review -----");
    println!("{review}");
    println!("------------------");

    if let Some(path) = &cli.output {
        fs::write(path, &review)
            .with_context(|| format!("failed to write review to {}", path.display()))?;
        println!("Saved review to {}", path.display());
    }

    Ok(())
}
