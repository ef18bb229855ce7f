use crate::cli_args::Cli;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Final resolved configuration for reviewbot.
///
/// The API key stays optional here; `setup::build_client` is the point that
/// fails closed when a real model client needs one.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--model`, `--api-key`, `--max-attempts`)
    ///   2. Env vars `REVIEWBOT_MODEL` / `OPENAI_API_KEY`
    ///   3. TOML `~/.config/reviewbot.toml`
    ///   4. Hardcoded defaults
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = load_file_config().unwrap_or_default();

        let model_env = env::var("REVIEWBOT_MODEL").ok();
        let api_key_env = env::var("OPENAI_API_KEY").ok();

        let model = resolve(cli.model.clone(), model_env, file_cfg.model)
            .unwrap_or_else(|| "gpt-4o-mini".to_string());

        let api_key = resolve(cli.api_key.clone(), api_key_env, file_cfg.api_key);

        Config {
            api_key,
            model,
            api_base_url: file_cfg
                .api_base_url
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
            temperature: file_cfg.temperature.unwrap_or(0.5),
            max_output_tokens: file_cfg.max_output_tokens.unwrap_or(500),
            request_timeout_secs: file_cfg.request_timeout_secs.unwrap_or(90),
            max_attempts: cli.max_attempts.or(file_cfg.max_attempts).unwrap_or(3).max(1),
            retry_base_delay_ms: file_cfg.retry_base_delay_ms.unwrap_or(1_000),
        }
    }
}

/// First-wins resolution across the three user-supplied layers.
fn resolve(cli: Option<String>, env: Option<String>, file: Option<String>) -> Option<String> {
    cli.or(env).or(file)
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub retry_base_delay_ms: Option<u64>,
}

/// Return `~/.config/reviewbot.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("reviewbot.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    toml::from_str::<FileConfig>(&data).ok()
}
