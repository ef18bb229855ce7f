use log::debug;

use crate::config::Config;
use crate::error::ReviewError;
use crate::llm::CompletionClient;
use crate::llm::noop::NoopClient;
use crate::llm::openai::OpenAiClient;

/// Build the model client based on config.
///
/// A missing API key is caught here, before anything could go on the wire.
pub fn build_client(
    cfg: &Config,
    no_model: bool,
) -> Result<Box<dyn CompletionClient>, ReviewError> {
    if no_model || cfg.model.eq_ignore_ascii_case("none") {
        debug!("Using NoopClient (no model calls)");
        return Ok(Box::new(NoopClient));
    }

    let key = cfg.api_key.clone().ok_or(ReviewError::MissingApiKey)?;

    debug!("Using OpenAiClient with model: {}", cfg.model);

    Ok(Box::new(OpenAiClient::new(key, cfg)))
}
