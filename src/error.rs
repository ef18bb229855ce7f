use thiserror::Error;

/// A single model call's failure modes, as seen by the retry loop.
#[derive(Debug, Error)]
pub enum CallError {
    /// The service answered but produced no usable text. Retrying is
    /// unlikely to help, so the loop treats this as terminal.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Network or service error; eligible for retry.
    #[error(transparent)]
    Transient(#[from] anyhow::Error),
}

/// What the caller sees when a review cannot be produced.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("no API key: set OPENAI_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("analysis failed after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}
