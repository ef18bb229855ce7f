use std::thread;
use std::time::Duration;

use crate::error::{CallError, ReviewError};
use crate::llm::CompletionClient;
use crate::llm::prompt_builder::PromptPair;

/// How hard to push against a flaky service.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Sleep before retry n is `base_delay * 2^(n-1)`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn delay_after(&self, attempt_index: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt_index)
    }
}

/// Run one model call with bounded retries and exponential backoff.
///
/// Transient errors are retried until the attempt budget runs out; an empty
/// response is terminal straight away. The backoff sleep blocks the calling
/// thread, same as the request itself.
pub fn complete_with_retry(
    client: &dyn CompletionClient,
    prompt: &PromptPair,
    policy: &RetryPolicy,
) -> Result<String, ReviewError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 0..max_attempts {
        match client.complete(prompt) {
            Ok(text) => return Ok(text),
            Err(CallError::EmptyResponse) => return Err(ReviewError::EmptyResponse),
            Err(CallError::Transient(err)) => {
                last_error = err.to_string();

                if attempt + 1 < max_attempts {
                    let delay = policy.delay_after(attempt);
                    log::warn!(
                        "model call failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt + 1,
                        max_attempts,
                        delay,
                        last_error
                    );
                    thread::sleep(delay);
                }
            }
        }
    }

    Err(ReviewError::Exhausted {
        attempts: max_attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    /// Plays back a scripted sequence of call outcomes and counts calls.
    struct ScriptedClient {
        calls: AtomicU32,
        script: Mutex<Vec<Result<String, CallError>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<String, CallError>>) -> Self {
            ScriptedClient {
                calls: AtomicU32::new(0),
                script: Mutex::new(script),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionClient for ScriptedClient {
        fn complete(&self, _prompt: &PromptPair) -> Result<String, CallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().unwrap().remove(0)
        }
    }

    fn prompt() -> PromptPair {
        PromptPair {
            system: "system".to_string(),
            user: "review this".to_string(),
        }
    }

    fn policy(max_attempts: u32, base_delay_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    #[test]
    fn single_attempt_failure_makes_exactly_one_call() {
        let client = ScriptedClient::new(vec![Err(CallError::Transient(anyhow!("boom")))]);

        let err = complete_with_retry(&client, &prompt(), &policy(1, 0)).unwrap_err();

        assert_eq!(client.calls(), 1);
        match err {
            ReviewError::Exhausted { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn succeeds_on_third_attempt_after_backoff() {
        let client = ScriptedClient::new(vec![
            Err(CallError::Transient(anyhow!("timeout"))),
            Err(CallError::Transient(anyhow!("timeout"))),
            Ok("looks good".to_string()),
        ]);

        let base_ms = 10;
        let started = Instant::now();
        let review = complete_with_retry(&client, &prompt(), &policy(3, base_ms)).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(review, "looks good");
        assert_eq!(client.calls(), 3);
        // base*1 after the first failure, base*2 after the second
        assert!(
            elapsed >= Duration::from_millis(base_ms * 3),
            "elapsed {elapsed:?} shorter than the expected backoff"
        );
    }

    #[test]
    fn empty_response_is_terminal_and_not_retried() {
        let client = ScriptedClient::new(vec![
            Err(CallError::EmptyResponse),
            Ok("should never be reached".to_string()),
        ]);

        let err = complete_with_retry(&client, &prompt(), &policy(3, 0)).unwrap_err();

        assert_eq!(client.calls(), 1);
        assert!(matches!(err, ReviewError::EmptyResponse));
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn exhausted_error_names_last_failure_and_attempts() {
        let client = ScriptedClient::new(vec![
            Err(CallError::Transient(anyhow!("rate limited"))),
            Err(CallError::Transient(anyhow!("rate limited"))),
        ]);

        let err = complete_with_retry(&client, &prompt(), &policy(2, 1)).unwrap_err();

        assert_eq!(client.calls(), 2);
        let msg = err.to_string();
        assert!(msg.contains("rate limited"), "message was: {msg}");
        assert!(msg.contains('2'), "message was: {msg}");
    }

    #[test]
    fn success_on_first_attempt_sleeps_not_at_all() {
        let client = ScriptedClient::new(vec![Ok("fine".to_string())]);

        let started = Instant::now();
        let review = complete_with_retry(&client, &prompt(), &policy(3, 250)).unwrap();

        assert_eq!(review, "fine");
        assert_eq!(client.calls(), 1);
        assert!(started.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let p = policy(5, 100);
        assert_eq!(p.delay_after(0), Duration::from_millis(100));
        assert_eq!(p.delay_after(1), Duration::from_millis(200));
        assert_eq!(p.delay_after(2), Duration::from_millis(400));
    }
}
