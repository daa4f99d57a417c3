use tm_config::RetryConfig;

use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;

/// Errors that may clear up if the operation is simply tried again.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `config.max_attempts` is used up. Delays grow by `backoff_multiplier`,
/// are capped at `max_delay`, and with jitter are scaled into [0.5, 1.0).
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= max_attempts {
                    warn!(
                        "{} failed after {} attempt(s): {}",
                        operation_name, attempts, e
                    );
                    return Err(e);
                }

                let delay = jittered(config.backoff_delay(attempts), config.jitter);
                debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name, attempts, e, delay
                );
                sleep(delay).await;
            }
        }
    }
}

fn jittered(delay: Duration, jitter: bool) -> Duration {
    if !jitter {
        return delay;
    }
    let factor = 0.5 + rand::random::<f64>() * 0.5;
    Duration::from_secs_f64(delay.as_secs_f64() * factor)
}
