use std::{future::Future, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    Retry,
    Stop,
}

/// Runs `op` up to `attempts` times, sleeping `delay` between failures that
/// `classify` marks as retryable. Returns the last error together with the
/// number of attempts made.
pub async fn with_bounded_retries<T, E, C, F, Fut>(
    label: &str,
    attempts: u32,
    delay: Duration,
    classify: C,
    mut op: F,
) -> Result<T, (E, u32)>
where
    E: std::fmt::Display,
    C: Fn(&E) -> RetryDisposition,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= attempts || classify(&err) == RetryDisposition::Stop => {
                return Err((err, attempt));
            }
            Err(err) => {
                warn!("{label} attempt {attempt} failed: {err}");
                info!("Retrying in {} seconds...", delay.as_secs_f32());
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn retry_all(_: &String) -> RetryDisposition {
        RetryDisposition::Retry
    }

    #[tokio::test]
    #[traced_test]
    async fn test_succeeds_after_failures() {
        let result: Result<u32, (String, u32)> =
            with_bounded_retries("setup", 3, Duration::from_millis(1), retry_all, |attempt| async move {
                if attempt < 3 {
                    Err(format!("boom {attempt}"))
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert!(logs_contain("setup attempt 1 failed: boom 1"));
        assert!(logs_contain("setup attempt 2 failed: boom 2"));
    }

    #[tokio::test]
    async fn test_gives_up_after_last_attempt() {
        let result: Result<(), (String, u32)> =
            with_bounded_retries("setup", 2, Duration::from_millis(1), retry_all, |attempt| async move {
                Err(format!("boom {attempt}"))
            })
            .await;

        assert_eq!(result, Err(("boom 2".to_string(), 2)));
    }

    #[tokio::test]
    async fn test_stop_disposition_short_circuits() {
        let mut calls = 0;
        let result: Result<(), (String, u32)> = with_bounded_retries(
            "setup",
            5,
            Duration::from_millis(1),
            |_: &String| RetryDisposition::Stop,
            |attempt| {
                calls += 1;
                async move { Err(format!("fatal {attempt}")) }
            },
        )
        .await;

        assert_eq!(result, Err(("fatal 1".to_string(), 1)));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let result: Result<u32, (String, u32)> =
            with_bounded_retries("setup", 0, Duration::ZERO, retry_all, |attempt| async move {
                Ok(attempt)
            })
            .await;
        assert_eq!(result, Ok(1));
    }
}
