//! Tests for the retry loop and its backoff policy

use pagegraph_crawl::{CrawlError, CrawlResult, RetryPolicy, default_backoff, run_with_retry};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn zero_backoff(_attempt: u32) -> Duration {
    Duration::ZERO
}

fn always_fails() -> CrawlResult<()> {
    Err(CrawlError::Config("launch refused".to_string()))
}

#[tokio::test]
async fn failing_launch_makes_max_retries_plus_one_attempts() {
    for max_retries in [0u32, 1, 3, 5] {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_retries,
            backoff: zero_backoff,
        };

        let result = run_with_retry(&policy, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { always_fails() }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), max_retries + 1);
        match result {
            Err(CrawlError::RetriesExhausted(n)) => assert_eq!(n, max_retries),
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn zero_retries_means_one_attempt_and_no_sleep() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy {
        max_retries: 0,
        backoff: |_| Duration::from_secs(3600),
    };

    let start = std::time::Instant::now();
    let result = run_with_retry(&policy, || {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { always_fails() }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(result.is_err());
    // The hour-long backoff was never consulted.
    assert!(start.elapsed() < Duration::from_secs(60));
}

#[tokio::test]
async fn first_success_short_circuits_the_loop() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy {
        max_retries: 5,
        backoff: zero_backoff,
    };

    let result = run_with_retry(&policy, || {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if attempt < 3 {
                Err(CrawlError::Config("not yet".to_string()))
            } else {
                Ok(attempt)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 3);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn immediate_success_needs_no_retries() {
    let policy = RetryPolicy::default();
    let result = run_with_retry(&policy, || async { Ok(42) }).await;
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn default_backoff_doubles_from_one_second() {
    assert_eq!(default_backoff(1), Duration::from_millis(1000));
    assert_eq!(default_backoff(2), Duration::from_millis(2000));
    assert_eq!(default_backoff(3), Duration::from_millis(4000));
    assert_eq!(default_backoff(4), Duration::from_millis(8000));
    assert_eq!(default_backoff(10), Duration::from_millis(512_000));
}

#[test]
fn default_policy_matches_the_documented_budget() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 3);
    assert_eq!((policy.backoff)(1), Duration::from_secs(1));
}

/// With the tokio clock paused, sleeps advance virtual time exactly, so
/// the i-th sleep can be read back as the gap between attempts.
#[tokio::test(start_paused = true)]
async fn each_retry_sleeps_for_the_backoff_of_its_attempt_index() {
    let policy = RetryPolicy::default();
    let attempt_times = Mutex::new(Vec::new());

    let result = run_with_retry(&policy, || {
        attempt_times.lock().unwrap().push(tokio::time::Instant::now());
        async { always_fails() }
    })
    .await;
    assert!(matches!(result, Err(CrawlError::RetriesExhausted(3))));

    let times = attempt_times.lock().unwrap();
    assert_eq!(times.len(), 4);
    assert_eq!(times[1] - times[0], default_backoff(1));
    assert_eq!(times[2] - times[1], default_backoff(2));
    assert_eq!(times[3] - times[2], default_backoff(3));
}
