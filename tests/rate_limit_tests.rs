//! Login rate-limiter behavior, exercised directly without a server.

use std::time::Duration;

use orghub::rate_limit::LoginRateLimiter;

#[test]
fn five_failures_lock_the_email_out() {
    let limiter = LoginRateLimiter::new();

    for _ in 0..4 {
        limiter.record_failure("head@test.com");
    }
    assert!(limiter.check("head@test.com").is_ok());

    limiter.record_failure("head@test.com");
    assert!(limiter.check("head@test.com").is_err());

    // Other emails stay unaffected
    assert!(limiter.check("other@test.com").is_ok());
}

#[test]
fn email_comparison_is_case_insensitive() {
    let limiter = LoginRateLimiter::new();

    for _ in 0..5 {
        limiter.record_failure("Head@Test.com");
    }
    assert!(limiter.check("head@test.com").is_err());
}

#[test]
fn cleanup_evicts_lapsed_windows() {
    let limiter = LoginRateLimiter::new();

    for _ in 0..5 {
        limiter.record_failure("head@test.com");
    }
    assert!(limiter.check("head@test.com").is_err());

    // A zero max-age makes every window lapsed; the entry is dropped and the
    // email can attempt again.
    limiter.cleanup(Duration::ZERO);
    assert!(limiter.check("head@test.com").is_ok());
}

#[test]
fn recording_a_failure_evicts_lapsed_entries() {
    let limiter = LoginRateLimiter::new();

    // Each failure prunes before counting, so a burst across many emails
    // cannot leave the map growing with already-lapsed windows. With fresh
    // windows nothing is evicted and every count survives.
    for n in 0..50 {
        limiter.record_failure(&format!("head{n}@test.com"));
    }
    for _ in 0..4 {
        limiter.record_failure("head0@test.com");
    }
    assert!(limiter.check("head0@test.com").is_err());
    assert!(limiter.check("head49@test.com").is_ok());
}
