//! Politeness delay between targets.
//!
//! Pacing is policy, not correctness: it never gates strategy logic and is
//! not a retry mechanism. Parameters are explicit configuration rather than
//! ambient state.

use std::time::Duration;

use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct PacingConfig {
    pub base_ms: u64,
    /// Upper bound for the random jitter added to the base delay.
    pub jitter_ms: u64,
}

impl PacingConfig {
    #[must_use]
    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }
}

/// Sleep for the base delay plus a uniformly sampled jitter.
pub async fn pause_between_targets(config: PacingConfig) {
    let jitter = sample_jitter(config.jitter_ms);
    let delay_ms = config.base_ms.saturating_add(jitter);
    tracing::debug!(base_ms = config.base_ms, jitter_ms = jitter, "pacing delay");
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

fn sample_jitter(jitter_ms: u64) -> u64 {
    if jitter_ms == 0 {
        0
    } else {
        rand::rng().random_range(0..=jitter_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_zero_is_always_zero() {
        assert_eq!(sample_jitter(0), 0);
    }

    #[test]
    fn jitter_stays_within_bound() {
        for _ in 0..200 {
            assert!(sample_jitter(50) <= 50);
        }
    }

    #[tokio::test]
    async fn zero_config_returns_promptly() {
        let started = std::time::Instant::now();
        pause_between_targets(PacingConfig::new(0, 0)).await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
