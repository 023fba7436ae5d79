use std::time::Duration;

/// Timeouts for successive attempts of the initial load.
/// Escalating values ride out a backend that is waking from a cold start.
pub const DEFAULT_ATTEMPT_TIMEOUTS_MS: [u64; 3] = [10_000, 20_000, 30_000];

/// Backoff unit; the wait after attempt `n` is `n` times this.
pub const DEFAULT_BACKOFF_STEP_MS: u64 = 500;

/// Timeout of the single attempt made by a manual refresh.
pub const DEFAULT_REFRESH_TIMEOUT_MS: u64 = 15_000;

/// Timing of the category fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// One entry per attempt of the initial load.
    pub attempt_timeouts: Vec<Duration>,
    pub backoff_step: Duration,
    pub refresh_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeouts: DEFAULT_ATTEMPT_TIMEOUTS_MS
                .iter()
                .copied()
                .map(Duration::from_millis)
                .collect(),
            backoff_step: Duration::from_millis(DEFAULT_BACKOFF_STEP_MS),
            refresh_timeout: Duration::from_millis(DEFAULT_REFRESH_TIMEOUT_MS),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> usize {
        self.attempt_timeouts.len()
    }

    /// Delay before the attempt following `attempt` (1-based).
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_after(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(1000));
        assert_eq!(policy.max_attempts(), 3);
    }
}
