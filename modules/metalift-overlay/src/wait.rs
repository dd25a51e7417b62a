use std::time::Duration;

use tokio::time::{sleep, timeout};

use metalift_common::Config;

/// Bounds for a polling wait. Both limits are explicit: the attempt cap and
/// the wall-clock timeout race, and whichever is hit first stops the poll.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    pub interval: Duration,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 20,
            timeout: Duration::from_secs(15),
        }
    }
}

impl From<&Config> for WaitConfig {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.wait_interval,
            max_attempts: config.wait_max_attempts,
            timeout: config.wait_timeout,
        }
    }
}

/// Poll `probe` at a fixed interval until it yields a value, the attempt cap
/// is exhausted, or the hard timeout fires — the timeout wins the race even
/// if attempts remain. `None` means "not found", which is a normal outcome.
pub async fn wait_for<T, F>(config: WaitConfig, mut probe: F) -> Option<T>
where
    F: FnMut() -> Option<T>,
{
    let attempts = async {
        for _ in 0..config.max_attempts {
            if let Some(value) = probe() {
                return Some(value);
            }
            sleep(config.interval).await;
        }
        None
    };

    timeout(config.timeout, attempts).await.unwrap_or(None)
}
