use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Lets only the latest of a burst of calls through once the caller has been
/// quiet for `quiet_period`.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            latest: AtomicU64::new(0),
        }
    }

    /// Waits out the quiet period. Returns `false` when a newer call arrived in
    /// the meantime, in which case the caller should drop its work.
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet_period).await;
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
