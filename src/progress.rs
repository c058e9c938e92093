use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_millis(1200);

pub const LOADING_MESSAGES: &[&str] = &[
    "Conectando con el servidor...",
    "Buscando al alumno...",
    "Cargando asistencias...",
    "Preparando tu portal...",
];

/// Cycles status messages on a timer until stopped or dropped.
///
/// Dropping only requests cancellation; a tick running on another worker
/// may still complete afterwards. `stop` waits for it.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start<F>(period: Duration, messages: &'static [&'static str], mut on_tick: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            for &message in messages.iter().cycle() {
                interval.tick().await;
                debug!(status = message, "progress tick");
                on_tick(message);
            }
        });
        Self { handle }
    }

    /// Cancels the ticker and waits for a tick already in progress to return.
    pub async fn stop(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
