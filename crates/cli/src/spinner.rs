//! Busy indicator shown while decisions are computed

use std::io::Write;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::output::THEME;

/// Frame shown on the given tick
pub fn frame(tick: usize) -> &'static str {
    THEME.spinner_frames[tick % THEME.spinner_frames.len()]
}

/// Animated indicator drawn on stderr until stopped
pub struct Spinner {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Start animating `message`. When disabled the task only waits to be stopped.
    pub fn start(message: String, enabled: bool) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            if !enabled {
                let _ = stop_rx.await;
                return;
            }

            let mut ticker = interval(THEME.spinner_tick);
            let mut tick = 0usize;
            let mut stderr = std::io::stderr();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let _ = write!(stderr, "\r{} {}", frame(tick), message);
                        let _ = stderr.flush();
                        tick = tick.wrapping_add(1);
                    }
                    _ = &mut stop_rx => {
                        // Clear the indicator line
                        let _ = write!(stderr, "\r\x1b[2K");
                        let _ = stderr.flush();
                        break;
                    }
                }
            }
        });

        Self { stop_tx, handle }
    }

    /// Stop the animation and wait for the line to be cleared
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(frame(0), "⠋");
        assert_eq!(frame(9), "⠏");
        assert_eq!(frame(10), "⠋");
    }

    #[tokio::test]
    async fn test_disabled_spinner_stops() {
        let spinner = Spinner::start("Processing".to_string(), false);
        spinner.stop().await;
    }
}
