#![allow(dead_code)]

//! Debounced autosave: edits are buffered and persisted after a quiet
//! period, with an immediate forced save on explicit user action. Signals
//! arriving while a save is pending restart the timer, so a burst of edits
//! coalesces into one write.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// Default quiet period between the last edit and the persist call.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(2);

enum SaveSignal {
    Edit,
    Flush,
}

/// Handle to a background autosave task.
///
/// Dropping the handle closes the channel; a still-pending save runs once
/// before the task exits, so buffered edits are not lost on teardown.
pub struct Autosaver {
    tx: mpsc::UnboundedSender<SaveSignal>,
}

impl Autosaver {
    /// Spawns the autosave task. `save` is invoked once per coalesced burst
    /// of edits, after `quiet_period` of inactivity.
    pub fn spawn<F, Fut>(quiet_period: Duration, mut save: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut pending = false;
            loop {
                if pending {
                    tokio::select! {
                        signal = rx.recv() => match signal {
                            // A fresh edit restarts the quiet period.
                            Some(SaveSignal::Edit) => {}
                            Some(SaveSignal::Flush) => {
                                save().await;
                                pending = false;
                            }
                            None => {
                                save().await;
                                break;
                            }
                        },
                        _ = tokio::time::sleep(quiet_period) => {
                            debug!("Autosave quiet period elapsed, persisting");
                            save().await;
                            pending = false;
                        }
                    }
                } else {
                    match rx.recv().await {
                        Some(SaveSignal::Edit) => pending = true,
                        // Nothing buffered; a flush has no work to do.
                        Some(SaveSignal::Flush) => {}
                        None => break,
                    }
                }
            }
        });

        Self { tx }
    }

    /// Records an edit. The save fires after the quiet period unless another
    /// edit arrives first.
    pub fn notify_edit(&self) {
        let _ = self.tx.send(SaveSignal::Edit);
    }

    /// Forces an immediate save of any buffered edits.
    pub fn flush(&self) {
        let _ = self.tx.send(SaveSignal::Flush);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counting_saver(quiet: Duration) -> (Autosaver, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let saves = Arc::clone(&counter);
        let autosaver = Autosaver::spawn(quiet, move || {
            let saves = Arc::clone(&saves);
            async move {
                saves.fetch_add(1, Ordering::SeqCst);
            }
        });
        (autosaver, counter)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_coalesces_into_one_save() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(2));

        autosaver.notify_edit();
        autosaver.notify_edit();
        autosaver.notify_edit();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_restarts_quiet_period() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(2));

        autosaver.notify_edit();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 0);

        // Second edit inside the quiet period pushes the save out again.
        autosaver.notify_edit();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(60));

        autosaver.notify_edit();
        autosaver.flush();

        // No timer involvement: the flush path saves on receipt.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_edits_is_a_noop() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(1));

        autosaver.flush();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_persists_pending_edits() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(60));

        autosaver.notify_edit();
        drop(autosaver);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_save_separately() {
        let (autosaver, saves) = counting_saver(Duration::from_secs(2));

        autosaver.notify_edit();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 1);

        autosaver.notify_edit();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(saves.load(Ordering::SeqCst), 2);
    }
}
