//! Background work queue and stale-request guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crossbeam::channel::{Sender, unbounded};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Single background thread draining a job queue in submission order.
///
/// Dropping the worker closes the queue; already-submitted jobs still run.
pub(crate) struct Worker {
    tx: Sender<Job>,
}

impl Worker {
    pub(crate) fn spawn(name: &str) -> Self {
        let (tx, rx) = unbounded::<Job>();
        thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                while let Ok(job) = rx.recv() {
                    job();
                }
            })
            .expect("failed to spawn cache worker thread");
        Self { tx }
    }

    pub(crate) fn submit(&self, job: impl FnOnce() + Send + 'static) {
        // Send only fails when the worker is gone, at which point the
        // queued work no longer matters.
        self.tx.send(Box::new(job)).ok();
    }

    /// Block until every previously submitted job has finished.
    pub(crate) fn flush(&self) {
        let (done_tx, done_rx) = unbounded::<()>();
        self.submit(move || {
            done_tx.send(()).ok();
        });
        done_rx.recv().ok();
    }
}

/// Freshness token for async requests from one caller context.
///
/// Each [`prepare_image`](crate::cache::ShareImageCache::prepare_image)
/// call advances the slot's generation; a result is delivered only if the
/// generation still matches when composition finishes. There is no
/// in-flight cancellation, only "caller no longer cares".
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    current: Arc<AtomicU64>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next generation for a new request.
    pub(crate) fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the most recent request.
    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.current.load(Ordering::SeqCst) == ticket
    }
}
