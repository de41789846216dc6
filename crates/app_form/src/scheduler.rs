//! Debounced recalculation
//!
//! Field edits arrive in bursts; recomputing a preview on every keystroke
//! is a recomputation storm. The scheduler coalesces a burst into a single
//! handler invocation after a quiescence window: each call cancels any
//! pending timer and re-arms it, so only the last input within the window
//! executes.
//!
//! A monotonic sequence counter backs the timer cancellation: an execution
//! whose sequence is no longer the latest is dropped even if its timer
//! somehow fired, so a superseded request can never overwrite a later
//! result. Teardown (drop or [`DebounceScheduler::cancel_pending`])
//! silently discards pending work; a timer firing after teardown is a
//! no-op, not an error.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;

/// Quiescence window for the live preview beside the form (field edits)
pub const PREVIEW_DEBOUNCE: Duration = Duration::from_millis(500);

/// Quiescence window for the debounced full recalculation path
///
/// Deliberately distinct from [`PREVIEW_DEBOUNCE`]; the two call sites are
/// tuned independently.
pub const RECALC_DEBOUNCE: Duration = Duration::from_millis(800);

type Handler<T> = Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Coalesces bursts of inputs into one handler call per quiescence window
pub struct DebounceScheduler<T> {
    delay: Duration,
    seq: Arc<AtomicU64>,
    pending: Mutex<Option<AbortHandle>>,
    handler: Handler<T>,
}

impl<T: Send + 'static> DebounceScheduler<T> {
    /// Creates a scheduler invoking `handler` after `delay` of quiescence
    pub fn new<F, Fut>(delay: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            seq: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            handler: Arc::new(move |input| Box::pin(handler(input))),
        }
    }

    /// Schedules `input`, superseding any pending invocation
    pub fn schedule(&self, input: T) {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let seq = Arc::clone(&self.seq);
        let handler = Arc::clone(&self.handler);
        let delay = self.delay;

        let task = tokio::spawn(async move {
            sleep(delay).await;
            // Latest-wins guard: a timer that outlived its supersession
            // must not execute.
            if seq.load(Ordering::SeqCst) != my_seq {
                tracing::trace!(my_seq, "superseded debounce tick dropped");
                return;
            }
            tracing::debug!(my_seq, "debounce window elapsed, invoking handler");
            handler(input).await;
        });

        let mut pending = self.pending.lock().expect("scheduler mutex poisoned");
        if let Some(previous) = pending.replace(task.abort_handle()) {
            previous.abort();
        }
    }

    /// Discards any pending invocation without running it
    pub fn cancel_pending(&self) {
        // Bump the sequence so an already-fired tick fails its guard too.
        self.seq.fetch_add(1, Ordering::SeqCst);
        let mut pending = self.pending.lock().expect("scheduler mutex poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
            tracing::debug!("pending debounce cancelled");
        }
    }
}

impl<T> Drop for DebounceScheduler<T> {
    fn drop(&mut self) {
        // Teardown cancels pending work silently.
        self.seq.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
