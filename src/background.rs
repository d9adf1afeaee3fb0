//! One-shot work on a worker thread, collected by polling from the UI
//! thread.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::warn;

/// Called from the worker once its result is ready, typically to request
/// a repaint.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

pub fn noop_waker() -> Waker {
    Arc::new(|| {})
}

pub struct Background<T> {
    receiver: Option<Receiver<T>>,
    /// Delivered instead if the worker dies without sending.
    fallback: Option<T>,
}

impl<T: Send + 'static> Background<T> {
    pub fn spawn<F>(name: &str, waker: Waker, fallback: T, job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                // the receiver may already be gone if the app closed
                let _ = sender.send(job());
                waker();
            });
        if let Err(e) = spawned {
            warn!(worker = name, "could not start worker thread: {}", e);
        }

        Background {
            receiver: Some(receiver),
            fallback: Some(fallback),
        }
    }
}

impl<T> Background<T> {
    /// Nothing in flight.
    pub fn idle() -> Self {
        Background {
            receiver: None,
            fallback: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Returns the result once, the first time it is available.
    pub fn poll(&mut self) -> Option<T> {
        let receiver = self.receiver.as_ref()?;
        let outcome = match receiver.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                warn!("worker finished without a result");
                self.fallback.take()
            }
        };
        self.receiver = None;
        self.fallback = None;
        outcome
    }
}
