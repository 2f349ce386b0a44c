use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Turns keystrokes into stabilized queries.
///
/// Every [`Debouncer::push`] restarts the quiescence window and cancels the
/// timer of the previous input. Once the window elapses without new input the
/// trimmed value is sent on the channel returned by [`Debouncer::new`].
/// Dropping the debouncer cancels the pending timer.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            window,
            generation: Arc::default(),
            pending: None,
            sender,
        };
        (debouncer, receiver)
    }

    pub fn push(&mut self, raw: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel();

        let value = raw.trim().to_string();
        let latest = self.generation.clone();
        let sender = self.sender.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // a newer input may have arrived while this task was being woken up
            if latest.load(Ordering::SeqCst) == generation {
                let _ = sender.send(value);
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel();
    }
}
