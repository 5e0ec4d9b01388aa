//! Tokio-backed scheduler
//!
//! Each scheduled timer is a spawned task that sleeps and posts its
//! event into the engine mailbox. Handles map to task join handles so
//! cancellation is an abort; cancelling a finished or unknown handle
//! does nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapter::{Event, Scheduler, TimerEvent, TimerHandle};

pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Event>,
    tasks: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl TokioScheduler {
    /// Must be constructed inside a tokio runtime; timers spawn onto
    /// the current runtime.
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            tx,
            tasks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn register(&self, task: JoinHandle<()>) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut tasks) = self.tasks.lock() {
            // Fired one-shots are never cancelled (the lobby timeout
            // drops its handle on purpose), so sweep them here to keep
            // the map bounded over a long-running process.
            tasks.retain(|_, t| !t.is_finished());
            tasks.insert(id, task);
        }
        TimerHandle(id)
    }

    #[cfg(test)]
    fn task_count(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or(0)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Event::Timer(event));
        });
        self.register(task)
    }

    fn schedule_repeating(
        &self,
        interval: Duration,
        first: Option<Duration>,
        event: TimerEvent,
    ) -> TimerHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut delay = first.unwrap_or(interval);
            loop {
                tokio::time::sleep(delay).await;
                if tx.send(Event::Timer(event.clone())).is_err() {
                    // Mailbox gone; the engine shut down.
                    return;
                }
                delay = interval;
            }
        });
        self.register(task)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Ok(mut tasks) = self.tasks.lock() {
            if let Some(task) = tasks.remove(&handle.0) {
                task.abort();
            }
        }
    }
}
