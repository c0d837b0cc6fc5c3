//! Per-participant dispatcher — one worker task and one FIFO queue per
//! participant id.
//!
//! Messages from the same participant are processed strictly in arrival
//! order; distinct participants proceed fully in parallel. Pacing sleeps
//! suspend only the owning worker.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::pipeline::MessageProcessor;

/// Routes inbound messages into per-participant worker queues.
pub struct Dispatcher {
    processor: Arc<MessageProcessor>,
    workers: Mutex<HashMap<String, mpsc::UnboundedSender<String>>>,
}

impl Dispatcher {
    pub fn new(processor: Arc<MessageProcessor>) -> Self {
        Self {
            processor,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// Enqueue a message for `participant_id`, spawning its worker on first
    /// contact. Returns as soon as the message is queued.
    pub async fn dispatch(&self, participant_id: &str, text: String) {
        let mut workers = self.workers.lock().await;

        let text = match workers.get(participant_id) {
            Some(tx) => match tx.send(text) {
                Ok(()) => return,
                // The worker died; replace it and re-enqueue.
                Err(mpsc::error::SendError(text)) => {
                    debug!(participant = participant_id, "Respawning participant worker");
                    text
                }
            },
            None => text,
        };

        workers.remove(participant_id);
        self.spawn_worker(&mut workers, participant_id, text);
    }

    fn spawn_worker(
        &self,
        workers: &mut HashMap<String, mpsc::UnboundedSender<String>>,
        participant_id: &str,
        first_message: String,
    ) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // Fresh channel with a live receiver: the send cannot fail.
        let _ = tx.send(first_message);
        workers.insert(participant_id.to_string(), tx);

        let processor = Arc::clone(&self.processor);
        let id = participant_id.to_string();
        tokio::spawn(async move {
            while let Some(text) = rx.recv().await {
                processor.handle_message(&id, &text).await;
            }
            debug!(participant = %id, "Participant worker stopped");
        });
    }

    /// Number of live participant workers.
    pub async fn worker_count(&self) -> usize {
        self.workers.lock().await.len()
    }
}
