use crate::models::quiz_stats::QuizStats;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Publish/subscribe channel for quiz progress and completion events.
///
/// Subscribers live as long as their receiver; once every `QuizEventBus`
/// clone is dropped, pending receivers drain and then see the channel close.
#[derive(Clone)]
pub struct QuizEventBus {
    tx: broadcast::Sender<QuizStats>,
}

impl Default for QuizEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QuizStats> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: QuizStats) -> usize {
        match self.tx.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!("quiz event published with no subscribers");
                0
            }
        }
    }
}
