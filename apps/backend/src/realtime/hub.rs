//! In-process event fan-out.

use tokio::sync::broadcast;
use tracing::trace;

use crate::realtime::protocol::EngineEvent;

/// Where the engine sends its events. Fire-and-forget: emitting never fails
/// the operation that produced the event.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

const DEFAULT_CAPACITY: usize = 1024;

/// Broadcast hub; every subscriber sees events in emission order.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventHub {
    fn emit(&self, event: EngineEvent) {
        // Err only means nobody is listening right now.
        if self.sender.send(event.clone()).is_err() {
            trace!(event = event.name(), "No subscribers for engine event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_order() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();
        hub.emit(EngineEvent::NumberDrawn {
            number: 1,
            round_id: 1,
        });
        hub.emit(EngineEvent::RoundEnded { round_id: 1 });

        assert_eq!(
            rx.recv().await.unwrap(),
            EngineEvent::NumberDrawn {
                number: 1,
                round_id: 1
            }
        );
        assert_eq!(rx.recv().await.unwrap(), EngineEvent::RoundEnded { round_id: 1 });
    }

    #[test]
    fn emit_without_subscribers_is_silent() {
        let hub = EventHub::new();
        assert_eq!(hub.subscriber_count(), 0);
        hub.emit(EngineEvent::RoundEnded { round_id: 9 });
    }
}
