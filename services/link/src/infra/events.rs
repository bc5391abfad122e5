use tokio::sync::broadcast;

use crate::domain::repository::EventSink;
use crate::domain::types::LinkEvent;

/// Broadcast buffer size. Slow subscribers lose old events rather than
/// ever blocking a publisher.
const EVENT_BUFFER: usize = 64;

/// Fan-out sink feeding real-time account link/unlink updates to connected
/// web clients. Publishing with no subscribers is a no-op.
#[derive(Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<LinkEvent>,
}

impl BroadcastEventSink {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: LinkEvent) {
        // send only errors when nobody is subscribed
        let _ = self.tx.send(event);
    }
}
