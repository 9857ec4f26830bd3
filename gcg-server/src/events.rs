//! Typed data-change notifications. Mutating handlers publish here; any
//! number of subscribers (tests, a future SSE feed) receive the fan-out.
//! Replaces the ad-hoc window-event names the legacy frontend listened on.

use tokio::sync::broadcast;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataEvent {
    FileUploaded { tahun: Option<i32> },
    DocumentsUpdated { tahun: Option<i32> },
    ChecklistUpdated { tahun: Option<i32> },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DataEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Fire-and-forget: delivery to zero subscribers is not an error, and a
    /// lagging subscriber just drops old events.
    pub fn publish(&self, event: DataEvent) {
        tracing::debug!(?event, "data event");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
