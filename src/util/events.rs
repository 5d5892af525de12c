//! Demand change notifications.
//!
//! Mutations on the demand collection publish a coarse "something changed,
//! re-fetch" signal rather than a diff; subscribers (the SSE endpoint) hand
//! it to clients as a trigger to re-run their load sequence. Best effort: a
//! dropped notification only delays visibility until the next manual reload.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandChangeAction {
    Created,
    Closed,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemandChange {
    pub action: DemandChangeAction,
    pub id: i64,
}

pub struct DemandEvents {
    sender: broadcast::Sender<DemandChange>,
}

impl DemandEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        DemandEvents { sender }
    }

    /// Publish a change; a send with no live subscribers is not an error.
    pub fn publish(&self, change: DemandChange) {
        match self.sender.send(change) {
            Ok(receivers) => debug!("Demand change {:?} delivered to {} subscribers", change, receivers),
            Err(_) => debug!("Demand change {:?} published with no subscribers", change),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DemandChange> {
        self.sender.subscribe()
    }
}

impl Default for DemandEvents {
    fn default() -> Self {
        DemandEvents::new(64)
    }
}
