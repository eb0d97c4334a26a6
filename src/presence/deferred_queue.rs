use std::collections::{HashMap, VecDeque};

use crate::presence::media_state::PresenceUpdate;
use crate::transport::PeerId;

/// Presence updates that raced ahead of their peer's stream.
///
/// State messages can arrive before the stream-accepted event for the
/// same peer; they are held here per peer, strictly FIFO, and drained the
/// moment the participant exists. A key only lives while no participant
/// for that peer does.
#[derive(Debug, Default)]
pub struct DeferredPresenceQueue {
    pending: HashMap<PeerId, VecDeque<PresenceUpdate>>,
}

impl DeferredPresenceQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, peer: PeerId, update: PresenceUpdate) {
        self.pending.entry(peer).or_default().push_back(update);
    }

    /// Removes the peer's entry and returns its updates in arrival order.
    /// Empty if nothing was queued.
    pub fn drain(&mut self, peer: &PeerId) -> VecDeque<PresenceUpdate> {
        self.pending.remove(peer).unwrap_or_default()
    }

    /// Drops whatever is queued for a departing peer; returns how many
    /// updates were thrown away so the caller can log it.
    pub fn discard(&mut self, peer: &PeerId) -> usize {
        self.pending.remove(peer).map_or(0, |q| q.len())
    }

    #[must_use]
    pub fn has_pending(&self, peer: &PeerId) -> bool {
        self.pending.contains_key(peer)
    }

    #[must_use]
    pub fn pending_count(&self, peer: &PeerId) -> usize {
        self.pending.get(peer).map_or(0, VecDeque::len)
    }
}
