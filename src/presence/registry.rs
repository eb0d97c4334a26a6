use std::collections::HashMap;

use crate::presence::participant::Participant;
use crate::transport::PeerId;

/// Tracks every active participant of the session, self included.
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    by_peer: HashMap<PeerId, Participant>,
    self_id: Option<PeerId>,
}

impl ParticipantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the local participant and remembers its id for the
    /// self-echo checks.
    pub fn insert_self(&mut self, participant: Participant) {
        self.self_id = Some(participant.peer_id.clone());
        self.by_peer.insert(participant.peer_id.clone(), participant);
    }

    pub fn insert(&mut self, participant: Participant) {
        self.by_peer.insert(participant.peer_id.clone(), participant);
    }

    /// Removes a participant; returns it so the caller can release its
    /// color token.
    pub fn remove(&mut self, peer: &PeerId) -> Option<Participant> {
        self.by_peer.remove(peer)
    }

    #[must_use]
    pub fn get(&self, peer: &PeerId) -> Option<&Participant> {
        self.by_peer.get(peer)
    }

    pub fn get_mut(&mut self, peer: &PeerId) -> Option<&mut Participant> {
        self.by_peer.get_mut(peer)
    }

    #[must_use]
    pub fn contains(&self, peer: &PeerId) -> bool {
        self.by_peer.contains_key(peer)
    }

    #[must_use]
    pub fn self_id(&self) -> Option<&PeerId> {
        self.self_id.as_ref()
    }

    #[must_use]
    pub fn is_self(&self, peer: &PeerId) -> bool {
        self.self_id.as_ref() == Some(peer)
    }

    #[must_use]
    pub fn self_participant(&self) -> Option<&Participant> {
        self.self_id.as_ref().and_then(|id| self.by_peer.get(id))
    }

    pub fn self_participant_mut(&mut self) -> Option<&mut Participant> {
        let id = self.self_id.clone()?;
        self.by_peer.get_mut(&id)
    }

    /// Number of active participants, self included. This is the count
    /// the room ceiling is checked against.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_peer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_peer.is_empty()
    }

    #[must_use]
    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.by_peer.keys().cloned().collect()
    }
}
