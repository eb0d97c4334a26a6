//! Presence state machine.
//!
//! Maps transport lifecycle events onto a consistent per-peer view,
//! absorbing out-of-order delivery. Per peer the lifecycle is: unknown →
//! awaiting-stream (state messages queued) → active (participant exists) →
//! closed (participant gone). Closed keeps no state: peer ids are never
//! reused, so a message for a closed id simply starts a fresh cycle.
//!
//! These are free functions over state owned by the session controller;
//! they mutate exactly what they are handed and hold nothing themselves.
//! Transport sends, dashboard changes and logging stay with the caller.

use crate::presence::deferred_queue::DeferredPresenceQueue;
use crate::presence::media_state::PresenceUpdate;
use crate::presence::participant::Participant;
use crate::presence::registry::ParticipantRegistry;
use crate::transport::{DeviceKind, PeerId};

/// Where a peer currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerPhase {
    /// Never heard of; also what a closed peer returns to.
    Unknown,
    /// State messages seen, stream not yet accepted.
    AwaitingStream,
    /// Participant exists.
    Active,
}

#[must_use]
pub fn peer_phase(
    registry: &ParticipantRegistry,
    queue: &DeferredPresenceQueue,
    peer: &PeerId,
) -> PeerPhase {
    if registry.contains(peer) {
        PeerPhase::Active
    } else if queue.has_pending(peer) {
        PeerPhase::AwaitingStream
    } else {
        PeerPhase::Unknown
    }
}

/// What happened to one incoming `media-presence` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// Peer is active; its media state now reflects the update.
    Applied(PresenceUpdate),
    /// Peer has no stream yet; held for replay, never discarded.
    Deferred,
    /// Our own broadcast echoed back; dropped without touching state.
    SelfEcho,
}

/// Feeds one presence message through the state machine.
pub fn on_presence_message(
    registry: &mut ParticipantRegistry,
    queue: &mut DeferredPresenceQueue,
    from: &PeerId,
    update: PresenceUpdate,
) -> PresenceOutcome {
    if registry.is_self(from) {
        return PresenceOutcome::SelfEcho;
    }
    match registry.get_mut(from) {
        Some(participant) => {
            participant.media.set(update.device, update.enabled);
            PresenceOutcome::Applied(update)
        }
        None => {
            queue.push(from.clone(), update);
            PresenceOutcome::Deferred
        }
    }
}

/// Registers a newly streamed participant and replays whatever queued up
/// while its stream was pending. Returns the replayed updates in arrival
/// order, already applied to the participant's media state.
///
/// The caller has created the viewport and allocated the color before
/// this; replay is the last step, so queued updates land before any new
/// live message can.
pub fn on_stream_accepted(
    registry: &mut ParticipantRegistry,
    queue: &mut DeferredPresenceQueue,
    participant: Participant,
) -> Vec<PresenceUpdate> {
    let peer = participant.peer_id.clone();
    registry.insert(participant);

    let mut replayed = Vec::new();
    for update in queue.drain(&peer) {
        if let Some(p) = registry.get_mut(&peer) {
            p.media.set(update.device, update.enabled);
        }
        replayed.push(update);
    }
    replayed
}

/// A departed participant plus what was still queued for it.
#[derive(Debug)]
pub struct ClosedPeer {
    pub participant: Participant,
    /// Stale deferred updates dropped with it. Nonzero means something
    /// raced the close; worth a diagnostic, not an error.
    pub discarded_deferred: usize,
}

/// Tears down one peer on stream close. `None` when the peer was not
/// active (the caller logs and drops).
pub fn on_stream_closed(
    registry: &mut ParticipantRegistry,
    queue: &mut DeferredPresenceQueue,
    peer: &PeerId,
) -> Option<ClosedPeer> {
    let participant = registry.remove(peer)?;
    let discarded_deferred = queue.discard(peer);
    Some(ClosedPeer {
        participant,
        discarded_deferred,
    })
}

/// What one `mic-control` request amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicControlOutcome {
    /// Honored: disable the mic exactly as a local toggle would.
    ForceMute,
    /// Remote unmute is never honored.
    RejectedUnmute,
    /// Asked to mute an already muted mic; nothing to do.
    NoChange,
    /// Our own request echoed back; dropped.
    SelfEcho,
}

/// Applies the mute-only policy: peers other than self may force-mute an
/// enabled mic, and nothing else.
#[must_use]
pub fn on_mic_control(
    registry: &ParticipantRegistry,
    from: &PeerId,
    enabled: bool,
) -> MicControlOutcome {
    if registry.is_self(from) {
        return MicControlOutcome::SelfEcho;
    }
    if enabled {
        return MicControlOutcome::RejectedUnmute;
    }
    let mic_enabled = registry
        .self_participant()
        .is_none_or(|p| p.media.mic_enabled);
    if mic_enabled {
        MicControlOutcome::ForceMute
    } else {
        MicControlOutcome::NoChange
    }
}

/// Applies a local device toggle to the self participant. Returns the
/// update to broadcast, or `None` when nothing changed (or no session is
/// up yet).
pub fn on_self_toggle(
    registry: &mut ParticipantRegistry,
    device: DeviceKind,
    enabled: bool,
) -> Option<PresenceUpdate> {
    let me = registry.self_participant_mut()?;
    if me.media.get(device) == enabled {
        return None;
    }
    me.media.set(device, enabled);
    Some(PresenceUpdate { device, enabled })
}
