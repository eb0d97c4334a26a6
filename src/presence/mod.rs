mod deferred_queue;
mod media_state;
mod participant;
mod reconciler;
mod registry;

pub use deferred_queue::DeferredPresenceQueue;
pub use media_state::{MediaState, PresenceUpdate};
pub use participant::Participant;
pub use reconciler::{
    ClosedPeer, MicControlOutcome, PeerPhase, PresenceOutcome, on_mic_control,
    on_presence_message, on_self_toggle, on_stream_accepted, on_stream_closed, peer_phase,
};
pub use registry::ParticipantRegistry;
