use serde_json::Value;

use crate::transport::peer_id::PeerId;

/// Lifecycle events the transport buffers for the engine.
///
/// Implementations must start buffering no later than `connect` so that
/// nothing emitted during session establishment is lost; the engine drains
/// the buffer through [`poll_event`](crate::transport::SignalingTransport::poll_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The current occupant list of the joined room (self excluded).
    /// Delivered at least once after join completes.
    Occupants { peers: Vec<PeerId> },
    /// A remote peer's media stream is now available.
    StreamAccepted { peer: PeerId },
    /// A remote peer's media stream has closed.
    StreamClosed { peer: PeerId },
    /// An application message from a peer. `kind` is left raw so unknown
    /// kinds reach the engine, which logs and drops them.
    PeerMessage {
        peer: PeerId,
        kind: String,
        payload: Value,
    },
    /// An out-of-band transport failure after the session was established.
    Fault { code: String, text: String },
}
