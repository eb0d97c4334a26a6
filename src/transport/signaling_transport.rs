use serde_json::Value;

use crate::transport::{
    message_kind::MessageKind,
    peer_id::PeerId,
    transport_error::{ConnectError, DialError, MediaAcquireError, SendError},
    transport_event::TransportEvent,
    types::{ConnectStatus, Destination, DeviceKind, MediaConstraints, SessionHandle},
};

/// Abstract contract to the peer-to-peer media transport.
///
/// The real implementation owns signaling, ICE and stream plumbing; this
/// engine never sees any of that. Tests script the trait directly.
///
/// Call order during session establishment is fixed:
/// `acquire_local_media` → `connect` → (engine dials occupants). Events
/// produced at any point after `connect` starts must be buffered until the
/// engine drains them via [`poll_event`](Self::poll_event).
pub trait SignalingTransport {
    /// Media-init phase: capture local devices. Returns the constraints
    /// actually granted (a missing camera yields `video: false`).
    fn acquire_local_media(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<MediaConstraints, MediaAcquireError>;

    /// Connect to the signaling service and enter `room_name`.
    fn connect(&mut self, user_name: &str, room_name: &str)
    -> Result<SessionHandle, ConnectError>;

    /// Send one application message to a peer or to the whole room.
    fn send_message(
        &mut self,
        dest: Destination,
        kind: MessageKind,
        payload: Value,
    ) -> Result<(), SendError>;

    /// Drain one buffered lifecycle event, if any.
    fn poll_event(&mut self) -> Option<TransportEvent>;

    /// Initiate the media call to one existing occupant.
    fn dial(&mut self, peer: &PeerId) -> Result<(), DialError>;

    /// Enable or disable a local capture device at the media layer.
    fn set_device_enabled(&mut self, device: DeviceKind, enabled: bool);

    /// Human-readable name the peer registered with, if known.
    fn peer_display_name(&self, peer: &PeerId) -> Option<String>;

    /// Media connection state toward one peer.
    fn connect_status(&self, peer: &PeerId) -> ConnectStatus;

    /// Tear down every active media call.
    fn hang_up_all(&mut self);

    /// Leave the joined room (signaling level, calls already gone).
    fn leave_room(&mut self);

    /// Drop the signaling connection entirely.
    fn disconnect(&mut self);
}
