use serde::{Deserialize, Serialize};

use crate::transport::peer_id::PeerId;

/// Which local capture device an operation refers to.
///
/// Serializes to the wire spelling (`"camera"` / `"mic"`) used inside
/// media-presence payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Camera,
    Mic,
}

/// Media the engine asks the transport to capture at init time.
///
/// The transport answers with the constraints it actually granted, which
/// lets a machine without a camera still join audio-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

/// Returned by a successful `connect`; identifies the local caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub self_id: PeerId,
}

/// Where a message goes: exactly one peer, or every occupant of the joined
/// room. Made an enum so "both set" and "neither set" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Peer(PeerId),
    Room,
}

/// Per-peer media connection state, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStatus {
    NotConnected,
    BecomingConnected,
    IsConnected,
}
