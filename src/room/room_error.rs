use std::fmt;

use crate::transport::{ConnectError, MediaAcquireError};

/// Why `join` could not establish a session.
///
/// Each variant has already been surfaced to the embedder as a notice by
/// the time `join` returns; the error value exists for programmatic
/// callers.
#[derive(Debug)]
pub enum RoomError {
    /// Media-init phase failed; nothing was connected.
    MediaInit(MediaAcquireError),
    /// Service connect or room entry failed after media init.
    Connect(ConnectError),
    /// `join` on a controller that is already in a room.
    AlreadyJoined,
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::MediaInit(e) => write!(f, "media init failed: {e}"),
            RoomError::Connect(e) => write!(f, "session establishment failed: {e}"),
            RoomError::AlreadyJoined => write!(f, "already joined a room"),
        }
    }
}

impl std::error::Error for RoomError {}
