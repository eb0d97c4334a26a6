use crate::color::ColorToken;
use crate::layout::{TileId, TilePlacement};
use crate::transport::{DeviceKind, PeerId};

/// User-visible error surface.
///
/// `content` is HTML in the dialog idiom of the embedding page; untrusted
/// text interpolated into it has been escaped. `force_refresh` marks
/// conditions the session cannot continue from, where the only remedy
/// offered is reloading the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub content: String,
    pub force_refresh: bool,
}

/// Everything the embedder needs to repaint, drained through
/// [`RoomController::poll`](crate::room::RoomController::poll) in the
/// order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Session established; the mirrored self tile exists.
    Joined {
        peer: PeerId,
        tile: TileId,
        color: ColorToken,
    },
    /// A remote participant went active. Any device state it announced
    /// before its stream arrived follows as `MediaChanged` events.
    PeerAdded {
        peer: PeerId,
        tile: TileId,
        display_name: String,
        color: ColorToken,
    },
    /// A remote participant left; its tile is already gone.
    PeerRemoved { peer: PeerId, tile: TileId },
    /// A remote participant's device state changed (live or replayed).
    MediaChanged {
        peer: PeerId,
        device: DeviceKind,
        enabled: bool,
    },
    /// A local device state changed: self toggle or an honored remote
    /// mute request.
    SelfMediaChanged { device: DeviceKind, enabled: bool },
    /// A remote activity signal bounced that peer's indicator to `level`.
    MeterBounced { peer: PeerId, level: f64 },
    /// Geometry changed; repaint every tile from these placements.
    LayoutChanged { placements: Vec<TilePlacement> },
    /// Something went wrong that the user should see.
    Notice(ErrorNotice),
    /// Session torn down by `leave`.
    Left,
}
