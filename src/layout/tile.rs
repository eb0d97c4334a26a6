use crate::transport::PeerId;

/// Stable handle for one dashboard tile. Survives reordering; dies with
/// the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// One cell of the dashboard and its presentation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub peer: PeerId,
    /// Untrusted; escape before embedding in markup.
    pub display_name: String,
    /// The self tile renders mirrored and with its own audio muted.
    pub is_self: bool,
    /// Local-only mute of this tile's audio; never touches the network
    /// and never applies to the self tile.
    pub locally_muted: bool,
}
