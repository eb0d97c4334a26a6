use std::collections::HashMap;

use crate::layout::geometry::{TileFrame, layout_tiles};
use crate::layout::orientation::Orientation;
use crate::layout::tile::{Tile, TileId};
use crate::layout::view_mode::ViewMode;
use crate::transport::PeerId;

/// One tile plus where it currently goes.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub tile: TileId,
    pub frame: TileFrame,
}

/// Ordered tile list plus the lookup index from peer to tile.
///
/// Order is presentation order: index 0 is the focus-mode primary. Peers
/// are found through the index, never through back-references stored on
/// participants.
#[derive(Debug)]
pub struct Dashboard {
    tiles: Vec<Tile>,
    by_peer: HashMap<PeerId, TileId>,
    next_tile: u64,
    mode: ViewMode,
    orientation: Orientation,
}

impl Dashboard {
    #[must_use]
    pub fn new(mode: ViewMode) -> Self {
        Self {
            tiles: Vec::new(),
            by_peer: HashMap::new(),
            next_tile: 0,
            mode,
            orientation: Orientation::Landscape,
        }
    }

    /// Appends a tile for `peer` and indexes it. The caller guarantees the
    /// peer has no tile yet.
    pub fn add_tile(&mut self, peer: PeerId, display_name: String, is_self: bool) -> TileId {
        let id = TileId(self.next_tile);
        self.next_tile += 1;
        self.by_peer.insert(peer.clone(), id);
        self.tiles.push(Tile {
            id,
            peer,
            display_name,
            is_self,
            locally_muted: false,
        });
        id
    }

    /// Removes the tile bound to `peer`, if any, and returns it.
    pub fn remove_peer_tile(&mut self, peer: &PeerId) -> Option<Tile> {
        let id = self.by_peer.remove(peer)?;
        let idx = self.tiles.iter().position(|t| t.id == id)?;
        Some(self.tiles.remove(idx))
    }

    #[must_use]
    pub fn tile_for_peer(&self, peer: &PeerId) -> Option<TileId> {
        self.by_peer.get(peer).copied()
    }

    #[must_use]
    pub fn peer_for_tile(&self, tile: TileId) -> Option<&PeerId> {
        self.tiles.iter().find(|t| t.id == tile).map(|t| &t.peer)
    }

    /// Click handling: in focus mode a non-primary tile moves to the
    /// front. Returns whether the order changed (primary clicks and grid
    /// mode are no-ops).
    pub fn click_tile(&mut self, tile: TileId) -> bool {
        if self.mode != ViewMode::Focus {
            return false;
        }
        match self.tiles.iter().position(|t| t.id == tile) {
            Some(idx) if idx > 0 => {
                let t = self.tiles.remove(idx);
                self.tiles.insert(0, t);
                true
            }
            _ => false,
        }
    }

    /// Local-only audio mute for one tile. Rejected for the self tile and
    /// for unknown tiles.
    pub fn set_locally_muted(&mut self, tile: TileId, muted: bool) -> bool {
        match self.tiles.iter_mut().find(|t| t.id == tile) {
            Some(t) if !t.is_self => {
                t.locally_muted = muted;
                true
            }
            _ => false,
        }
    }

    /// Switches presentation mode. Returns whether it actually changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Reclassifies orientation from the container size. Returns whether
    /// it flipped.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let orientation = Orientation::from_container(width, height);
        if self.orientation == orientation {
            return false;
        }
        self.orientation = orientation;
        true
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Current geometry, one placement per tile in presentation order.
    #[must_use]
    pub fn placements(&self) -> Vec<TilePlacement> {
        let frames = layout_tiles(self.mode, self.orientation, self.tiles.len());
        self.tiles
            .iter()
            .zip(frames)
            .map(|(tile, frame)| TilePlacement {
                tile: tile.id,
                frame,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn dashboard_with(names: &[&str]) -> Dashboard {
        let mut dash = Dashboard::new(ViewMode::Focus);
        for (i, name) in names.iter().enumerate() {
            dash.add_tile(PeerId::from(format!("p{i}").as_str()), (*name).to_string(), i == 0);
        }
        dash
    }

    #[test]
    fn add_and_remove_keep_the_index_consistent() {
        let mut dash = dashboard_with(&["me", "ana", "bo"]);
        let ana = PeerId::from("p1");

        let tile = dash.tile_for_peer(&ana).expect("ana has a tile");
        assert_eq!(dash.peer_for_tile(tile), Some(&ana));

        let removed = dash.remove_peer_tile(&ana).expect("removal succeeds");
        assert_eq!(removed.display_name, "ana");
        assert_eq!(dash.tile_for_peer(&ana), None);
        assert_eq!(dash.len(), 2);
        // Second removal is a clean miss.
        assert!(dash.remove_peer_tile(&ana).is_none());
    }

    #[test]
    fn clicking_a_strip_tile_promotes_it_to_primary() {
        let mut dash = dashboard_with(&["me", "ana", "bo"]);
        let bo = dash.tile_for_peer(&PeerId::from("p2")).unwrap();

        assert!(dash.click_tile(bo));
        assert_eq!(dash.tiles()[0].display_name, "bo");
        assert_eq!(dash.tiles()[1].display_name, "me");
    }

    #[test]
    fn clicking_the_primary_tile_changes_nothing() {
        let mut dash = dashboard_with(&["me", "ana"]);
        let primary = dash.tiles()[0].id;

        assert!(!dash.click_tile(primary));
        assert_eq!(dash.tiles()[0].display_name, "me");
    }

    #[test]
    fn clicks_are_ignored_in_grid_mode() {
        let mut dash = dashboard_with(&["me", "ana", "bo"]);
        dash.set_mode(ViewMode::Grid);
        let bo = dash.tile_for_peer(&PeerId::from("p2")).unwrap();

        assert!(!dash.click_tile(bo));
        assert_eq!(dash.tiles()[0].display_name, "me");
    }

    #[test]
    fn local_mute_skips_the_self_tile() {
        let mut dash = dashboard_with(&["me", "ana"]);
        let own = dash.tiles()[0].id;
        let ana = dash.tiles()[1].id;

        assert!(!dash.set_locally_muted(own, true));
        assert!(dash.set_locally_muted(ana, true));
        assert!(dash.tiles()[1].locally_muted);
        assert!(!dash.set_locally_muted(TileId(999), true));
    }

    #[test]
    fn placements_follow_presentation_order() {
        let mut dash = dashboard_with(&["me", "ana", "bo"]);
        let bo = dash.tile_for_peer(&PeerId::from("p2")).unwrap();
        dash.click_tile(bo);

        let placements = dash.placements();
        assert_eq!(placements.len(), 3);
        // Promoted tile owns the primary frame.
        assert_eq!(placements[0].tile, bo);
        assert_eq!(placements[0].frame.width_pct, 100.0);
        assert_eq!(placements[0].frame.height_pct, 85.0);
    }

    #[test]
    fn resize_reports_orientation_flips_only() {
        let mut dash = dashboard_with(&["me"]);
        assert!(!dash.resize(1920.0, 1080.0));
        assert!(dash.resize(720.0, 1280.0));
        assert_eq!(dash.orientation(), Orientation::Portrait);
        assert!(!dash.resize(600.0, 800.0));
    }
}
