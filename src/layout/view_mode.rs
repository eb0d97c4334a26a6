/// How the dashboard arranges tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Every participant gets an equal cell of a balanced grid.
    Grid,
    /// One primary tile plus a thumbnail strip; clicking a thumbnail
    /// promotes it to primary.
    Focus,
}
