mod dashboard;
mod geometry;
mod grid_plan;
mod orientation;
mod tile;
mod view_mode;

pub use dashboard::{Dashboard, TilePlacement};
pub use geometry::{TileFrame, layout_tiles};
pub use grid_plan::{GridPlan, MAX_GRID_TILES, MAX_ROW_WIDTH, focus_plan, grid_plan};
pub use orientation::Orientation;
pub use tile::{Tile, TileId};
pub use view_mode::ViewMode;
