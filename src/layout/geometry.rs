use crate::layout::grid_plan::{focus_plan, grid_plan};
use crate::layout::orientation::Orientation;
use crate::layout::view_mode::ViewMode;

/// Primary-band share of the long axis in focus mode.
const FOCUS_PRIMARY_LANDSCAPE_PCT: f64 = 85.0;
const FOCUS_PRIMARY_PORTRAIT_PCT: f64 = 80.0;

/// Placement of one tile, in percent of the container on both axes.
/// Origin is the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFrame {
    pub x_pct: f64,
    pub y_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Frames for `tile_count` tiles in presentation order.
///
/// Pure: same inputs, same frames, which is what makes reflow idempotent.
/// In focus mode index 0 is the primary tile.
#[must_use]
pub fn layout_tiles(mode: ViewMode, orientation: Orientation, tile_count: usize) -> Vec<TileFrame> {
    match mode {
        ViewMode::Grid => grid_frames(orientation, tile_count),
        ViewMode::Focus => focus_frames(orientation, tile_count),
    }
}

/// Balanced grid: equal bands, equal cells within a band, short bands
/// centered by shifting them half the missing width.
fn grid_frames(orientation: Orientation, tile_count: usize) -> Vec<TileFrame> {
    let plan = grid_plan(tile_count);
    let mut frames = Vec::with_capacity(tile_count);

    let Some(widest) = plan.per_row.iter().copied().max().filter(|w| *w > 0) else {
        return frames;
    };
    let cell = 100.0 / widest as f64;
    let band = 100.0 / plan.rows as f64;

    for (row, &count) in plan.per_row.iter().enumerate() {
        let centering = cell * (widest - count) as f64 / 2.0;
        for slot in 0..count {
            let along = centering + slot as f64 * cell;
            let across = row as f64 * band;
            frames.push(match orientation {
                Orientation::Landscape => TileFrame {
                    x_pct: along,
                    y_pct: across,
                    width_pct: cell,
                    height_pct: band,
                },
                Orientation::Portrait => TileFrame {
                    x_pct: across,
                    y_pct: along,
                    width_pct: band,
                    height_pct: cell,
                },
            });
        }
    }
    frames
}

/// Focus: the primary tile spans the full cross axis and most of the long
/// axis; the rest share the remaining strip evenly.
fn focus_frames(orientation: Orientation, tile_count: usize) -> Vec<TileFrame> {
    let plan = focus_plan(tile_count);
    let mut frames = Vec::with_capacity(tile_count);
    if tile_count == 0 {
        return frames;
    }

    let primary = match orientation {
        Orientation::Landscape => FOCUS_PRIMARY_LANDSCAPE_PCT,
        Orientation::Portrait => FOCUS_PRIMARY_PORTRAIT_PCT,
    };
    frames.push(match orientation {
        Orientation::Landscape => TileFrame {
            x_pct: 0.0,
            y_pct: 0.0,
            width_pct: 100.0,
            height_pct: primary,
        },
        Orientation::Portrait => TileFrame {
            x_pct: 0.0,
            y_pct: 0.0,
            width_pct: primary,
            height_pct: 100.0,
        },
    });

    let strip_count = plan.per_row[1];
    if strip_count == 0 {
        return frames;
    }
    let cell = 100.0 / strip_count as f64;
    let strip = 100.0 - primary;
    for slot in 0..strip_count {
        let along = slot as f64 * cell;
        frames.push(match orientation {
            Orientation::Landscape => TileFrame {
                x_pct: along,
                y_pct: primary,
                width_pct: cell,
                height_pct: strip,
            },
            Orientation::Portrait => TileFrame {
                x_pct: primary,
                y_pct: along,
                width_pct: strip,
                height_pct: cell,
            },
        });
    }
    frames
}
