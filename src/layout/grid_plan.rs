/// Widest row the grid ever uses; also caps the balanced fallback below.
pub const MAX_ROW_WIDTH: usize = 5;

/// Largest tile count the curated table covers. Room admission keeps the
/// live count at or below this.
pub const MAX_GRID_TILES: usize = 15;

/// Row structure for one tile count: how many bands, and how many tiles
/// in each. `rows == per_row.len()` always.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlan {
    pub rows: usize,
    pub per_row: Vec<usize>,
}

/// Grid-mode plan for `tile_count` participants.
///
/// Counts up to [`MAX_GRID_TILES`] come from a curated table whose shapes
/// were picked by eye rather than by formula (note 10 and 11 disagree on
/// where the heavy row sits); past the table a balanced arrangement keeps
/// the function total.
#[must_use]
pub fn grid_plan(tile_count: usize) -> GridPlan {
    let (rows, per_row): (usize, &[usize]) = match tile_count {
        0 => (0, &[]),
        1 => (1, &[1]),
        2 => (1, &[2]),
        3 => (1, &[3]),
        4 => (2, &[2, 2]),
        5 => (2, &[2, 3]),
        6 => (2, &[3, 3]),
        7 => (2, &[3, 4]),
        8 => (2, &[4, 4]),
        9 => (3, &[3, 3, 3]),
        10 => (3, &[3, 4, 3]),
        11 => (3, &[4, 3, 4]),
        12 => (3, &[4, 4, 4]),
        13 => (3, &[4, 5, 4]),
        14 => (3, &[5, 4, 5]),
        15 => (3, &[5, 5, 5]),
        n => return balanced_plan(n),
    };
    GridPlan {
        rows,
        per_row: per_row.to_vec(),
    }
}

/// Focus-mode plan: one primary band plus a strip holding everyone else.
/// An empty room keeps the two-band shape with zero tiles in each.
#[must_use]
pub fn focus_plan(tile_count: usize) -> GridPlan {
    if tile_count == 0 {
        return GridPlan {
            rows: 2,
            per_row: vec![0, 0],
        };
    }
    GridPlan {
        rows: 2,
        per_row: vec![1, tile_count - 1],
    }
}

/// Deterministic extension past the table: rows at most `MAX_ROW_WIDTH`
/// wide, counts within one of each other, an odd leftover bumping the
/// middle row and even leftovers landing on the outermost pairs (the same
/// shapes the table uses for 10 through 14).
fn balanced_plan(tile_count: usize) -> GridPlan {
    let rows = tile_count.div_ceil(MAX_ROW_WIDTH);
    let base = tile_count / rows;
    let mut per_row = vec![base; rows];
    let mut extra = tile_count % rows;

    if extra % 2 == 1 {
        per_row[rows / 2] += 1;
        extra -= 1;
    }
    let mut lo = 0;
    let mut hi = rows - 1;
    while extra >= 2 && lo < hi {
        per_row[lo] += 1;
        per_row[hi] += 1;
        extra -= 2;
        lo += 1;
        hi -= 1;
    }

    GridPlan { rows, per_row }
}
