//! Region extraction and import operations.

use super::grid::{CellState, Grid};

/// Clamp a rectangle to the grid. Returns `None` if it is empty afterwards.
fn clamp_region<C: CellState>(
    grid: &Grid<C>,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> Option<(usize, usize, usize, usize)> {
    let clamp = |v: i32, hi: usize| (v.max(0) as usize).min(hi);
    let min_x = clamp(min_x, grid.width());
    let min_y = clamp(min_y, grid.height());
    let max_x = clamp(max_x, grid.width());
    let max_y = clamp(max_y, grid.height());

    if min_x >= max_x || min_y >= max_y {
        return None;
    }
    Some((min_x, min_y, max_x, max_y))
}

/// Copy a rectangular region of the grid into a flat buffer.
///
/// # Layout
/// The buffer is filled row-major (y changes slowest, x fastest), matching
/// `import_region`. `max_*` bounds are exclusive and the rectangle is clamped
/// to the grid.
///
/// # Returns
/// Number of cells written, or 0 if the region is empty or `out_buf` is too
/// small.
pub fn extract_region<C: CellState>(
    grid: &Grid<C>,
    out_buf: &mut [C],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> usize {
    let Some((min_x, min_y, max_x, max_y)) = clamp_region(grid, min_x, min_y, max_x, max_y) else {
        return 0;
    };

    let width = max_x - min_x;
    let total_size = width * (max_y - min_y);
    if out_buf.len() < total_size {
        return 0;
    }

    for (row, y) in (min_y..max_y).enumerate() {
        let start = grid.index_of(min_x, y);
        out_buf[row * width..(row + 1) * width].copy_from_slice(&grid.cells()[start..start + width]);
    }

    total_size
}

/// Copy a flat buffer into a rectangular region of the grid.
///
/// # Layout
/// The buffer is read row-major, matching `extract_region`. Values are
/// stored as given; the caller decides what counts as alive.
///
/// # Returns
/// Number of cells read, or 0 if the region is empty or `in_buf` is too
/// short.
pub fn import_region<C: CellState>(
    grid: &mut Grid<C>,
    in_buf: &[C],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> usize {
    let Some((min_x, min_y, max_x, max_y)) = clamp_region(grid, min_x, min_y, max_x, max_y) else {
        return 0;
    };

    let width = max_x - min_x;
    let total_size = width * (max_y - min_y);
    if in_buf.len() < total_size {
        return 0;
    }

    for (row, y) in (min_y..max_y).enumerate() {
        let start = grid.index_of(min_x, y);
        grid.cells_mut()[start..start + width].copy_from_slice(&in_buf[row * width..(row + 1) * width]);
    }

    total_size
}
