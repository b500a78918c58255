//! Named seed patterns.

use super::grid::{CellState, Grid};
use crate::error::ConfigError;

/// A set of live cells, relative to the pattern's top-left corner as `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Travels (+1, +1) every 4 generations under B3/S23.
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
};

pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, BLOCK, TOAD, BEACON];

impl Pattern {
    /// Look up a pattern by case-insensitive name.
    pub fn find(name: &str) -> Result<Pattern, ConfigError> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))
    }

    /// Write `value` into every cell of the pattern, offset by `(x, y)` and
    /// wrapped around the torus.
    pub fn place<C: CellState>(&self, grid: &mut Grid<C>, x: isize, y: isize, value: C) {
        let (x, y) = grid.wrap(x, y);
        let (x, y) = (x as isize, y as isize);
        for &(dx, dy) in self.cells {
            grid.set_wrapped(x + dx as isize, y + dy as isize, value);
        }
    }

    /// Absolute wrapped coordinates of the pattern at `(x, y)`, sorted
    /// row-major like [`Grid::alive_cells`].
    pub fn cells_at(&self, width: usize, height: usize, x: isize, y: isize) -> Vec<(usize, usize)> {
        let (x, y) = (x.rem_euclid(width as isize), y.rem_euclid(height as isize));
        let mut cells: Vec<(usize, usize)> = self
            .cells
            .iter()
            .map(|&(dx, dy)| {
                (
                    (x + dx as isize).rem_euclid(width as isize) as usize,
                    (y + dy as isize).rem_euclid(height as isize) as usize,
                )
            })
            .collect();
        cells.sort_by_key(|&(cx, cy)| (cy, cx));
        cells
    }
}
