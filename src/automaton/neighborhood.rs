//! Neighborhood extraction with toroidal wraparound.
//!
//! Two topologies are supported:
//! - `Normal`: the 3x3 Moore window centred on a cell
//! - `Margolus`: 2x2 blocks whose origin shifts by (1, 1) on odd parity

use std::fmt;
use std::str::FromStr;

use super::grid::{CellState, Grid};
use crate::error::ConfigError;

/// 3x3 window indexed `[dy + 1][dx + 1]`; the focus cell is `[1][1]`.
pub type Window3<C> = [[C; 3]; 3];

/// 2x2 block indexed `[row][col]`; the block origin is `[0][0]`.
pub type Block<C> = [[C; 2]; 2];

/// Neighborhood topology, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Normal,
    Margolus,
}

impl Topology {
    pub fn name(self) -> &'static str {
        match self {
            Topology::Normal => "normal",
            Topology::Margolus => "margolus",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "moore" => Ok(Topology::Normal),
            "margolus" => Ok(Topology::Margolus),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// The values a rule reads for one focus location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window<C> {
    Moore(Window3<C>),
    Block(Block<C>),
}

/// Extract the window for `focus` under `topology`.
///
/// For `Normal`, `focus` is the centre cell and `parity` is ignored. For
/// `Margolus`, `focus` is the block index `(bx, by)`; the block's top-left
/// corner is placed by [`block_origin`] using `parity`.
pub fn extract<C: CellState>(
    grid: &Grid<C>,
    focus: (isize, isize),
    topology: Topology,
    parity: u8,
) -> Window<C> {
    match topology {
        Topology::Normal => Window::Moore(extract_moore(grid, focus.0, focus.1)),
        Topology::Margolus => {
            let (bx, by) = (
                focus.0.rem_euclid((grid.width() / 2).max(1) as isize) as usize,
                focus.1.rem_euclid((grid.height() / 2).max(1) as isize) as usize,
            );
            let (x, y) = block_origin(bx, by, parity, grid.width(), grid.height());
            Window::Block(extract_block(grid, x as isize, y as isize))
        }
    }
}

/// 3x3 window centred on `(x, y)`, wrapped on both axes.
#[inline]
pub fn extract_moore<C: CellState>(grid: &Grid<C>, x: isize, y: isize) -> Window3<C> {
    let (x, y) = grid.wrap(x, y);
    let (x, y) = (x as isize, y as isize);
    let mut window = [[C::default(); 3]; 3];
    for (row, dy) in (-1..=1).enumerate() {
        for (col, dx) in (-1..=1).enumerate() {
            window[row][col] = grid.get_wrapped(x + dx, y + dy);
        }
    }
    window
}

/// 2x2 block with top-left corner `(x, y)`, wrapped on both axes.
#[inline]
pub fn extract_block<C: CellState>(grid: &Grid<C>, x: isize, y: isize) -> Block<C> {
    let (x, y) = grid.wrap(x, y);
    let (x, y) = (x as isize, y as isize);
    [
        [grid.get_wrapped(x, y), grid.get_wrapped(x + 1, y)],
        [grid.get_wrapped(x, y + 1), grid.get_wrapped(x + 1, y + 1)],
    ]
}

/// Top-left corner of Margolus block `(bx, by)` for the given parity.
#[inline]
pub fn block_origin(bx: usize, by: usize, parity: u8, width: usize, height: usize) -> (usize, usize) {
    let shift = (parity & 1) as usize;
    ((2 * bx + shift) % width, (2 * by + shift) % height)
}

/// Write a 2x2 block back at `(x, y)`, wrapped on both axes.
pub fn write_block<C: CellState>(grid: &mut Grid<C>, x: usize, y: usize, block: &Block<C>) {
    let (x, y) = ((x % grid.width()) as isize, (y % grid.height()) as isize);
    grid.set_wrapped(x, y, block[0][0]);
    grid.set_wrapped(x + 1, y, block[0][1]);
    grid.set_wrapped(x, y + 1, block[1][0]);
    grid.set_wrapped(x + 1, y + 1, block[1][1]);
}
