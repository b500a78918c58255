//! Core automaton logic and grid operations.
//!
//! This module contains the grid, neighborhood extraction, rules, the
//! double-buffered stepping kernels and the engine that drives them.
//! The FFI layer in `ffi/` calls into `Engine`.

pub mod engine;
pub mod grid;
pub mod neighborhood;
pub mod patterns;
pub mod region;
pub mod rule;
pub mod stepping;

pub use engine::{validate_dimensions, Engine};
pub use grid::{CellState, Grid};
pub use neighborhood::{
    block_origin, extract, extract_block, extract_moore, Block, Topology, Window, Window3,
};
pub use patterns::{Pattern, PATTERNS};
pub use region::{extract_region, import_region};
pub use rule::{BlockRule, CellRule, LifeRule, Rule, SingleRotation};
pub use stepping::{step_blocks, step_cells};
