//! Double-buffered generation kernels.
//!
//! Every kernel reads only from `current` and writes only to `next`, so each
//! rule evaluation sees generation N regardless of evaluation order. The
//! caller commits by swapping the buffers once the kernel returns `Ok`.

use rayon::prelude::*;

use super::grid::{CellState, Grid};
use super::neighborhood::{block_origin, extract_block, extract_moore, write_block, Block};
use super::rule::{BlockRule, CellRule};
use crate::error::StepError;

/// Compute the next generation under the normal (3x3) topology.
///
/// Rows are evaluated in parallel on the current rayon pool. On error `next`
/// holds a partial result and must not be committed.
pub fn step_cells<C: CellState>(
    current: &Grid<C>,
    next: &mut Grid<C>,
    rule: &dyn CellRule<C>,
) -> Result<(), StepError> {
    debug_assert_eq!(current.shape(), next.shape());
    let width = current.width();
    if width == 0 {
        return Ok(());
    }

    next.cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let window = extract_moore(current, x as isize, y as isize);
                *cell = rule
                    .next_state(&window)
                    .map_err(|source| StepError::Rule { x, y, source })?;
            }
            Ok(())
        })
}

/// Compute the next generation under the Margolus (2x2 block) topology.
///
/// Blocks are evaluated in parallel against `current`, then scattered into
/// `next`. Width and height must be even so the blocks tile the grid.
pub fn step_blocks<C: CellState>(
    current: &Grid<C>,
    next: &mut Grid<C>,
    rule: &dyn BlockRule<C>,
    parity: u8,
) -> Result<(), StepError> {
    debug_assert_eq!(current.shape(), next.shape());
    let (width, height) = current.shape();
    let blocks_x = width / 2;
    let blocks_y = height / 2;

    let blocks: Vec<((usize, usize), Block<C>)> = (0..blocks_x * blocks_y)
        .into_par_iter()
        .map(|i| {
            let (x, y) = block_origin(i % blocks_x, i / blocks_x, parity, width, height);
            let block = extract_block(current, x as isize, y as isize);
            rule.next_block(&block)
                .map(|out| ((x, y), out))
                .map_err(|source| StepError::Rule { x, y, source })
        })
        .collect::<Result<Vec<_>, StepError>>()?;

    for ((x, y), block) in &blocks {
        write_block(next, *x, *y, block);
    }
    Ok(())
}
