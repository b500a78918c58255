//! The automaton engine: owns both generation buffers and commits steps.
//!
//! Core invariant: `current` is only ever replaced by a whole-buffer swap
//! after a kernel has filled `next` without error. Readers holding
//! `current_view()` between steps see generation N in full, never a mix.

use log::{debug, warn};

use super::grid::{CellState, Grid};
use super::neighborhood::Topology;
use super::rule::Rule;
use super::stepping::{step_blocks, step_cells};
use crate::error::{ConfigError, StepError};

/// Check grid dimensions for a topology.
pub fn validate_dimensions(
    width: usize,
    height: usize,
    topology: Topology,
) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    // Coordinates are wrapped as isize, so the cell count has to fit there too
    match width.checked_mul(height) {
        Some(cells) if cells <= isize::MAX as usize => {}
        _ => return Err(ConfigError::InvalidDimensions { width, height }),
    }
    if topology == Topology::Margolus && (width % 2 != 0 || height % 2 != 0) {
        return Err(ConfigError::OddMargolusDimensions { width, height });
    }
    Ok(())
}

/// A 2D toroidal cellular automaton.
pub struct Engine<C: CellState> {
    /// Generation N, the only buffer readers see.
    current: Grid<C>,

    /// Scratch buffer for generation N+1.
    next: Grid<C>,

    rule: Rule<C>,
    topology: Topology,
    generation: u64,

    /// Margolus block alignment for the next step (0 = even, 1 = odd).
    parity: u8,

    thread_pool: rayon::ThreadPool,
}

impl<C: CellState> Engine<C> {
    /// Create an engine with an all-dead grid.
    ///
    /// `num_threads == 0` is treated as 1.
    pub fn new(
        width: usize,
        height: usize,
        topology: Topology,
        rule: Rule<C>,
        num_threads: usize,
    ) -> Result<Self, ConfigError> {
        validate_dimensions(width, height, topology)?;
        rule.check_topology(topology)?;

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .build()?;

        Ok(Engine {
            current: Grid::new(width, height),
            next: Grid::new(width, height),
            rule,
            topology,
            generation: 0,
            parity: 0,
            thread_pool,
        })
    }

    /// Create an engine and seed it in one go.
    pub fn with_grid(
        grid: Grid<C>,
        topology: Topology,
        rule: Rule<C>,
        num_threads: usize,
    ) -> Result<Self, ConfigError> {
        let mut engine = Self::new(grid.width(), grid.height(), topology, rule, num_threads)?;
        engine.seed(grid)?;
        Ok(engine)
    }

    /// Replace the initial grid. Only valid before the first step.
    pub fn seed(&mut self, grid: Grid<C>) -> Result<(), ConfigError> {
        let target = self.seed_mut()?;
        if grid.shape() != target.shape() {
            return Err(ConfigError::SeedShapeMismatch {
                expected: target.shape(),
                got: grid.shape(),
            });
        }
        *target = grid;
        Ok(())
    }

    /// Mutable access to the initial grid. Only valid before the first step.
    pub fn seed_mut(&mut self) -> Result<&mut Grid<C>, ConfigError> {
        if self.generation > 0 {
            return Err(ConfigError::SeedAfterStep {
                generation: self.generation,
            });
        }
        Ok(&mut self.current)
    }

    /// Advance one generation.
    ///
    /// On error the current generation, generation counter and parity are
    /// left exactly as they were.
    pub fn step(&mut self) -> Result<(), StepError> {
        let current = &self.current;
        let next = &mut self.next;
        let parity = self.parity;

        let outcome = match &self.rule {
            Rule::Cell(rule) => self
                .thread_pool
                .install(|| step_cells(current, next, &**rule)),
            Rule::Block(rule) => self
                .thread_pool
                .install(|| step_blocks(current, next, &**rule, parity)),
        };

        if let Err(err) = outcome {
            warn!("step to generation {} failed: {}", self.generation + 1, err);
            return Err(err);
        }

        self.commit();
        Ok(())
    }

    /// Advance `n` generations, stopping at the first failure.
    pub fn steps(&mut self, n: usize) -> Result<(), StepError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Swap the filled `next` buffer in as the current generation.
    fn commit(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        if self.topology == Topology::Margolus {
            self.parity ^= 1;
        }
        debug!(
            "generation {} committed ({}, parity {})",
            self.generation, self.topology, self.parity
        );
    }

    /// Read-only view of the current generation.
    pub fn current_view(&self) -> &Grid<C> {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Parity the next Margolus step will use. Always 0 for normal topology.
    pub fn parity(&self) -> u8 {
        self.parity
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}
