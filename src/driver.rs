//! Fixed-rate render/step loop around an `Engine`.
//!
//! Presentation lives entirely behind `Renderer`; the driver only decides
//! when to render and when to step.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::automaton::{CellState, Engine, Grid};
use crate::error::StepError;

/// What the renderer wants the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Receives every generation before it is stepped past.
pub trait Renderer<C> {
    fn render(&mut self, view: &Grid<C>, clock: Duration) -> Control;
}

impl<C, F> Renderer<C> for F
where
    F: FnMut(&Grid<C>, Duration) -> Control,
{
    fn render(&mut self, view: &Grid<C>, clock: Duration) -> Control {
        self(view, clock)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The renderer asked to quit.
    Quit,
    /// The generation limit was reached.
    Limit,
}

pub struct Driver<C: CellState> {
    engine: Engine<C>,
    clock: Duration,
    max_generations: Option<u64>,
}

impl<C: CellState> Driver<C> {
    pub fn new(engine: Engine<C>, clock: Duration) -> Self {
        Driver {
            engine,
            clock,
            max_generations: None,
        }
    }

    /// Stop once the engine reaches this generation (after rendering it).
    pub fn with_limit(mut self, max_generations: u64) -> Self {
        self.max_generations = Some(max_generations);
        self
    }

    pub fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    pub fn into_engine(self) -> Engine<C> {
        self.engine
    }

    /// Render, then step, once per clock tick until the renderer quits or
    /// the limit is reached.
    ///
    /// A failed step ends the run and is returned; the engine keeps the last
    /// good generation, which was already rendered.
    pub fn run<R: Renderer<C>>(&mut self, renderer: &mut R) -> Result<Stop, StepError> {
        let mut deadline = Instant::now();

        loop {
            if renderer.render(self.engine.current_view(), self.clock) == Control::Quit {
                debug!("renderer quit at generation {}", self.engine.generation());
                return Ok(Stop::Quit);
            }
            if self
                .max_generations
                .is_some_and(|limit| self.engine.generation() >= limit)
            {
                return Ok(Stop::Limit);
            }

            if let Err(err) = self.engine.step() {
                warn!("run stopped: {}", err);
                return Err(err);
            }

            deadline += self.clock;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Fell behind; don't try to catch up with a burst of steps
                deadline = now;
            }
        }
    }
}
