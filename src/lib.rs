//! Torus Automata - 2D Cellular Automata Library
//!
//! A grid of cells on a torus evolves under a caller-supplied local rule,
//! either cell-wise over the 3x3 Moore neighborhood or block-wise over
//! alternating 2x2 Margolus blocks. Each step is double-buffered: every rule
//! evaluation reads generation N and the new generation is committed by a
//! single buffer swap.
//!
//! ```
//! use torus_automata::automaton::{patterns::GLIDER, Engine, LifeRule, Rule, Topology};
//!
//! let rule = Rule::cell(LifeRule::conway(255u8));
//! let mut engine = Engine::new(16, 16, Topology::Normal, rule, 1).unwrap();
//! GLIDER.place(engine.seed_mut().unwrap(), 0, 0, 255);
//!
//! engine.steps(4).unwrap();
//! assert_eq!(engine.current_view().alive_cells(), GLIDER.cells_at(16, 16, 1, 1));
//! ```
//!
//! A C ABI for host drivers is exported from `ffi`.

pub mod automaton;
pub mod config;
pub mod driver;
pub mod error;
pub mod ffi;

pub use automaton::{Engine, Grid, Rule, Topology};
pub use config::EngineConfig;
pub use driver::{Control, Driver, Renderer, Stop};
pub use error::{ConfigError, RuleError, StepError};
