//! Error types for engine construction and stepping.

use thiserror::Error;

/// Errors raised while building or seeding an engine.
///
/// These are always reported at setup time; an engine that exists is valid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Width or height is zero, or the cell count does not fit in memory.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Margolus blocks must tile the torus exactly.
    #[error("margolus topology needs even dimensions, got {width}x{height}")]
    OddMargolusDimensions { width: usize, height: usize },

    /// Topology name is neither `normal` nor `margolus`.
    #[error("unknown topology: {0}")]
    UnknownTopology(String),

    /// Rule string could not be parsed.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A cell rule was paired with a block topology or vice versa.
    #[error("{rule} rule cannot drive {topology} topology")]
    RuleTopologyMismatch {
        rule: &'static str,
        topology: &'static str,
    },

    /// Seed grid does not match the engine dimensions.
    #[error("seed grid is {got:?}, engine expects {expected:?}")]
    SeedShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Seeding is only valid before the first step.
    #[error("cannot seed at generation {generation}")]
    SeedAfterStep { generation: u64 },

    /// Named seed pattern does not exist.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Configuration text is not valid JSON for `EngineConfig`.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Error returned by a rule that cannot handle a window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule rejected window: {0}")]
    Rejected(String),
}

/// Errors that abort a single step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// Rule evaluation failed at the given cell (or block origin).
    #[error("rule failed at ({x}, {y}): {source}")]
    Rule {
        x: usize,
        y: usize,
        #[source]
        source: RuleError,
    },
}
