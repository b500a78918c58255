//! Transition rules.
//!
//! A rule is a pure capability over a fixed-shape window. Cell rules map a
//! 3x3 Moore window to the next state of its centre; block rules map a 2x2
//! Margolus block to its next 2x2 block. The engine picks which one to call
//! from its topology.

use super::grid::CellState;
use super::neighborhood::{Block, Topology, Window3};
use crate::error::{ConfigError, RuleError};

/// 3x3 -> 1 rule used by the normal topology.
pub trait CellRule<C>: Send + Sync {
    fn next_state(&self, window: &Window3<C>) -> Result<C, RuleError>;
}

/// 2x2 -> 2x2 rule used by the Margolus topology.
pub trait BlockRule<C>: Send + Sync {
    fn next_block(&self, block: &Block<C>) -> Result<Block<C>, RuleError>;
}

/// A rule, tagged with the window shape it consumes.
pub enum Rule<C> {
    Cell(Box<dyn CellRule<C>>),
    Block(Box<dyn BlockRule<C>>),
}

impl<C: CellState> Rule<C> {
    pub fn cell(rule: impl CellRule<C> + 'static) -> Self {
        Rule::Cell(Box::new(rule))
    }

    pub fn block(rule: impl BlockRule<C> + 'static) -> Self {
        Rule::Block(Box::new(rule))
    }

    /// Wrap a closure as a cell rule.
    ///
    /// Failures must be reported as `Err`. A panic is not caught: it unwinds
    /// out of `Engine::step` before the buffer swap, and across the C ABI it
    /// aborts the process.
    pub fn cell_fn<F>(f: F) -> Self
    where
        F: Fn(&Window3<C>) -> Result<C, RuleError> + Send + Sync + 'static,
    {
        Rule::Cell(Box::new(FnCellRule(f)))
    }

    /// Wrap a closure as a block rule. Panics are not caught, as for
    /// [`Rule::cell_fn`].
    pub fn block_fn<F>(f: F) -> Self
    where
        F: Fn(&Block<C>) -> Result<Block<C>, RuleError> + Send + Sync + 'static,
    {
        Rule::Block(Box::new(FnBlockRule(f)))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Cell(_) => "cell",
            Rule::Block(_) => "block",
        }
    }

    /// Check that this rule consumes the windows `topology` produces.
    pub fn check_topology(&self, topology: Topology) -> Result<(), ConfigError> {
        match (self, topology) {
            (Rule::Cell(_), Topology::Normal) | (Rule::Block(_), Topology::Margolus) => Ok(()),
            _ => Err(ConfigError::RuleTopologyMismatch {
                rule: self.kind(),
                topology: topology.name(),
            }),
        }
    }

    /// Build a named rule for `topology`.
    ///
    /// Normal topology accepts life-like rulestrings (`B3/S23`) or `conway`.
    /// Margolus topology accepts `single-rotation`.
    pub fn parse(spec: &str, topology: Topology, alive: C) -> Result<Self, ConfigError> {
        let name = spec.trim().to_ascii_lowercase();
        match topology {
            Topology::Normal => {
                if name == "conway" || name == "life" {
                    return Ok(Rule::cell(LifeRule::conway(alive)));
                }
                if name == "single-rotation" {
                    return Err(ConfigError::RuleTopologyMismatch {
                        rule: "block",
                        topology: topology.name(),
                    });
                }
                Ok(Rule::cell(LifeRule::parse(spec, alive)?))
            }
            Topology::Margolus => match name.as_str() {
                "single-rotation" | "single_rotation" | "rotation" => {
                    Ok(Rule::block(SingleRotation::new()))
                }
                _ if LifeRule::parse(spec, alive).is_ok() => Err(ConfigError::RuleTopologyMismatch {
                    rule: "cell",
                    topology: topology.name(),
                }),
                _ => Err(ConfigError::InvalidRule(spec.to_string())),
            },
        }
    }
}

struct FnCellRule<F>(F);

impl<C, F> CellRule<C> for FnCellRule<F>
where
    F: Fn(&Window3<C>) -> Result<C, RuleError> + Send + Sync,
{
    fn next_state(&self, window: &Window3<C>) -> Result<C, RuleError> {
        (self.0)(window)
    }
}

struct FnBlockRule<F>(F);

impl<C, F> BlockRule<C> for FnBlockRule<F>
where
    F: Fn(&Block<C>) -> Result<Block<C>, RuleError> + Send + Sync,
{
    fn next_block(&self, block: &Block<C>) -> Result<Block<C>, RuleError> {
        (self.0)(block)
    }
}

/// Life-like outer-totalistic rule over the Moore neighborhood.
///
/// Bit `n` of `birth` / `survive` is set when a dead / alive cell with `n`
/// alive neighbors is alive in the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeRule<C> {
    birth: u16,
    survive: u16,
    alive: C,
}

impl<C: CellState> LifeRule<C> {
    pub fn new(birth: u16, survive: u16, alive: C) -> Self {
        LifeRule {
            birth,
            survive,
            alive,
        }
    }

    /// Conway's Game of Life, B3/S23.
    pub fn conway(alive: C) -> Self {
        Self::new(1 << 3, (1 << 2) | (1 << 3), alive)
    }

    /// Parse a `B<digits>/S<digits>` rulestring. Either half may come first
    /// and may be empty (`B3/S` never survives).
    pub fn parse(rulestring: &str, alive: C) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRule(rulestring.to_string());

        let mut birth = None;
        let mut survive = None;
        for part in rulestring.trim().split('/') {
            let mut chars = part.trim().chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(invalid()),
            };
            if slot.is_some() {
                return Err(invalid());
            }
            let mut mask = 0u16;
            for c in chars {
                let n = c.to_digit(10).filter(|&n| n <= 8).ok_or_else(invalid)?;
                mask |= 1 << n;
            }
            *slot = Some(mask);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Ok(Self::new(birth, survive, alive)),
            _ => Err(invalid()),
        }
    }

    pub fn birth_mask(&self) -> u16 {
        self.birth
    }

    pub fn survive_mask(&self) -> u16 {
        self.survive
    }
}

impl<C: CellState> CellRule<C> for LifeRule<C> {
    fn next_state(&self, window: &Window3<C>) -> Result<C, RuleError> {
        let mut neighbors = 0u32;
        for (row, cells) in window.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if (row, col) != (1, 1) && cell.is_alive() {
                    neighbors += 1;
                }
            }
        }

        let mask = if window[1][1].is_alive() {
            self.survive
        } else {
            self.birth
        };

        Ok(if mask & (1 << neighbors) != 0 {
            self.alive
        } else {
            C::default()
        })
    }
}

/// Single rotation rule for the Margolus neighborhood.
///
/// A block with exactly one or three alive cells turns a quarter turn
/// clockwise; every other block is left as is. Population is conserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleRotation;

impl SingleRotation {
    pub fn new() -> Self {
        SingleRotation
    }
}

impl<C: CellState> BlockRule<C> for SingleRotation {
    fn next_block(&self, block: &Block<C>) -> Result<Block<C>, RuleError> {
        let [[a, b], [d, c]] = *block;
        let alive = [a, b, c, d].iter().filter(|v| v.is_alive()).count();

        Ok(if alive == 1 || alive == 3 {
            [[d, a], [c, b]]
        } else {
            *block
        })
    }
}
