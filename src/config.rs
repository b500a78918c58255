//! Engine configuration, loadable from JSON.

use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::automaton::{validate_dimensions, Engine, Grid, Pattern, Rule, Topology};
use crate::error::ConfigError;

/// A named pattern placed at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternPlacement {
    pub name: String,
    #[serde(default)]
    pub x: isize,
    #[serde(default)]
    pub y: isize,
}

/// Everything needed to build a seeded byte-cell engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,

    /// `normal` or `margolus`.
    #[serde(default = "default_topology")]
    pub topology: String,

    /// Rulestring (`B3/S23`) for normal, `single-rotation` for margolus.
    /// Defaults per topology when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Tick interval the driver uses between generations.
    #[serde(default = "default_clock_ms")]
    pub clock_ms: u64,

    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Value written for alive cells.
    #[serde(default = "default_alive")]
    pub alive: u8,

    /// Individual live cells as `[x, y]`, wrapped onto the grid.
    #[serde(default)]
    pub cells: Vec<(isize, isize)>,

    #[serde(default)]
    pub patterns: Vec<PatternPlacement>,
}

fn default_topology() -> String {
    "normal".to_string()
}

fn default_clock_ms() -> u64 {
    200
}

fn default_threads() -> usize {
    1
}

fn default_alive() -> u8 {
    255
}

impl EngineConfig {
    /// Game of Life on an empty `width` x `height` torus.
    pub fn new(width: usize, height: usize) -> Self {
        EngineConfig {
            width,
            height,
            topology: default_topology(),
            rule: None,
            clock_ms: default_clock_ms(),
            threads: default_threads(),
            alive: default_alive(),
            cells: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn topology(&self) -> Result<Topology, ConfigError> {
        self.topology.parse()
    }

    /// The configured rule name, or the default for the topology.
    pub fn rule_name(&self) -> Result<&str, ConfigError> {
        Ok(match (&self.rule, self.topology()?) {
            (Some(rule), _) => rule.as_str(),
            (None, Topology::Normal) => "B3/S23",
            (None, Topology::Margolus) => "single-rotation",
        })
    }

    pub fn clock(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }

    /// Check everything `build` would check, without building.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let topology = self.topology()?;
        validate_dimensions(self.width, self.height, topology)?;
        Rule::parse(self.rule_name()?, topology, self.alive)?;
        for placement in &self.patterns {
            Pattern::find(&placement.name)?;
        }
        Ok(())
    }

    /// The initial grid described by `cells` and `patterns`.
    pub fn seed_grid(&self) -> Result<Grid<u8>, ConfigError> {
        validate_dimensions(self.width, self.height, self.topology()?)?;
        let mut grid = Grid::new(self.width, self.height);
        for &(x, y) in &self.cells {
            grid.set_wrapped(x, y, self.alive);
        }
        for placement in &self.patterns {
            Pattern::find(&placement.name)?.place(&mut grid, placement.x, placement.y, self.alive);
        }
        Ok(grid)
    }

    /// Build a seeded engine at generation 0.
    pub fn build(&self) -> Result<Engine<u8>, ConfigError> {
        let topology = self.topology()?;
        let rule = Rule::parse(self.rule_name()?, topology, self.alive)?;
        let engine = Engine::with_grid(self.seed_grid()?, topology, rule, self.threads)?;

        info!(
            "built {}x{} {} engine, rule {}, {} live cells",
            self.width,
            self.height,
            topology,
            self.rule_name()?,
            engine.current_view().alive_count()
        );
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::patterns::GLIDER;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config = EngineConfig::from_json(r#"{ "width": 100, "height": 80 }"#).unwrap();

        assert_eq!(config, EngineConfig::new(100, 80));
        assert_eq!(config.topology().unwrap(), Topology::Normal);
        assert_eq!(config.rule_name().unwrap(), "B3/S23");
        assert_eq!(config.clock(), Duration::from_millis(200));
    }

    #[test]
    fn test_margolus_default_rule() {
        let config =
            EngineConfig::from_json(r#"{ "width": 8, "height": 8, "topology": "margolus" }"#)
                .unwrap();

        assert_eq!(config.rule_name().unwrap(), "single-rotation");
        let engine = config.build().unwrap();
        assert_eq!(engine.topology(), Topology::Margolus);
    }

    #[test]
    fn test_full_config_builds_seeded_engine() {
        let json = r#"{
            "width": 20,
            "height": 10,
            "topology": "normal",
            "rule": "B36/S23",
            "clock_ms": 50,
            "threads": 2,
            "alive": 1,
            "cells": [[0, 0], [-1, -1]],
            "patterns": [{ "name": "blinker", "x": 5, "y": 5 }]
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        let engine = config.build().unwrap();

        assert_eq!(engine.num_threads(), 2);
        assert_eq!(config.clock(), Duration::from_millis(50));
        assert_eq!(
            engine.current_view().alive_cells(),
            vec![(0, 0), (5, 5), (6, 5), (7, 5), (19, 9)]
        );
        assert!(engine.current_view().cells().iter().all(|&v| v <= 1));
    }

    #[test]
    fn test_invalid_topology() {
        let err = EngineConfig::from_json(r#"{ "width": 4, "height": 4, "topology": "hex" }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTopology(name) if name == "hex"));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "width": 0, "height": 4 }"#),
            Err(ConfigError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "width": 7, "height": 4, "topology": "margolus" }"#),
            Err(ConfigError::OddMargolusDimensions { .. })
        ));
        // Cell count overflows usize
        assert!(matches!(
            EngineConfig::from_json(r#"{ "width": 4294967296, "height": 4294967296 }"#)
                .and_then(|config| config.build()),
            Err(ConfigError::InvalidDimensions { .. })
        ));
        // Negative sizes never make it past the parser
        assert!(matches!(
            EngineConfig::from_json(r#"{ "width": -3, "height": 4 }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_rule_and_pattern() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "width": 4, "height": 4, "rule": "B3/Q" }"#),
            Err(ConfigError::InvalidRule(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(
                r#"{ "width": 4, "height": 4, "topology": "margolus", "rule": "B3/S23" }"#
            ),
            Err(ConfigError::RuleTopologyMismatch { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json(
                r#"{ "width": 4, "height": 4, "patterns": [{ "name": "spaceship" }] }"#
            ),
            Err(ConfigError::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_extreme_pattern_offset_wraps() {
        let json = r#"{
            "width": 10,
            "height": 10,
            "patterns": [{ "name": "glider", "x": 9223372036854775807, "y": -9223372036854775808 }]
        }"#;
        let engine = EngineConfig::from_json(json).unwrap().build().unwrap();

        assert_eq!(
            engine.current_view().alive_cells(),
            GLIDER.cells_at(10, 10, 7, 2)
        );
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let mut config = EngineConfig::new(12, 12);
        config.patterns.push(PatternPlacement {
            name: "glider".into(),
            x: 1,
            y: 2,
        });

        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
