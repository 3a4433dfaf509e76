//! Run settings: an optional TOML file overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use vt_behavior::{InfluenceDivisor, TurnoutBehavior};
use vt_core::{SimConfig, Topology};

use crate::cli::{Divisor, RunArgs};

/// Data directory used when neither the file nor the command line name one.
pub const DEFAULT_DATA_DIR: &str = "demos/ncr/data";

/// Everything the driver needs to build and run one model.
///
/// ```toml
/// log_level = "debug"
/// data_dir  = "demos/ncr/data"
///
/// [sim]
/// agent_count = 500
/// topology    = "bounded"
///
/// [behavior]
/// divisor = "observed"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log_level: Option<String>,
    pub data_dir:  PathBuf,
    pub sim:       SimConfig,
    pub behavior:  BehaviorSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorSettings {
    pub benefit:   f64,
    pub threshold: f64,
    pub divisor:   Divisor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: None,
            data_dir:  PathBuf::from(DEFAULT_DATA_DIR),
            sim:       SimConfig::default(),
            behavior:  BehaviorSettings::default(),
        }
    }
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        let rule = TurnoutBehavior::default();
        Self { benefit: rule.benefit, threshold: rule.threshold, divisor: Divisor::Fixed }
    }
}

impl BehaviorSettings {
    pub fn to_behavior(&self) -> Result<TurnoutBehavior> {
        let divisor = match self.divisor {
            Divisor::Fixed    => InfluenceDivisor::FixedSlots,
            Divisor::Observed => InfluenceDivisor::ObservedCells,
        };
        Ok(TurnoutBehavior::new(self.benefit, self.threshold, divisor)?)
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`, or start from the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply(&mut self, args: &RunArgs) {
        if let Some(n) = args.agents {
            self.sim.agent_count = n;
        }
        if let Some(w) = args.width {
            self.sim.grid_width = w;
        }
        if let Some(h) = args.height {
            self.sim.grid_height = h;
        }
        if let Some(t) = args.ticks {
            self.sim.total_ticks = t;
        }
        if let Some(s) = args.seed {
            self.sim.seed = s;
        }
        if args.bounded {
            self.sim.topology = Topology::Bounded;
        }
        if let Some(d) = args.divisor {
            self.behavior.divisor = d;
        }
        if let Some(dir) = &args.data_dir {
            self.data_dir.clone_from(dir);
        }
        if args.log_level.is_some() {
            self.log_level.clone_from(&args.log_level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml(
            "data_dir = \"elsewhere\"\n[sim]\nagent_count = 500\ntopology = \"bounded\"\n[behavior]\ndivisor = \"observed\"\n",
        )
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.sim.agent_count, 500);
        assert_eq!(settings.sim.topology, Topology::Bounded);
        assert_eq!(settings.sim.grid_width, 30);
        assert_eq!(settings.behavior.divisor, Divisor::Observed);
        assert_eq!(settings.behavior.threshold, 0.5);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Settings::from_toml("[sim]\nagents = 5\n").is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let mut settings = Settings::from_toml("[sim]\nagent_count = 500\nseed = 1\n").unwrap();
        let cli = Cli::parse_from(["ncr", "--agents", "50", "--bounded", "--divisor", "observed"]);
        settings.apply(&cli.run);
        assert_eq!(settings.sim.agent_count, 50);
        assert_eq!(settings.sim.seed, 1);
        assert_eq!(settings.sim.topology, Topology::Bounded);
        assert_eq!(settings.behavior.divisor, Divisor::Observed);
    }

    #[test]
    fn behavior_maps_divisor() {
        let b = BehaviorSettings { divisor: Divisor::Observed, ..Default::default() };
        assert_eq!(b.to_behavior().unwrap().divisor, InfluenceDivisor::ObservedCells);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/vt.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
