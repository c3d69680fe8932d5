//! Tunable simulation parameters.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when simulation configuration invariants are violated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("config is not valid JSON: {0}")]
    Parse(String),
}

/// Per-stat standard deviations applied to season lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default = "NoiseConfig::default_pts")]
    pub pts: f64,
    #[serde(default = "NoiseConfig::default_ast")]
    pub ast: f64,
    #[serde(default = "NoiseConfig::default_reb")]
    pub reb: f64,
    #[serde(default = "NoiseConfig::default_defense")]
    pub stl: f64,
    #[serde(default = "NoiseConfig::default_defense")]
    pub blk: f64,
}

impl NoiseConfig {
    const fn default_pts() -> f64 {
        2.0
    }

    const fn default_ast() -> f64 {
        0.8
    }

    const fn default_reb() -> f64 {
        1.0
    }

    const fn default_defense() -> f64 {
        0.25
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("noise.pts", self.pts),
            ("noise.ast", self.ast),
            ("noise.reb", self.reb),
            ("noise.stl", self.stl),
            ("noise.blk", self.blk),
        ] {
            if !(0.0..=10.0).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 10.0,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            pts: Self::default_pts(),
            ast: Self::default_ast(),
            reb: Self::default_reb(),
            stl: Self::default_defense(),
            blk: Self::default_defense(),
        }
    }
}

/// Top-level simulation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_league_size")]
    pub league_size: usize,
    #[serde(default = "SimulationConfig::default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default = "SimulationConfig::default_all_pro_count")]
    pub all_pro_count: usize,
    #[serde(default = "SimulationConfig::default_max_years")]
    pub max_years: u32,
    #[serde(default = "SimulationConfig::default_year_variance_sigma")]
    pub year_variance_sigma: f64,
    #[serde(default)]
    pub noise: NoiseConfig,
}

impl SimulationConfig {
    #[must_use]
    pub const fn default_league_size() -> usize {
        150
    }

    #[must_use]
    pub const fn default_leaderboard_size() -> usize {
        10
    }

    #[must_use]
    pub const fn default_all_pro_count() -> usize {
        15
    }

    #[must_use]
    pub const fn default_max_years() -> u32 {
        20
    }

    #[must_use]
    pub const fn default_year_variance_sigma() -> f64 {
        0.06
    }

    /// Parse a config overlay from JSON; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or any validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.league_size == 0 {
            return Err(ConfigError::MinViolation {
                field: "league_size",
                min: 1.0,
                value: 0.0,
            });
        }
        if self.leaderboard_size == 0 {
            return Err(ConfigError::MinViolation {
                field: "leaderboard_size",
                min: 1.0,
                value: 0.0,
            });
        }
        if self.all_pro_count == 0 {
            return Err(ConfigError::MinViolation {
                field: "all_pro_count",
                min: 1.0,
                value: 0.0,
            });
        }
        if !(1..=20).contains(&self.max_years) {
            return Err(ConfigError::RangeViolation {
                field: "max_years",
                min: 1.0,
                max: 20.0,
                value: f64::from(self.max_years),
            });
        }
        if !(0.0..=0.5).contains(&self.year_variance_sigma) {
            return Err(ConfigError::RangeViolation {
                field: "year_variance_sigma",
                min: 0.0,
                max: 0.5,
                value: self.year_variance_sigma,
            });
        }
        self.noise.validate()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            league_size: Self::default_league_size(),
            leaderboard_size: Self::default_leaderboard_size(),
            all_pro_count: Self::default_all_pro_count(),
            max_years: Self::default_max_years(),
            year_variance_sigma: Self::default_year_variance_sigma(),
            noise: NoiseConfig::default(),
        }
    }
}
