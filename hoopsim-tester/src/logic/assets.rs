use anyhow::{Context, Result};
use hoopsim_game::{RosterError, RosterFeed, RosterSource, SimulationConfig};
use std::path::{Path, PathBuf};

/// Roster shipped with the tester so it runs without any external data.
pub const SAMPLE_ROSTER: &str = include_str!("../../assets/sample_roster.json");

#[derive(Debug, Clone, Copy, Default)]
pub struct BundledRoster;

impl RosterSource for BundledRoster {
    type Error = RosterError;

    fn load_roster(&self) -> Result<RosterFeed, Self::Error> {
        RosterFeed::from_json(SAMPLE_ROSTER)
    }
}

#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRoster {
    type Error = RosterError;

    fn load_roster(&self) -> Result<RosterFeed, Self::Error> {
        let json = std::fs::read_to_string(&self.path)?;
        RosterFeed::from_json(&json)
    }
}

/// Roster source choice plus the tuning overlay for one run.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub roster: Option<PathBuf>,
    pub config: SimulationConfig,
}

impl TesterAssets {
    pub fn load(roster: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                SimulationConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };
        Ok(Self {
            roster: roster.map(Path::to_path_buf),
            config,
        })
    }

    pub fn engine(&self) -> Result<hoopsim_game::SimulationEngine> {
        let engine = match &self.roster {
            Some(path) => hoopsim_game::SimulationEngine::load(
                &FileRoster::new(path),
                self.config.clone(),
            )
            .with_context(|| format!("failed to load roster {}", path.display()))?,
            None => hoopsim_game::SimulationEngine::load(&BundledRoster, self.config.clone())
                .context("failed to load bundled roster")?,
        };
        Ok(engine)
    }
}
