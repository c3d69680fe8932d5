//! Hoopsim Engine
//!
//! Platform-agnostic core for the hoopsim basketball career and matchup
//! simulator. Builds a custom player from historical attribute picks, plays
//! out a seasonal career against a synthetic league, and resolves
//! reproducible head-to-head games and tournaments. No UI or I/O lives here.

pub mod analytics;
pub mod attributes;
pub mod career;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod matchup;
pub mod numbers;
pub mod position;
pub mod rng;
pub mod roster;
pub mod season;
pub mod summary;
pub mod tournament;

// Re-export commonly used types
pub use analytics::AdvancedMetrics;
pub use attributes::{
    AttributeKey, AttributePick, AttributePicks, AvailableAttributes, CustomPlayerBaseline,
    athleticism,
};
pub use career::{
    AwardTally, CareerHighs, CareerRequest, CareerResult, CareerTotals, DEFAULT_PLAYER_NAME,
    SeasonHigh, hall_of_fame, simulate_career,
};
pub use config::{ConfigError, NoiseConfig, SimulationConfig};
pub use curve::{CurveShape, curve_factor, total_years};
pub use error::ValidationError;
pub use matchup::{
    DraftedTeam, Entity, EntityKind, EntityStats, KeyFactor, MatchResult, Side, base_score,
    resolve_final_scores, simulate_game,
};
pub use position::{LINEUP, Position, RoleFamily};
pub use rng::{CosmeticRng, ReproducibleRng};
pub use roster::{Era, PlayerRecord, RosterError, RosterFeed};
pub use season::{
    Award, AwardSet, LeaderboardEntry, LeaderboardStat, Leaderboards, SeasonAwards, SeasonRecord,
    StatLine,
};
pub use summary::{CareerFactSheet, TimelineEvent};
pub use tournament::{TournamentBracket, TournamentRound, run_tournament};

/// Trait for abstracting roster loading.
/// Platform-specific implementations should provide this
pub trait RosterSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the player feed and per-era team tables
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read or decoded.
    fn load_roster(&self) -> Result<RosterFeed, Self::Error>;
}

/// What the caller chooses for a career run.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerSetup {
    pub player_name: String,
    pub picks: AttributePicks,
    pub position: Position,
    pub team: String,
    pub era: Era,
}

/// Loaded roster plus tuning, with derived attribute availability cached.
#[derive(Debug)]
pub struct SimulationEngine {
    feed: RosterFeed,
    available: AvailableAttributes,
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Load the roster from `source` and validate `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be loaded or the config is out
    /// of range.
    pub fn load<L>(source: &L, config: SimulationConfig) -> Result<Self, anyhow::Error>
    where
        L: RosterSource,
    {
        config.validate()?;
        let feed = source.load_roster()?;
        Ok(Self::from_feed(feed, config))
    }

    /// Wrap an already-decoded feed.
    #[must_use]
    pub fn from_feed(feed: RosterFeed, config: SimulationConfig) -> Self {
        let available = AvailableAttributes::detect(&feed.players);
        log::debug!(
            "roster loaded: {} players, {} active attributes",
            feed.players.len(),
            available.len()
        );
        Self {
            feed,
            available,
            config,
        }
    }

    #[must_use]
    pub const fn feed(&self) -> &RosterFeed {
        &self.feed
    }

    #[must_use]
    pub const fn available(&self) -> &AvailableAttributes {
        &self.available
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Look up a roster player by name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPlayer` when no record matches.
    pub fn player(&self, name: &str) -> Result<&PlayerRecord, ValidationError> {
        self.feed
            .find(name)
            .ok_or_else(|| ValidationError::UnknownPlayer(name.trim().to_string()))
    }

    /// Build attribute picks from `(attribute, player name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPlayer` for names not in the roster.
    pub fn picks_by_name(
        &self,
        pairs: &[(AttributeKey, String)],
    ) -> Result<AttributePicks, ValidationError> {
        let mut picks = AttributePicks::new();
        for (key, name) in pairs {
            picks.pick(*key, self.player(name)?);
        }
        Ok(picks)
    }

    /// Run a career for `setup` against the era's league and team pools.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the request is incomplete.
    pub fn career(
        &self,
        setup: &CareerSetup,
        rng: &mut CosmeticRng,
    ) -> Result<CareerResult, ValidationError> {
        let league_pool = self.feed.era_pool(setup.era);
        let team_pool = self.feed.teams_for(setup.era);
        let request = CareerRequest {
            player_name: &setup.player_name,
            picks: &setup.picks,
            available: &self.available,
            position: setup.position,
            team: &setup.team,
            league_pool: &league_pool,
            team_pool: &team_pool,
            config: &self.config,
        };
        simulate_career(&request, rng)
    }

    /// Solo entrant for a roster player.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPlayer` when the name is not found.
    pub fn solo_entrant(&self, name: &str) -> Result<Entity, ValidationError> {
        self.player(name).map(Entity::solo_from_record)
    }

    /// Solo entrant for the custom player described by `setup`. Only the
    /// picks, position and team matter here; the era is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a pick or the team is missing.
    pub fn custom_entrant(&self, setup: &CareerSetup) -> Result<Entity, ValidationError> {
        let baseline = setup
            .picks
            .build_baseline(&self.available, setup.position, &setup.team)?;
        Ok(Entity::solo_from_baseline(&setup.player_name, &baseline))
    }

    /// Team entrant from five player names in lineup order PG, SG, SF, PF, C.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for unknown players or an invalid lineup.
    pub fn team_entrant(&self, name: &str, lineup: &[String]) -> Result<Entity, ValidationError> {
        if lineup.len() != LINEUP.len() {
            return Err(ValidationError::LineupSize {
                team: name.trim().to_string(),
                count: lineup.len(),
            });
        }
        let mut draft = DraftedTeam::new(name);
        for (slot, player) in LINEUP.into_iter().zip(lineup) {
            draft.draft(slot, self.player(player)?);
        }
        Entity::team(&draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::convert::Infallible;

    struct FixtureSource;

    fn record(name: &str, position: &str, pts: f64, debut: u32) -> PlayerRecord {
        let mut record = PlayerRecord::new(name, position);
        record.debut_year = Some(debut);
        record.games = Some(900.0);
        record.pts = Some(pts);
        record.ast = Some(4.0);
        record.reb = Some(6.0);
        record.stl = Some(1.0);
        record.blk = Some(0.5);
        record.per = Some(18.0);
        record.fg_pct = Some(47.0);
        record.height = Some(79.0);
        record
    }

    impl RosterSource for FixtureSource {
        type Error = Infallible;

        fn load_roster(&self) -> Result<RosterFeed, Self::Error> {
            let players = ["PG", "SG", "SF", "PF", "C", "G", "F", "G-F"]
                .iter()
                .enumerate()
                .map(|(idx, pos)| {
                    let idx = u32::try_from(idx).unwrap();
                    record(&format!("Player {idx}"), pos, 10.0 + f64::from(idx), 1990 + idx)
                })
                .collect();
            let mut teams = BTreeMap::new();
            teams.insert(
                "1990s".to_string(),
                vec!["Bulls".to_string(), "Jazz".to_string()],
            );
            Ok(RosterFeed { players, teams })
        }
    }

    #[test]
    fn engine_loads_and_detects_attributes() {
        let engine = SimulationEngine::load(&FixtureSource, SimulationConfig::default()).unwrap();
        assert_eq!(engine.feed().players.len(), 8);
        assert_eq!(engine.available().len(), 8);
        assert!(engine.player("player 3").is_ok());
        assert_eq!(
            engine.player("Nobody").unwrap_err(),
            ValidationError::UnknownPlayer("Nobody".to_string())
        );
    }

    #[test]
    fn engine_rejects_bad_config() {
        let config = SimulationConfig {
            league_size: 0,
            ..SimulationConfig::default()
        };
        assert!(SimulationEngine::load(&FixtureSource, config).is_err());
    }

    #[test]
    fn engine_runs_a_career_for_an_era() {
        let engine = SimulationEngine::load(&FixtureSource, SimulationConfig::default()).unwrap();
        let pairs: Vec<(AttributeKey, String)> = AttributeKey::ALL
            .into_iter()
            .map(|key| (key, "Player 7".to_string()))
            .collect();
        let setup = CareerSetup {
            player_name: "Prospect".to_string(),
            picks: engine.picks_by_name(&pairs).unwrap(),
            position: Position::PointGuard,
            team: "Bulls".to_string(),
            era: Era::decade(1990),
        };
        let mut rng = CosmeticRng::from_user_seed(42);
        let career = engine.career(&setup, &mut rng).unwrap();
        assert_eq!(career.total_years, 11);
        assert_eq!(career.player_name, "Prospect");
    }

    #[test]
    fn engine_builds_team_entrants_in_lineup_order() {
        let engine = SimulationEngine::load(&FixtureSource, SimulationConfig::default()).unwrap();
        let lineup: Vec<String> = (0..5).map(|idx| format!("Player {idx}")).collect();
        let team = engine.team_entrant("Starters", &lineup).unwrap();
        assert_eq!(team.roster.len(), 5);
        assert_eq!(team.roster[4].slot, Position::Center);
        assert_eq!(team.roster[4].player.name, "Player 4");

        assert_eq!(
            engine.team_entrant("Short", &lineup[..4]).unwrap_err(),
            ValidationError::LineupSize {
                team: "Short".to_string(),
                count: 4,
            }
        );
        let mut long = lineup.clone();
        long.push("Player 5".to_string());
        assert_eq!(
            engine.team_entrant("Long", &long).unwrap_err(),
            ValidationError::LineupSize {
                team: "Long".to_string(),
                count: 6,
            }
        );
        let solo = engine.solo_entrant("Player 1").unwrap();
        assert_eq!(solo.kind, EntityKind::Solo);
    }

    #[test]
    fn custom_player_enters_matchups_solo() {
        let engine = SimulationEngine::load(&FixtureSource, SimulationConfig::default()).unwrap();
        let pairs: Vec<(AttributeKey, String)> = AttributeKey::ALL
            .into_iter()
            .map(|key| (key, "Player 2".to_string()))
            .collect();
        let setup = CareerSetup {
            player_name: "Prospect".to_string(),
            picks: engine.picks_by_name(&pairs).unwrap(),
            position: Position::Center,
            team: "Jazz".to_string(),
            era: Era::All,
        };
        let custom = engine.custom_entrant(&setup).unwrap();
        assert_eq!(custom.name, "Prospect");
        assert_eq!(custom.kind, EntityKind::Solo);
        assert!((custom.stats.pts - 12.0).abs() < 1e-9);
        assert!((custom.stats.fg - 47.0).abs() < 1e-9);

        let result = simulate_game(&custom, &engine.solo_entrant("Player 7").unwrap());
        assert_eq!(result.name_a, "Prospect");
    }
}
