//! Career orchestration: season loop, award tallies, Hall of Fame and
//! career aggregates.
use serde::{Deserialize, Serialize};

use crate::analytics::AdvancedMetrics;
use crate::attributes::{AttributePicks, AvailableAttributes, CustomPlayerBaseline};
use crate::config::SimulationConfig;
use crate::constants::{
    HOF_ALL_PRO_MIN, HOF_ALL_PRO_SCORE, HOF_DYNASTY_ALL_PRO_MIN, HOF_DYNASTY_MVP_MIN,
    HOF_MVP_MIN, HOF_MVP_SCORE, HOF_TITLES_ALL_PRO_MIN, HOF_TITLES_MIN, HOF_TITLES_SCORE,
};
use crate::curve::{CurveShape, games_by_season, total_years};
use crate::error::ValidationError;
use crate::numbers::{finite_or_zero, mean};
use crate::position::Position;
use crate::rng::CosmeticRng;
use crate::roster::PlayerRecord;
use crate::season::{Award, SeasonContext, SeasonRecord, StatLine, simulate_season};

pub const DEFAULT_PLAYER_NAME: &str = "Custom Player";

/// Everything a career simulation reads. Borrowed for the whole run and
/// never mutated.
#[derive(Debug, Clone, Copy)]
pub struct CareerRequest<'a> {
    pub player_name: &'a str,
    pub picks: &'a AttributePicks,
    pub available: &'a AvailableAttributes,
    pub position: Position,
    pub team: &'a str,
    pub league_pool: &'a [PlayerRecord],
    pub team_pool: &'a [String],
    pub config: &'a SimulationConfig,
}

/// Career award counts for the custom player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AwardTally {
    pub mvp: u32,
    pub rookie_of_the_year: u32,
    pub most_improved: u32,
    pub championships: u32,
    pub finals_mvp: u32,
    pub all_pro: u32,
}

impl AwardTally {
    pub fn record(&mut self, award: Award) {
        let slot = match award {
            Award::Mvp => &mut self.mvp,
            Award::RookieOfTheYear => &mut self.rookie_of_the_year,
            Award::MostImproved => &mut self.most_improved,
            Award::Champion => &mut self.championships,
            Award::FinalsMvp => &mut self.finals_mvp,
            Award::AllPro => &mut self.all_pro,
        };
        *slot += 1;
    }

    #[must_use]
    pub fn from_seasons(seasons: &[SeasonRecord]) -> Self {
        let mut tally = Self::default();
        for award in seasons.iter().flat_map(|season| season.custom_awards.iter()) {
            tally.record(*award);
        }
        tally
    }

    #[must_use]
    pub const fn count(&self, award: Award) -> u32 {
        match award {
            Award::Mvp => self.mvp,
            Award::RookieOfTheYear => self.rookie_of_the_year,
            Award::MostImproved => self.most_improved,
            Award::Champion => self.championships,
            Award::FinalsMvp => self.finals_mvp,
            Award::AllPro => self.all_pro,
        }
    }
}

/// Hall-of-Fame induction over the award tally and career average score.
#[must_use]
pub fn hall_of_fame(tally: &AwardTally, career_avg_score: f64) -> bool {
    let avg = finite_or_zero(career_avg_score);
    (tally.mvp >= HOF_MVP_MIN && avg > HOF_MVP_SCORE)
        || (tally.all_pro >= HOF_ALL_PRO_MIN && avg > HOF_ALL_PRO_SCORE)
        || (tally.championships >= HOF_TITLES_MIN
            && tally.all_pro >= HOF_TITLES_ALL_PRO_MIN
            && avg > HOF_TITLES_SCORE)
        || (tally.mvp >= HOF_DYNASTY_MVP_MIN && tally.all_pro >= HOF_DYNASTY_ALL_PRO_MIN)
}

/// Games-weighted mean of the per-season Hall-of-Fame score. Falls back
/// to the unweighted mean when no games were played.
#[must_use]
pub fn career_avg_score(seasons: &[SeasonRecord]) -> f64 {
    let games: u32 = seasons.iter().map(|season| season.games).sum();
    if games == 0 {
        let scores: Vec<f64> = seasons
            .iter()
            .map(|season| season.line.hall_of_fame_score())
            .collect();
        return mean(&scores);
    }
    let weighted: f64 = seasons
        .iter()
        .map(|season| season.line.hall_of_fame_score() * f64::from(season.games))
        .sum();
    weighted / f64::from(games)
}

/// Cumulative counting stats (per-game average times games).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CareerTotals {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
}

impl CareerTotals {
    #[must_use]
    pub fn from_seasons(seasons: &[SeasonRecord]) -> Self {
        seasons.iter().fold(Self::default(), |acc, season| {
            let games = f64::from(season.games);
            Self {
                pts: season.line.pts.mul_add(games, acc.pts),
                ast: season.line.ast.mul_add(games, acc.ast),
                reb: season.line.reb.mul_add(games, acc.reb),
                stl: season.line.stl.mul_add(games, acc.stl),
                blk: season.line.blk.mul_add(games, acc.blk),
            }
        })
    }
}

/// A season-best value and the year it came in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonHigh {
    pub value: f64,
    pub year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CareerHighs {
    pub pts: SeasonHigh,
    pub ast: SeasonHigh,
    pub reb: SeasonHigh,
    pub per: SeasonHigh,
}

impl CareerHighs {
    #[must_use]
    pub fn from_seasons(seasons: &[SeasonRecord]) -> Self {
        let high = |read: fn(&StatLine) -> f64| {
            seasons
                .iter()
                .fold(SeasonHigh::default(), |best, season| {
                    let value = read(&season.line);
                    if value > best.value {
                        SeasonHigh {
                            value,
                            year: season.year,
                        }
                    } else {
                        best
                    }
                })
        };
        Self {
            pts: high(|line| line.pts),
            ast: high(|line| line.ast),
            reb: high(|line| line.reb),
            per: high(|line| line.per),
        }
    }
}

/// A finished career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerResult {
    pub player_name: String,
    pub baseline: CustomPlayerBaseline,
    pub seasons: Vec<SeasonRecord>,
    pub awards: AwardTally,
    pub hall_of_fame: bool,
    pub total_games: u32,
    pub total_years: u32,
    pub career_avg_score: f64,
    pub metrics: AdvancedMetrics,
    pub totals: CareerTotals,
    pub highs: CareerHighs,
}

impl CareerResult {
    /// Assemble aggregates from a finished season list.
    #[must_use]
    pub fn from_seasons(
        player_name: &str,
        baseline: CustomPlayerBaseline,
        seasons: Vec<SeasonRecord>,
    ) -> Self {
        let awards = AwardTally::from_seasons(&seasons);
        let career_avg_score = career_avg_score(&seasons);
        Self {
            player_name: player_name.to_string(),
            baseline,
            awards,
            hall_of_fame: hall_of_fame(&awards, career_avg_score),
            total_games: seasons.iter().map(|season| season.games).sum(),
            total_years: u32::try_from(seasons.len()).unwrap_or(u32::MAX),
            career_avg_score,
            metrics: AdvancedMetrics::from_seasons(&seasons),
            totals: CareerTotals::from_seasons(&seasons),
            highs: CareerHighs::from_seasons(&seasons),
            seasons,
        }
    }
}

/// Simulate a full career for the custom player described by `request`.
///
/// # Errors
///
/// Returns `ValidationError` before any season is simulated when the
/// config is out of range, an attribute pick is missing or unavailable,
/// the team is blank, or either pool is empty.
pub fn simulate_career(
    request: &CareerRequest<'_>,
    rng: &mut CosmeticRng,
) -> Result<CareerResult, ValidationError> {
    request.config.validate()?;
    let baseline = request
        .picks
        .build_baseline(request.available, request.position, request.team)?;
    if request.league_pool.is_empty() {
        return Err(ValidationError::EmptyLeaguePool);
    }
    if request.team_pool.is_empty() {
        return Err(ValidationError::EmptyTeamPool);
    }

    let mut teams = request.team_pool.to_vec();
    if !teams.contains(&baseline.team) {
        teams.push(baseline.team.clone());
    }
    if baseline.g <= 0.0 {
        log::warn!(
            "{} has no longevity games; simulating a single empty season",
            request.player_name
        );
    }
    if request.league_pool.len() < request.config.league_size {
        log::warn!(
            "league pool holds {} players, sampling {} with replacement",
            request.league_pool.len(),
            request.config.league_size
        );
    }

    let years = total_years(baseline.g, request.config.max_years);
    let shape = CurveShape::new(baseline.g, years);
    let schedule = games_by_season(baseline.g, years);
    let mut seasons: Vec<SeasonRecord> = Vec::with_capacity(schedule.len());
    for (year, games) in (1..=years).zip(schedule) {
        let ctx = SeasonContext {
            year,
            games,
            shape: &shape,
            player_name: request.player_name,
            baseline: &baseline,
            league_pool: request.league_pool,
            team_pool: &teams,
            config: request.config,
            prior_score: seasons.last().map(|season| season.line.score),
        };
        seasons.push(simulate_season(&ctx, rng));
    }

    let result = CareerResult::from_seasons(request.player_name, baseline, seasons);
    log::info!(
        "career complete for {}: {} seasons, {} games, avg score {:.2}, hall of fame {}",
        result.player_name,
        result.total_years,
        result.total_games,
        result.career_avg_score,
        result.hall_of_fame
    );
    Ok(result)
}
