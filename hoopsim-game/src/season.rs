//! One simulated season: the custom player's line, a synthetic league,
//! leaderboards and awards.
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

use crate::attributes::CustomPlayerBaseline;
use crate::config::{NoiseConfig, SimulationConfig};
use crate::constants::{
    ATHLETICISM_VARIANCE_SHIFT, CAP_AST, CAP_BLK, CAP_PTS, CAP_REB, CAP_STL, MIP_PROXY_MAX,
    MIP_PROXY_MIN, PER_BASE, PER_MAX, PER_MIN, PER_W_AST, PER_W_BLK, PER_W_PTS, PER_W_REB,
    PER_W_STL, SCORE_W_AST, SCORE_W_BLK, SCORE_W_PER, SCORE_W_PTS, SCORE_W_REB, SCORE_W_STL,
    WINS_CEILING, WINS_FLOOR, YEAR_VARIANCE_MAX, YEAR_VARIANCE_MIN,
};
use crate::curve::CurveShape;
use crate::numbers::{finite_or_zero, round_f64_to_u32};
use crate::rng::{CosmeticRng, gaussian, index_below, uniform};
use crate::roster::PlayerRecord;

/// Derived efficiency rating for a per-game line.
#[must_use]
pub fn derive_per(pts: f64, ast: f64, reb: f64, stl: f64, blk: f64) -> f64 {
    let raw = PER_BASE
        + PER_W_PTS * pts
        + PER_W_AST * ast
        + PER_W_REB * reb
        + PER_W_STL * stl
        + PER_W_BLK * blk;
    raw.clamp(PER_MIN, PER_MAX)
}

/// One per-game stat line with its derived PER and composite award score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StatLine {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
    pub per: f64,
    pub score: f64,
}

impl StatLine {
    /// Build a line from counting stats; PER and score are derived.
    #[must_use]
    pub fn from_counting(pts: f64, ast: f64, reb: f64, stl: f64, blk: f64) -> Self {
        let per = derive_per(pts, ast, reb, stl, blk);
        let mut line = Self {
            pts,
            ast,
            reb,
            stl,
            blk,
            per,
            score: 0.0,
        };
        line.score = line.composite_score();
        line
    }

    /// Weighted blend used for MVP and the other award races.
    #[must_use]
    pub fn composite_score(&self) -> f64 {
        SCORE_W_PTS * self.pts
            + SCORE_W_REB * self.reb
            + SCORE_W_AST * self.ast
            + SCORE_W_PER * self.per
            + SCORE_W_STL * self.stl
            + SCORE_W_BLK * self.blk
    }

    /// Blend used for the Hall-of-Fame career average (no defensive terms).
    #[must_use]
    pub fn hall_of_fame_score(&self) -> f64 {
        SCORE_W_PTS * self.pts
            + SCORE_W_REB * self.reb
            + SCORE_W_AST * self.ast
            + SCORE_W_PER * self.per
    }

    /// Value used for a leaderboard category.
    #[must_use]
    pub const fn stat(&self, category: LeaderboardStat) -> f64 {
        match category {
            LeaderboardStat::Pts => self.pts,
            LeaderboardStat::Ast => self.ast,
            LeaderboardStat::Reb => self.reb,
            LeaderboardStat::Per => self.per,
        }
    }
}

/// A season participant: the custom player or a synthetic league player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub team: String,
    pub line: StatLine,
    pub is_custom: bool,
}

/// Leaderboard categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardStat {
    Pts,
    Ast,
    Reb,
    Per,
}

impl LeaderboardStat {
    pub const ALL: [Self; 4] = [Self::Pts, Self::Ast, Self::Reb, Self::Per];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pts => "PTS",
            Self::Ast => "AST",
            Self::Reb => "REB",
            Self::Per => "PER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub team: String,
    pub value: f64,
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Leaderboards {
    pub pts: Vec<LeaderboardEntry>,
    pub ast: Vec<LeaderboardEntry>,
    pub reb: Vec<LeaderboardEntry>,
    pub per: Vec<LeaderboardEntry>,
}

impl Leaderboards {
    #[must_use]
    pub fn board(&self, category: LeaderboardStat) -> &[LeaderboardEntry] {
        match category {
            LeaderboardStat::Pts => &self.pts,
            LeaderboardStat::Ast => &self.ast,
            LeaderboardStat::Reb => &self.reb,
            LeaderboardStat::Per => &self.per,
        }
    }

    /// Categories in which the custom player made the board.
    #[must_use]
    pub fn custom_appearances(&self) -> Vec<LeaderboardStat> {
        LeaderboardStat::ALL
            .into_iter()
            .filter(|category| self.board(*category).iter().any(|entry| entry.is_custom))
            .collect()
    }
}

/// Season honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Award {
    Mvp,
    RookieOfTheYear,
    MostImproved,
    Champion,
    FinalsMvp,
    AllPro,
}

impl Award {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mvp => "MVP",
            Self::RookieOfTheYear => "Rookie of the Year",
            Self::MostImproved => "Most Improved Player",
            Self::Champion => "Champion",
            Self::FinalsMvp => "Finals MVP",
            Self::AllPro => "All-Pro",
        }
    }
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Awards won by the custom player in one season; rarely more than four.
pub type AwardSet = SmallVec<[Award; 4]>;

/// Season-wide award winners by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonAwards {
    pub mvp: String,
    #[serde(default)]
    pub rookie_of_the_year: Option<String>,
    #[serde(default)]
    pub most_improved: Option<String>,
    pub champion: String,
    pub finals_mvp: String,
    #[serde(default)]
    pub all_pro: Vec<String>,
}

/// Aggregate team strength and the display win total derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: String,
    pub aggregate: f64,
    pub wins: u32,
}

/// One simulated year. Created once and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub year: u32,
    pub team: String,
    pub games: u32,
    pub wins: u32,
    pub curve: f64,
    pub line: StatLine,
    pub leaderboards: Leaderboards,
    pub awards: SeasonAwards,
    #[serde(default)]
    pub custom_awards: AwardSet,
}

impl SeasonRecord {
    #[must_use]
    pub fn won(&self, award: Award) -> bool {
        self.custom_awards.contains(&award)
    }
}

/// Inputs for a single season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonContext<'a> {
    pub year: u32,
    pub games: u32,
    pub shape: &'a CurveShape,
    pub player_name: &'a str,
    pub baseline: &'a CustomPlayerBaseline,
    pub league_pool: &'a [PlayerRecord],
    pub team_pool: &'a [String],
    pub config: &'a SimulationConfig,
    /// The custom player's composite score from the previous season.
    pub prior_score: Option<f64>,
}

/// Simulate one season for the custom player and a fresh synthetic league.
#[must_use]
pub fn simulate_season(ctx: &SeasonContext<'_>, rng: &mut CosmeticRng) -> SeasonRecord {
    let variance = year_variance(ctx.baseline.ath, ctx.config.year_variance_sigma, rng);
    let curve = ctx.shape.factor(ctx.year) * variance;
    let line = custom_stat_line(ctx.baseline, curve, &ctx.config.noise, rng);

    let mut participants = Vec::with_capacity(ctx.config.league_size + 1);
    participants.push(Participant {
        name: ctx.player_name.to_string(),
        team: ctx.baseline.team.clone(),
        line,
        is_custom: true,
    });
    participants.extend(sample_league(
        ctx.league_pool,
        ctx.team_pool,
        ctx.config,
        rng,
    ));

    let leaderboards = build_leaderboards(&participants, ctx.config.leaderboard_size);
    let standings = team_standings(&participants);
    let (awards, custom_awards) = decide_awards(ctx, &participants, &standings, rng);
    let wins = standings
        .iter()
        .find(|standing| standing.team == ctx.baseline.team)
        .map_or(0, |standing| standing.wins);

    log::debug!(
        "season {} | curve {:.3} pts {:.1} score {:.2} awards {:?}",
        ctx.year,
        curve,
        line.pts,
        line.score,
        custom_awards
    );

    SeasonRecord {
        year: ctx.year,
        team: ctx.baseline.team.clone(),
        games: ctx.games,
        wins,
        curve,
        line,
        leaderboards,
        awards,
        custom_awards,
    }
}

/// Bounded multiplicative year-to-year noise, centred near 1 and nudged by
/// athleticism.
pub fn year_variance(ath: f64, sigma: f64, rng: &mut CosmeticRng) -> f64 {
    let centre = ATHLETICISM_VARIANCE_SHIFT.mul_add(finite_or_zero(ath), 1.0);
    sigma
        .mul_add(gaussian(rng), centre)
        .clamp(YEAR_VARIANCE_MIN, YEAR_VARIANCE_MAX)
}

/// The custom player's line: position-adjusted baseline plus noise, scaled
/// by the curve and capped.
pub fn custom_stat_line(
    baseline: &CustomPlayerBaseline,
    curve: f64,
    noise: &NoiseConfig,
    rng: &mut CosmeticRng,
) -> StatLine {
    let adj = baseline.position.adjustment();
    let mut roll = |base: f64, shift: f64, sigma: f64, cap: f64| {
        let noisy = sigma.mul_add(gaussian(rng), finite_or_zero(base) + shift);
        (noisy * curve).clamp(0.0, cap)
    };
    let pts = roll(baseline.pts, adj.pts, noise.pts, CAP_PTS);
    let ast = roll(baseline.ast, adj.ast, noise.ast, CAP_AST);
    let reb = roll(baseline.reb, adj.reb, noise.reb, CAP_REB);
    let stl = roll(baseline.stl, adj.stl, noise.stl, CAP_STL);
    let blk = roll(baseline.blk, adj.blk, noise.blk, CAP_BLK);
    StatLine::from_counting(pts, ast, reb, stl, blk)
}

/// A background player's line: own averages plus noise, no aging.
pub fn league_stat_line(record: &PlayerRecord, noise: &NoiseConfig, rng: &mut CosmeticRng) -> StatLine {
    let mut roll = |base: f64, sigma: f64, cap: f64| sigma.mul_add(gaussian(rng), base).clamp(0.0, cap);
    let pts = roll(record.pts(), noise.pts, CAP_PTS);
    let ast = roll(record.ast(), noise.ast, CAP_AST);
    let reb = roll(record.reb(), noise.reb, CAP_REB);
    let stl = roll(record.stl(), noise.stl, CAP_STL);
    let blk = roll(record.blk(), noise.blk, CAP_BLK);
    StatLine::from_counting(pts, ast, reb, stl, blk)
}

/// Draw `league_size` background players from the era pool. Sampling is
/// without replacement when the pool is large enough and with replacement
/// otherwise.
pub fn sample_league(
    pool: &[PlayerRecord],
    teams: &[String],
    config: &SimulationConfig,
    rng: &mut CosmeticRng,
) -> Vec<Participant> {
    if pool.is_empty() {
        return Vec::new();
    }
    let picks: Vec<&PlayerRecord> = if pool.len() >= config.league_size {
        pool.choose_multiple(rng, config.league_size).collect()
    } else {
        (0..config.league_size)
            .map(|_| &pool[index_below(rng, pool.len())])
            .collect()
    };
    picks
        .into_iter()
        .map(|record| {
            let line = league_stat_line(record, &config.noise, rng);
            let team = if teams.is_empty() {
                String::new()
            } else {
                teams[index_below(rng, teams.len())].clone()
            };
            Participant {
                name: record.name.clone(),
                team,
                line,
                is_custom: false,
            }
        })
        .collect()
}

/// Indices of the top `n` values, descending. Equal values keep their
/// input order.
#[must_use]
pub fn top_n_stable(values: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*b].total_cmp(&values[*a]));
    order.truncate(n);
    order
}

/// Four category boards over all participants.
#[must_use]
pub fn build_leaderboards(participants: &[Participant], size: usize) -> Leaderboards {
    let board = |category: LeaderboardStat| {
        let values: Vec<f64> = participants
            .iter()
            .map(|participant| participant.line.stat(category))
            .collect();
        top_n_stable(&values, size)
            .into_iter()
            .enumerate()
            .map(|(rank, idx)| {
                let participant = &participants[idx];
                LeaderboardEntry {
                    rank: rank + 1,
                    name: participant.name.clone(),
                    team: participant.team.clone(),
                    value: values[idx],
                    is_custom: participant.is_custom,
                }
            })
            .collect()
    };
    Leaderboards {
        pts: board(LeaderboardStat::Pts),
        ast: board(LeaderboardStat::Ast),
        reb: board(LeaderboardStat::Reb),
        per: board(LeaderboardStat::Per),
    }
}

/// Per-team aggregate composite score in first-appearance order, with win
/// totals min–max normalized into 20–60.
#[must_use]
pub fn team_standings(participants: &[Participant]) -> Vec<TeamStanding> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut standings: Vec<TeamStanding> = Vec::new();
    for participant in participants {
        let slot = *index.entry(participant.team.as_str()).or_insert_with(|| {
            standings.push(TeamStanding {
                team: participant.team.clone(),
                aggregate: 0.0,
                wins: 0,
            });
            standings.len() - 1
        });
        standings[slot].aggregate += participant.line.score;
    }

    let min = standings
        .iter()
        .map(|standing| standing.aggregate)
        .fold(f64::INFINITY, f64::min);
    let max = standings
        .iter()
        .map(|standing| standing.aggregate)
        .fold(f64::NEG_INFINITY, f64::max);
    let midpoint = f64::midpoint(WINS_FLOOR, WINS_CEILING);
    for standing in &mut standings {
        let wins = if max - min > f64::EPSILON {
            (WINS_CEILING - WINS_FLOOR).mul_add((standing.aggregate - min) / (max - min), WINS_FLOOR)
        } else {
            midpoint
        };
        standing.wins = round_f64_to_u32(wins);
    }
    standings
}

fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, item) in items.iter().enumerate() {
        let value = key(item);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

fn most_improved_index(
    ctx: &SeasonContext<'_>,
    participants: &[Participant],
    rng: &mut CosmeticRng,
) -> Option<usize> {
    let deltas: Vec<f64> = participants
        .iter()
        .map(|participant| {
            let prior = if participant.is_custom {
                ctx.prior_score.unwrap_or(participant.line.score)
            } else {
                participant.line.score * uniform(rng, MIP_PROXY_MIN, MIP_PROXY_MAX)
            };
            participant.line.score - prior
        })
        .collect();
    first_max_by(&deltas, |delta| *delta).filter(|idx| deltas[*idx] > 0.0)
}

fn decide_awards(
    ctx: &SeasonContext<'_>,
    participants: &[Participant],
    standings: &[TeamStanding],
    rng: &mut CosmeticRng,
) -> (SeasonAwards, AwardSet) {
    let mut custom = AwardSet::new();
    let name_of = |idx: usize| participants[idx].name.clone();

    let mvp = first_max_by(participants, |p| p.line.score).unwrap_or(0);
    if participants[mvp].is_custom {
        custom.push(Award::Mvp);
    }

    let rookie_of_the_year = (ctx.year == 1).then(|| {
        if participants[mvp].is_custom {
            custom.push(Award::RookieOfTheYear);
        }
        name_of(mvp)
    });

    let most_improved = if ctx.year >= 2 {
        most_improved_index(ctx, participants, rng).map(|idx| {
            if participants[idx].is_custom {
                custom.push(Award::MostImproved);
            }
            name_of(idx)
        })
    } else {
        None
    };

    let champion_idx = first_max_by(standings, |standing| standing.aggregate).unwrap_or(0);
    let champion = standings
        .get(champion_idx)
        .map(|standing| standing.team.clone())
        .unwrap_or_default();
    let roster: Vec<usize> = participants
        .iter()
        .enumerate()
        .filter(|(_, p)| p.team == champion)
        .map(|(idx, _)| idx)
        .collect();
    let finals_mvp_idx = first_max_by(&roster, |idx| participants[*idx].line.score)
        .map_or(mvp, |pos| roster[pos]);
    if participants[finals_mvp_idx].is_custom {
        custom.push(Award::FinalsMvp);
    }
    if ctx.baseline.team == champion {
        custom.push(Award::Champion);
    }

    let pers: Vec<f64> = participants.iter().map(|p| p.line.per).collect();
    let all_pro_idx = top_n_stable(&pers, ctx.config.all_pro_count);
    if all_pro_idx.iter().any(|idx| participants[*idx].is_custom) {
        custom.push(Award::AllPro);
    }

    let awards = SeasonAwards {
        mvp: name_of(mvp),
        rookie_of_the_year,
        most_improved,
        champion,
        finals_mvp: name_of(finals_mvp_idx),
        all_pro: all_pro_idx.into_iter().map(name_of).collect(),
    };
    (awards, custom)
}
