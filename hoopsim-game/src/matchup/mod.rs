//! Head-to-head resolution between two entities with a reproducible
//! generator keyed by the ordered pair of names.
use serde::{Deserialize, Serialize};

use crate::constants::{
    MATCH_KEY_FACTORS, MATCH_SCORE_MAX, MATCH_SCORE_MIN, MATCH_SOLO_DIVISOR, MATCH_SOLO_PACE,
    MATCH_TEAM_DIVISOR, MATCH_TEAM_PACE, MATCH_VARIANCE, MATCH_W_AST, MATCH_W_FG, MATCH_W_IMPACT,
    MATCH_W_PER, MATCH_W_PTS, MATCH_W_REB,
};
use crate::numbers::{finite_or_zero, round_f64_to_u32};
use crate::rng::{ReproducibleRng, uniform};

pub mod entity;
pub mod narrative;

pub use entity::{DraftedTeam, Entity, EntityKind, EntityStats, Role, RosterSlot};
pub use narrative::{KeyFactor, key_factors, narrate};

/// Which side of a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Pre-variance strength for one entity, clamped into the score band.
#[must_use]
pub fn base_score(entity: &Entity) -> f64 {
    let stats = &entity.stats;
    let (divisor, pace) = if entity.is_team() {
        (MATCH_TEAM_DIVISOR, MATCH_TEAM_PACE)
    } else {
        (MATCH_SOLO_DIVISOR, MATCH_SOLO_PACE)
    };
    let impact = if entity.is_team() {
        MATCH_W_IMPACT * finite_or_zero(stats.role_impact.unwrap_or(0.0))
    } else {
        0.0
    };
    let weighted = MATCH_W_PTS * finite_or_zero(stats.pts)
        + MATCH_W_AST * finite_or_zero(stats.ast)
        + MATCH_W_REB * finite_or_zero(stats.reb)
        + MATCH_W_PER * finite_or_zero(stats.per)
        + MATCH_W_FG * finite_or_zero(stats.fg)
        + impact;
    (weighted / divisor + pace).clamp(MATCH_SCORE_MIN, MATCH_SCORE_MAX)
}

/// Round both sides and break ties: the higher base gets one extra point,
/// with side A favored when bases are equal as well.
#[must_use]
pub fn resolve_final_scores(base_a: f64, base_b: f64, var_a: f64, var_b: f64) -> (u32, u32) {
    let mut score_a = round_f64_to_u32(base_a + var_a);
    let mut score_b = round_f64_to_u32(base_b + var_b);
    if score_a == score_b {
        if base_b > base_a {
            score_b += 1;
        } else {
            score_a += 1;
        }
    }
    (score_a, score_b)
}

/// One resolved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name_a: String,
    pub name_b: String,
    pub base_a: f64,
    pub base_b: f64,
    pub score_a: u32,
    pub score_b: u32,
    pub winner: Side,
    pub narrative: Vec<String>,
    pub key_factors: Vec<KeyFactor>,
}

impl MatchResult {
    #[must_use]
    pub fn winner_name(&self) -> &str {
        match self.winner {
            Side::A => &self.name_a,
            Side::B => &self.name_b,
        }
    }

    #[must_use]
    pub fn loser_name(&self) -> &str {
        match self.winner {
            Side::A => &self.name_b,
            Side::B => &self.name_a,
        }
    }

    /// Scoreline as `winner-loser`.
    #[must_use]
    pub fn scoreline(&self) -> String {
        let (high, low) = match self.winner {
            Side::A => (self.score_a, self.score_b),
            Side::B => (self.score_b, self.score_a),
        };
        format!("{high}-{low}")
    }
}

/// Resolve `a` against `b`. Identical inputs always yield identical scores
/// and narrative; swapping the sides reseeds the generator.
#[must_use]
pub fn simulate_game(a: &Entity, b: &Entity) -> MatchResult {
    let mut rng = ReproducibleRng::for_pair(&a.name, &b.name);
    let base_a = base_score(a);
    let base_b = base_score(b);
    let var_a = uniform(&mut rng, -MATCH_VARIANCE, MATCH_VARIANCE);
    let var_b = uniform(&mut rng, -MATCH_VARIANCE, MATCH_VARIANCE);
    let (score_a, score_b) = resolve_final_scores(base_a, base_b, var_a, var_b);
    let winner = if score_a > score_b { Side::A } else { Side::B };

    let mut result = MatchResult {
        name_a: a.name.clone(),
        name_b: b.name.clone(),
        base_a,
        base_b,
        score_a,
        score_b,
        winner,
        narrative: Vec::new(),
        key_factors: key_factors(a, b, MATCH_KEY_FACTORS),
    };
    result.narrative = narrate(a, b, &result, &mut rng);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::roster::PlayerRecord;

    fn solo(name: &str, pts: f64) -> Entity {
        let mut record = PlayerRecord::new(name, "Guard");
        record.pts = Some(pts);
        record.ast = Some(6.0);
        record.reb = Some(5.0);
        record.per = Some(22.0);
        record.fg_pct = Some(47.0);
        Entity::solo_from_record(&record)
    }

    fn team(name: &str, scale: f64) -> Entity {
        let mut draft = DraftedTeam::new(name);
        for (idx, slot) in crate::position::LINEUP.into_iter().enumerate() {
            let mut record = PlayerRecord::new(&format!("{name} {idx}"), slot.abbrev());
            record.pts = Some(15.0 * scale);
            record.ast = Some(4.0 * scale);
            record.reb = Some(6.0 * scale);
            record.per = Some(17.0 * scale);
            record.fg_pct = Some(0.47);
            draft.draft(slot, &record);
        }
        Entity::team(&draft).unwrap()
    }

    #[test]
    fn base_score_uses_mode_divisor_and_pace() {
        let entity = solo("Shooter", 30.0);
        let expected = (30.0 + 0.4 * 6.0 + 0.25 * 5.0 + 0.3 * 22.0 + 0.2 * 47.0) / 2.0 + 100.0;
        assert!((base_score(&entity) - expected).abs() < 1e-9);

        let squad = team("Squad", 1.0);
        assert_eq!(squad.roster[4].slot, Position::Center);
        let stats = squad.stats;
        let expected = (stats.pts
            + 0.4 * stats.ast
            + 0.25 * stats.reb
            + 0.3 * stats.per
            + 0.2 * stats.fg
            + 0.35 * stats.role_impact.unwrap())
            / 10.0
            + 110.0;
        assert!((base_score(&squad) - expected).abs() < 1e-9);
    }

    #[test]
    fn base_score_is_clamped() {
        assert!((base_score(&solo("Giant", 500.0)) - 140.0).abs() < f64::EPSILON);
        let mut empty = solo("Nobody", 0.0);
        empty.stats = EntityStats::default();
        assert!((base_score(&empty) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ties_break_toward_higher_base_then_side_a() {
        assert_eq!(resolve_final_scores(100.0, 100.0, 0.0, 0.0), (101, 100));
        assert_eq!(resolve_final_scores(99.0, 101.0, 1.0, -1.0), (100, 101));
        assert_eq!(resolve_final_scores(101.0, 99.0, -1.0, 1.0), (101, 100));
        assert_eq!(resolve_final_scores(110.0, 100.0, 0.0, 0.0), (110, 100));
    }

    #[test]
    fn games_are_deterministic() {
        let a = team("Bulls", 1.1);
        let b = team("Lakers", 1.0);
        let first = simulate_game(&a, &b);
        let second = simulate_game(&a, &b);
        assert_eq!(first, second);
        assert_ne!(first.score_a, first.score_b);
        assert!(!first.narrative.is_empty());
        assert!(first.key_factors.len() <= 3);
    }

    #[test]
    fn winner_matches_scores() {
        let result = simulate_game(&solo("Alpha", 35.0), &solo("Beta", 10.0));
        assert_eq!(result.winner, Side::A);
        assert_eq!(result.winner_name(), "Alpha");
        assert_eq!(result.loser_name(), "Beta");
        assert!(result.score_a > result.score_b);
        assert_eq!(
            result.scoreline(),
            format!("{}-{}", result.score_a, result.score_b)
        );
    }
}
