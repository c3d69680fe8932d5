//! Play-by-play text and key-factor breakdowns for a resolved game.
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Role};
use super::{MatchResult, Side};
use crate::constants::{
    MATCH_MAX_MOMENTS, MATCH_W_AST, MATCH_W_FG, MATCH_W_IMPACT, MATCH_W_PER, MATCH_W_PTS,
    MATCH_W_REB,
};
use crate::numbers::round_f64_to_u32;
use crate::rng::{ReproducibleRng, index_below, uniform};

const OPENERS: &[&str] = &[
    "{a} and {b} trade early buckets as the opening tip sets a quick pace.",
    "{a} comes out firing and forces {b} into an early timeout.",
    "A cagey start: {a} and {b} feel each other out through the first minutes.",
    "{a} pushes the tempo from the opening possession.",
];

const ANSWERS: &[&str] = &[
    "{b} answers with a run of their own.",
    "{b} settles in and chips away at the gap.",
    "{b} responds behind crisp ball movement.",
    "{b} leans on the glass to stay within reach.",
];

const HALVES: &[&str] = &[
    "{leader} leads {half_leader}-{half_trailer} at the half.",
    "Halftime: {leader} up {half_leader}-{half_trailer} on {trailer}.",
    "{leader} carries a {half_leader}-{half_trailer} edge into the locker room.",
];

const THIRDS: &[&str] = &[
    "{winner} turns the third quarter into a showcase.",
    "The third quarter swings on defense as {winner} tightens up.",
    "{loser} pushes back in the third but cannot take control.",
    "Both sides trade runs through a frantic third quarter.",
];

const CLOSERS: &[&str] = &[
    "{winner} closes it out, {score}.",
    "Final: {winner} over {loser}, {score}.",
    "{winner} holds on down the stretch to win {score}.",
    "{winner} pulls away late for a {score} victory.",
];

const MOMENTS: &[&str] = &[
    "{player} ({team}) knocks down a contested jumper to swing momentum.",
    "{player} ({team}) rises for a momentum-changing block.",
    "{player} ({team}) threads a no-look pass for an easy layup.",
    "{player} ({team}) crashes the glass for a putback.",
    "{player} ({team}) picks a pocket and finishes on the break.",
];

/// A weighted stat or role edge that explains the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFactor {
    pub label: String,
    pub favors: Side,
    /// Absolute weighted margin.
    pub edge: f64,
}

impl KeyFactor {
    #[must_use]
    pub fn describe(&self, a: &str, b: &str) -> String {
        let name = match self.favors {
            Side::A => a,
            Side::B => b,
        };
        format!("{}: {name} (+{:.1})", self.label, self.edge)
    }
}

/// The `limit` largest weighted differentials between `a` and `b`. Stat
/// edges always compete; role edges join when both sides are teams. Equal
/// magnitudes keep stat order, and zero edges are dropped.
#[must_use]
pub fn key_factors(a: &Entity, b: &Entity, limit: usize) -> Vec<KeyFactor> {
    let (sa, sb) = (&a.stats, &b.stats);
    let mut diffs: Vec<(String, f64)> = vec![
        ("Scoring".to_string(), MATCH_W_PTS * (sa.pts - sb.pts)),
        ("Playmaking".to_string(), MATCH_W_AST * (sa.ast - sb.ast)),
        ("Rebounding".to_string(), MATCH_W_REB * (sa.reb - sb.reb)),
        ("Efficiency".to_string(), MATCH_W_PER * (sa.per - sb.per)),
        ("Shooting".to_string(), MATCH_W_FG * (sa.fg - sb.fg)),
    ];
    if a.is_team() && b.is_team() {
        diffs.extend(Role::ALL.into_iter().map(|role| {
            (
                role.label().to_string(),
                MATCH_W_IMPACT * (a.role_value(role) - b.role_value(role)),
            )
        }));
    }
    diffs.retain(|(_, diff)| diff.is_finite() && *diff != 0.0);
    diffs.sort_by(|(_, x), (_, y)| y.abs().total_cmp(&x.abs()));
    diffs
        .into_iter()
        .take(limit)
        .map(|(label, diff)| KeyFactor {
            label,
            favors: if diff > 0.0 { Side::A } else { Side::B },
            edge: diff.abs(),
        })
        .collect()
}

fn pick<'t>(pool: &[&'t str], rng: &mut ReproducibleRng) -> &'t str {
    pool[index_below(rng, pool.len())]
}

fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

/// Phase lines in order (open, answer, half, third, close) with team-mode
/// moments inserted before the close. Draws continue on the game's
/// generator so the text is as reproducible as the score.
pub fn narrate(
    a: &Entity,
    b: &Entity,
    result: &MatchResult,
    rng: &mut ReproducibleRng,
) -> Vec<String> {
    let half_a = round_f64_to_u32(f64::from(result.score_a) * uniform(rng, 0.44, 0.56));
    let half_b = round_f64_to_u32(f64::from(result.score_b) * uniform(rng, 0.44, 0.56));
    let (leader, trailer, half_leader, half_trailer) = if half_a >= half_b {
        (&a.name, &b.name, half_a, half_b)
    } else {
        (&b.name, &a.name, half_b, half_a)
    };
    let half_leader = half_leader.to_string();
    let half_trailer = half_trailer.to_string();
    let score = result.scoreline();
    let vars = [
        ("a", a.name.as_str()),
        ("b", b.name.as_str()),
        ("leader", leader.as_str()),
        ("trailer", trailer.as_str()),
        ("half_leader", half_leader.as_str()),
        ("half_trailer", half_trailer.as_str()),
        ("winner", result.winner_name()),
        ("loser", result.loser_name()),
        ("score", score.as_str()),
    ];

    let mut lines = Vec::new();
    for pool in [OPENERS, ANSWERS, HALVES, THIRDS] {
        lines.push(fill(pick(pool, rng), &vars));
    }
    if a.is_team() && b.is_team() {
        lines.extend(moments(a, b, rng));
    }
    lines.push(fill(pick(CLOSERS, rng), &vars));
    lines
}

fn moments(a: &Entity, b: &Entity, rng: &mut ReproducibleRng) -> Vec<String> {
    let count = index_below(rng, MATCH_MAX_MOMENTS + 1);
    (0..count)
        .filter_map(|_| {
            let team = if index_below(rng, 2) == 0 { a } else { b };
            let slot = team.roster.get(index_below(rng, team.roster.len()))?;
            let template = pick(MOMENTS, rng);
            Some(fill(
                template,
                &[("player", slot.player.name.as_str()), ("team", team.name.as_str())],
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::{DraftedTeam, simulate_game};
    use crate::position::LINEUP;
    use crate::roster::PlayerRecord;

    fn solo(name: &str, pts: f64, ast: f64) -> Entity {
        let mut record = PlayerRecord::new(name, "Guard");
        record.pts = Some(pts);
        record.ast = Some(ast);
        record.reb = Some(5.0);
        record.per = Some(20.0);
        record.fg_pct = Some(0.45);
        Entity::solo_from_record(&record)
    }

    fn team(name: &str, pts: f64) -> Entity {
        let mut draft = DraftedTeam::new(name);
        for slot in LINEUP {
            let mut record = PlayerRecord::new(&format!("{name} {}", slot.abbrev()), slot.abbrev());
            record.pts = Some(pts);
            record.ast = Some(3.0);
            record.reb = Some(7.0);
            record.per = Some(16.0);
            draft.draft(slot, &record);
        }
        Entity::team(&draft).unwrap()
    }

    #[test]
    fn key_factors_rank_by_weighted_margin() {
        let factors = key_factors(&solo("A", 30.0, 4.0), &solo("B", 20.0, 10.0), 3);
        // rebounding, PER and shooting are level, so only two edges remain
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].label, "Scoring");
        assert_eq!(factors[0].favors, Side::A);
        assert!((factors[0].edge - 10.0).abs() < 1e-9);
        assert_eq!(factors[1].label, "Playmaking");
        assert_eq!(factors[1].favors, Side::B);
        assert!((factors[1].edge - 2.4).abs() < 1e-9);
        assert_eq!(factors[0].describe("A", "B"), "Scoring: A (+10.0)");
    }

    #[test]
    fn identical_entities_have_no_key_factors() {
        assert!(key_factors(&solo("A", 20.0, 5.0), &solo("B", 20.0, 5.0), 3).is_empty());
    }

    #[test]
    fn team_games_blend_role_edges() {
        let factors = key_factors(&team("Hi", 20.0), &team("Lo", 10.0), 10);
        assert!(factors.iter().any(|f| f.label == "SG scoring"));
        assert!(factors.iter().all(|f| f.favors == Side::A));
    }

    #[test]
    fn narrative_mentions_both_sides_and_final_score() {
        let result = simulate_game(&team("Hi", 20.0), &team("Lo", 10.0));
        assert!(result.narrative.len() >= 5);
        assert!(result.narrative.len() <= 5 + MATCH_MAX_MOMENTS);
        let last = result.narrative.last().unwrap();
        assert!(last.contains(&result.scoreline()));
        assert!(result.narrative.iter().all(|line| !line.contains('{')));
    }

    #[test]
    fn solo_games_skip_moments() {
        let result = simulate_game(&solo("A", 30.0, 4.0), &solo("B", 22.0, 8.0));
        assert_eq!(result.narrative.len(), 5);
    }
}
