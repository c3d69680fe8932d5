//! Single-elimination brackets built from head-to-head games.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::matchup::{Entity, MatchResult, Side, simulate_game};
use crate::rng::{CosmeticRng, index_below};

/// One round: the games played and the entrant who sat out, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRound {
    pub number: u32,
    pub games: Vec<MatchResult>,
    #[serde(default)]
    pub bye: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentBracket {
    pub entrants: Vec<String>,
    pub rounds: Vec<TournamentRound>,
    pub champion: String,
}

/// Ensure there are at least two entrants with distinct names.
///
/// # Errors
///
/// Returns `TooFewEntrants` or `DuplicateEntrant`.
pub fn validate_entrants(entrants: &[Entity]) -> Result<(), ValidationError> {
    if entrants.len() < 2 {
        return Err(ValidationError::TooFewEntrants(entrants.len()));
    }
    let mut seen = HashSet::new();
    for entity in entrants {
        if !seen.insert(entity.name.as_str()) {
            return Err(ValidationError::DuplicateEntrant(entity.name.clone()));
        }
    }
    Ok(())
}

/// Play rounds until one entrant remains. On an odd count the bye is drawn
/// from the cosmetic generator and the bye holder leads the next round's
/// order; everyone else pairs off in order. Individual games stay
/// reproducible regardless of how the byes fall.
///
/// # Errors
///
/// Returns a validation error before any game is played.
pub fn run_tournament(
    entrants: &[Entity],
    rng: &mut CosmeticRng,
) -> Result<TournamentBracket, ValidationError> {
    validate_entrants(entrants)?;
    let mut alive: Vec<&Entity> = entrants.iter().collect();
    let mut rounds = Vec::new();
    let mut number = 0;
    while alive.len() > 1 {
        number += 1;
        let bye = (alive.len() % 2 == 1).then(|| alive.remove(index_below(rng, alive.len())));
        let games: Vec<MatchResult> = alive
            .chunks_exact(2)
            .map(|pair| simulate_game(pair[0], pair[1]))
            .collect();
        let mut next: Vec<&Entity> = Vec::with_capacity(games.len() + 1);
        next.extend(bye);
        for (game, pair) in games.iter().zip(alive.chunks_exact(2)) {
            next.push(match game.winner {
                Side::A => pair[0],
                Side::B => pair[1],
            });
        }
        log::debug!(
            "round {number}: {} games, bye {:?}",
            games.len(),
            bye.map(|entity| entity.name.as_str())
        );
        rounds.push(TournamentRound {
            number,
            games,
            bye: bye.map(|entity| entity.name.clone()),
        });
        alive = next;
    }
    let champion = alive
        .first()
        .map(|entity| entity.name.clone())
        .unwrap_or_default();
    Ok(TournamentBracket {
        entrants: entrants.iter().map(|entity| entity.name.clone()).collect(),
        rounds,
        champion,
    })
}
