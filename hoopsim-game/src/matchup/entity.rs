//! Matchup participants: a solo custom player or a drafted five-man team.
use serde::{Deserialize, Serialize};

use crate::attributes::CustomPlayerBaseline;
use crate::constants::{ROLE_FIT_IN_POSITION, ROLE_FIT_OFF_POSITION};
use crate::error::ValidationError;
use crate::numbers::mean;
use crate::position::{LINEUP, Position, fits_slot};
use crate::roster::PlayerRecord;
use crate::season::derive_per;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Solo,
    Team,
}

/// Aggregate numbers the resolver scores from. `fg` is on the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EntityStats {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub per: f64,
    pub fg: f64,
    #[serde(default)]
    pub role_impact: Option<f64>,
}

/// The four lineup roles whose edges feed key factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Playmaking,
    Scoring,
    WingEfficiency,
    Rebounding,
}

impl Role {
    pub const ALL: [Self; 4] = [
        Self::Playmaking,
        Self::Scoring,
        Self::WingEfficiency,
        Self::Rebounding,
    ];

    #[must_use]
    pub const fn for_slot(slot: Position) -> Self {
        match slot {
            Position::PointGuard => Self::Playmaking,
            Position::ShootingGuard => Self::Scoring,
            Position::SmallForward | Position::PowerForward => Self::WingEfficiency,
            Position::Center => Self::Rebounding,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playmaking => "PG playmaking",
            Self::Scoring => "SG scoring",
            Self::WingEfficiency => "Wing efficiency",
            Self::Rebounding => "Center rebounding",
        }
    }
}

/// A drafted player in a lineup slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub slot: Position,
    pub player: PlayerRecord,
    pub in_role: bool,
}

impl RosterSlot {
    #[must_use]
    pub fn new(slot: Position, player: PlayerRecord) -> Self {
        let in_role = fits_slot(&player.position, slot);
        Self {
            slot,
            player,
            in_role,
        }
    }

    #[must_use]
    pub const fn fit(&self) -> f64 {
        if self.in_role {
            ROLE_FIT_IN_POSITION
        } else {
            ROLE_FIT_OFF_POSITION
        }
    }

    /// Fit-weighted value of the stat this slot is responsible for.
    #[must_use]
    pub fn role_value(&self) -> f64 {
        let raw = match Role::for_slot(self.slot) {
            Role::Playmaking => self.player.ast(),
            Role::Scoring => self.player.pts(),
            Role::WingEfficiency => player_per(&self.player),
            Role::Rebounding => self.player.reb(),
        };
        raw * self.fit()
    }
}

/// A five-player team assembled in the draft flow, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DraftedTeam {
    pub name: String,
    pub picks: Vec<(Position, PlayerRecord)>,
}

impl DraftedTeam {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            picks: Vec::new(),
        }
    }

    pub fn draft(&mut self, slot: Position, player: &PlayerRecord) -> &mut Self {
        self.picks.push((slot, player.clone()));
        self
    }

    /// Check the name and that each lineup slot is filled exactly once.
    ///
    /// # Errors
    ///
    /// Returns `MissingTeamName`, `DuplicateSlot` or `MissingSlot`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingTeamName);
        }
        for slot in LINEUP {
            match self.picks.iter().filter(|(pos, _)| *pos == slot).count() {
                0 => {
                    return Err(ValidationError::MissingSlot {
                        team: self.name.clone(),
                        slot,
                    });
                }
                1 => {}
                _ => {
                    return Err(ValidationError::DuplicateSlot {
                        team: self.name.clone(),
                        slot,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A matchup participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub stats: EntityStats,
    /// Lineup order PG..C for teams; empty for solo entrants.
    #[serde(default)]
    pub roster: Vec<RosterSlot>,
}

impl Entity {
    /// Solo entrant built from a custom baseline.
    #[must_use]
    pub fn solo_from_baseline(name: &str, baseline: &CustomPlayerBaseline) -> Self {
        Self {
            name: name.to_string(),
            kind: EntityKind::Solo,
            stats: EntityStats {
                pts: baseline.pts,
                ast: baseline.ast,
                reb: baseline.reb,
                per: derive_per(baseline.pts, baseline.ast, baseline.reb, baseline.stl, baseline.blk),
                fg: baseline.fg * 100.0,
                role_impact: None,
            },
            roster: Vec::new(),
        }
    }

    /// Solo entrant built from a historical player's own line.
    #[must_use]
    pub fn solo_from_record(record: &PlayerRecord) -> Self {
        Self {
            name: record.name.clone(),
            kind: EntityKind::Solo,
            stats: EntityStats {
                pts: record.pts(),
                ast: record.ast(),
                reb: record.reb(),
                per: player_per(record),
                fg: record.fg_fraction() * 100.0,
                role_impact: None,
            },
            roster: Vec::new(),
        }
    }

    /// Team entrant: counting stats and PER summed across the five, field
    /// goal percentage averaged, plus the fit-weighted role impact.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error when the lineup is incomplete.
    pub fn team(draft: &DraftedTeam) -> Result<Self, ValidationError> {
        draft.validate()?;
        let roster: Vec<RosterSlot> = LINEUP
            .into_iter()
            .filter_map(|slot| {
                draft
                    .picks
                    .iter()
                    .find(|(pos, _)| *pos == slot)
                    .map(|(_, player)| RosterSlot::new(slot, player.clone()))
            })
            .collect();
        let sum = |read: fn(&PlayerRecord) -> f64| roster.iter().map(|s| read(&s.player)).sum::<f64>();
        let fgs: Vec<f64> = roster.iter().map(|s| s.player.fg_fraction() * 100.0).collect();
        let stats = EntityStats {
            pts: sum(PlayerRecord::pts),
            ast: sum(PlayerRecord::ast),
            reb: sum(PlayerRecord::reb),
            per: sum(player_per),
            fg: mean(&fgs),
            role_impact: Some(roster.iter().map(RosterSlot::role_value).sum()),
        };
        Ok(Self {
            name: draft.name.trim().to_string(),
            kind: EntityKind::Team,
            stats,
            roster,
        })
    }

    #[must_use]
    pub fn is_team(&self) -> bool {
        self.kind == EntityKind::Team
    }

    /// Fit-weighted value this team gets from `role`; 0 for solo entrants.
    #[must_use]
    pub fn role_value(&self, role: Role) -> f64 {
        self.roster
            .iter()
            .filter(|slot| Role::for_slot(slot.slot) == role)
            .map(RosterSlot::role_value)
            .sum()
    }
}

/// Listed PER, or the derived rating when the feed has none.
fn player_per(record: &PlayerRecord) -> f64 {
    let listed = record.per();
    if listed > 0.0 {
        listed
    } else {
        derive_per(record.pts(), record.ast(), record.reb(), record.stl(), record.blk())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, position: &str, pts: f64) -> PlayerRecord {
        let mut record = PlayerRecord::new(name, position);
        record.pts = Some(pts);
        record.ast = Some(4.0);
        record.reb = Some(6.0);
        record.per = Some(18.0);
        record.fg_pct = Some(0.48);
        record
    }

    fn full_team(name: &str) -> DraftedTeam {
        let mut draft = DraftedTeam::new(name);
        draft
            .draft(Position::PointGuard, &player("P1", "Guard", 18.0))
            .draft(Position::ShootingGuard, &player("P2", "Guard", 22.0))
            .draft(Position::SmallForward, &player("P3", "Forward", 16.0))
            .draft(Position::PowerForward, &player("P4", "Forward-Center", 14.0))
            .draft(Position::Center, &player("P5", "Center", 12.0));
        draft
    }

    #[test]
    fn team_stats_sum_across_lineup() {
        let team = Entity::team(&full_team("Dream")).unwrap();
        assert!(team.is_team());
        assert!((team.stats.pts - 82.0).abs() < 1e-9);
        assert!((team.stats.per - 90.0).abs() < 1e-9);
        assert!((team.stats.fg - 48.0).abs() < 1e-9);
        assert_eq!(team.roster[0].slot, Position::PointGuard);
        assert!(team.roster.iter().all(|slot| slot.in_role));
        // PG ast 4 + SG pts 22 + two wings PER 18 + C reb 6
        assert!((team.stats.role_impact.unwrap() - 68.0).abs() < 1e-9);
    }

    #[test]
    fn off_role_players_are_discounted() {
        let mut draft = full_team("Odd");
        draft.picks[4] = (Position::Center, player("Tiny", "Guard", 12.0));
        let team = Entity::team(&draft).unwrap();
        assert!(!team.roster[4].in_role);
        assert!((team.role_value(Role::Rebounding) - 4.8).abs() < 1e-9);
    }

    #[test]
    fn draft_validation_names_the_problem() {
        let mut draft = full_team("Short");
        draft.picks.pop();
        assert_eq!(
            Entity::team(&draft).unwrap_err(),
            ValidationError::MissingSlot {
                team: "Short".to_string(),
                slot: Position::Center
            }
        );
        let mut doubled = full_team("Twice");
        doubled.draft(Position::PointGuard, &player("P6", "Guard", 9.0));
        assert!(matches!(
            doubled.validate(),
            Err(ValidationError::DuplicateSlot { slot: Position::PointGuard, .. })
        ));
        assert_eq!(
            full_team("   ").validate(),
            Err(ValidationError::MissingTeamName)
        );
    }

    #[test]
    fn solo_record_falls_back_to_derived_per() {
        let mut record = player("Solo", "Guard", 20.0);
        record.per = None;
        let entity = Entity::solo_from_record(&record);
        assert_eq!(entity.kind, EntityKind::Solo);
        let expected = derive_per(20.0, 4.0, 6.0, 0.0, 0.0);
        assert!((entity.stats.per - expected).abs() < 1e-9);
        assert!((entity.stats.fg - 48.0).abs() < 1e-9);
        assert!(entity.stats.role_impact.is_none());
    }
}
