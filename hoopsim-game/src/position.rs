//! Positions, role families and the per-position stat adjustments.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five canonical lineup positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

/// Lineup order used by the draft flow.
pub const LINEUP: [Position; 5] = [
    Position::PointGuard,
    Position::ShootingGuard,
    Position::SmallForward,
    Position::PowerForward,
    Position::Center,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown position `{0}` (expected PG, SG, SF, PF or C)")]
pub struct ParsePositionError(pub String);

impl Position {
    #[must_use]
    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::SmallForward => "SF",
            Self::PowerForward => "PF",
            Self::Center => "C",
        }
    }

    /// Broad role family the position belongs to.
    #[must_use]
    pub const fn family(self) -> RoleFamily {
        match self {
            Self::PointGuard | Self::ShootingGuard => RoleFamily::Guard,
            Self::SmallForward | Self::PowerForward => RoleFamily::Forward,
            Self::Center => RoleFamily::Center,
        }
    }

    /// Additive per-game adjustment applied to a custom player's baseline
    /// before curve scaling.
    #[must_use]
    pub const fn adjustment(self) -> StatAdjustment {
        match self {
            Self::PointGuard => StatAdjustment {
                pts: -0.5,
                ast: 2.0,
                reb: 0.0,
                stl: 0.0,
                blk: 0.0,
            },
            Self::ShootingGuard => StatAdjustment {
                pts: 2.5,
                ast: 0.0,
                reb: 0.0,
                stl: 0.0,
                blk: 0.0,
            },
            Self::SmallForward => StatAdjustment {
                pts: 0.8,
                ast: 0.0,
                reb: 0.6,
                stl: 0.0,
                blk: 0.0,
            },
            Self::PowerForward => StatAdjustment {
                pts: 0.0,
                ast: 0.0,
                reb: 1.5,
                stl: 0.0,
                blk: 0.3,
            },
            Self::Center => StatAdjustment {
                pts: 0.0,
                ast: -0.5,
                reb: 2.5,
                stl: 0.0,
                blk: 0.8,
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PG" | "POINT GUARD" => Ok(Self::PointGuard),
            "SG" | "SHOOTING GUARD" => Ok(Self::ShootingGuard),
            "SF" | "SMALL FORWARD" => Ok(Self::SmallForward),
            "PF" | "POWER FORWARD" => Ok(Self::PowerForward),
            "C" | "CENTER" | "CENTRE" => Ok(Self::Center),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

/// Broad role family as listed in historical data ("Guard-Forward").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    Guard,
    Forward,
    Center,
}

/// Additive stat adjustment keyed by position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatAdjustment {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
}

/// Parse a raw position string into the role families it lists.
///
/// Accepts long forms (`Guard-Forward`), single letters (`G-F`) and
/// lineup abbreviations (`PG`, `C`). Unknown tokens are ignored.
#[must_use]
pub fn role_families(raw: &str) -> Vec<RoleFamily> {
    let mut families = Vec::new();
    for token in raw.split(['-', '/', ',', ' ']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let family = match token.to_ascii_uppercase().as_str() {
            "GUARD" | "G" => Some(RoleFamily::Guard),
            "FORWARD" | "F" => Some(RoleFamily::Forward),
            "CENTER" | "CENTRE" | "C" => Some(RoleFamily::Center),
            other => other.parse::<Position>().ok().map(Position::family),
        };
        if let Some(family) = family
            && !families.contains(&family)
        {
            families.push(family);
        }
    }
    families
}

/// Whether a player listed as `raw` naturally plays `slot`.
#[must_use]
pub fn fits_slot(raw: &str, slot: Position) -> bool {
    role_families(raw).contains(&slot.family())
}
