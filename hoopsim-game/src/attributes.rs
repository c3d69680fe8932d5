//! Attribute picks and the custom player baseline they compose into.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    ATH_DURABILITY_GAMES, ATH_FG_PIVOT, ATH_FG_SCALE, ATH_HEIGHT_PIVOT, ATH_PER_LIMIT,
    ATH_PER_PIVOT, ATH_PER_SCALE, ATH_REB_CAP, ATH_W_DURABILITY, ATH_W_FG, ATH_W_HEIGHT,
    ATH_W_PER, ATH_W_REB,
};
use crate::error::ValidationError;
use crate::numbers::finite_or_zero;
use crate::position::Position;
use crate::roster::PlayerRecord;

/// The eight canonical attributes a custom player is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Shooting,
    Passing,
    Rebounding,
    Steals,
    Blocks,
    Longevity,
    Athleticism,
    Height,
}

impl AttributeKey {
    pub const ALL: [Self; 8] = [
        Self::Shooting,
        Self::Passing,
        Self::Rebounding,
        Self::Steals,
        Self::Blocks,
        Self::Longevity,
        Self::Athleticism,
        Self::Height,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shooting => "shooting",
            Self::Passing => "passing",
            Self::Rebounding => "rebounding",
            Self::Steals => "steals",
            Self::Blocks => "blocks",
            Self::Longevity => "longevity",
            Self::Athleticism => "athleticism",
            Self::Height => "height",
        }
    }

    /// Value this attribute contributes when `record` is the source.
    #[must_use]
    pub fn derive_value(self, record: &PlayerRecord) -> f64 {
        match self {
            Self::Shooting => record.pts(),
            Self::Passing => record.ast(),
            Self::Rebounding => record.reb(),
            Self::Steals => record.stl(),
            Self::Blocks => record.blk(),
            Self::Longevity => record.games(),
            Self::Athleticism => athleticism(record),
            Self::Height => record.height(),
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttributeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.label() == needle)
            .ok_or_else(|| format!("unknown attribute `{s}`"))
    }
}

/// Attributes the loaded dataset can support, computed once after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAttributes(BTreeSet<AttributeKey>);

impl AvailableAttributes {
    /// Every canonical attribute.
    #[must_use]
    pub fn all() -> Self {
        Self(AttributeKey::ALL.into_iter().collect())
    }

    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = AttributeKey>) -> Self {
        Self(keys.into_iter().collect())
    }

    /// Inspect which optional columns hold finite data anywhere in the
    /// roster. Scoring, passing, rebounding and longevity are core columns
    /// and always active; athleticism needs PER.
    #[must_use]
    pub fn detect(players: &[PlayerRecord]) -> Self {
        let mut keys = BTreeSet::from([
            AttributeKey::Shooting,
            AttributeKey::Passing,
            AttributeKey::Rebounding,
            AttributeKey::Longevity,
        ]);
        let present = |read: fn(&PlayerRecord) -> Option<f64>| {
            players
                .iter()
                .any(|record| read(record).is_some_and(f64::is_finite))
        };
        if present(|r| r.stl) {
            keys.insert(AttributeKey::Steals);
        }
        if present(|r| r.blk) {
            keys.insert(AttributeKey::Blocks);
        }
        if present(|r| r.per) {
            keys.insert(AttributeKey::Athleticism);
        }
        if present(|r| r.height) {
            keys.insert(AttributeKey::Height);
        }
        Self(keys)
    }

    #[must_use]
    pub fn contains(&self, key: AttributeKey) -> bool {
        self.0.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = AttributeKey> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One attribute taken from one historical player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePick {
    pub key: AttributeKey,
    pub source: PlayerRecord,
    pub value: f64,
}

impl AttributePick {
    #[must_use]
    pub fn new(key: AttributeKey, source: &PlayerRecord) -> Self {
        Self {
            key,
            value: key.derive_value(source),
            source: source.clone(),
        }
    }
}

/// The user's picks, at most one source per attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributePicks {
    picks: BTreeMap<AttributeKey, AttributePick>,
}

impl AttributePicks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `source` to `key`, replacing any earlier pick for that key.
    pub fn pick(&mut self, key: AttributeKey, source: &PlayerRecord) -> &mut Self {
        self.picks.insert(key, AttributePick::new(key, source));
        self
    }

    #[must_use]
    pub fn get(&self, key: AttributeKey) -> Option<&AttributePick> {
        self.picks.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributePick> {
        self.picks.values()
    }

    fn value(&self, key: AttributeKey) -> f64 {
        self.picks.get(&key).map_or(0.0, |pick| finite_or_zero(pick.value))
    }

    /// Check that every active attribute has a pick and no pick targets an
    /// inactive attribute.
    ///
    /// # Errors
    ///
    /// Returns the first missing or unavailable attribute in canonical order.
    pub fn validate(&self, available: &AvailableAttributes) -> Result<(), ValidationError> {
        if let Some(missing) = available.iter().find(|key| !self.picks.contains_key(key)) {
            return Err(ValidationError::MissingAttribute(missing));
        }
        if let Some(extra) = self.picks.keys().find(|key| !available.contains(**key)) {
            return Err(ValidationError::UnavailableAttribute(*extra));
        }
        Ok(())
    }

    /// Compose the picks into a baseline.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when an active attribute is unset, when a
    /// pick targets an inactive attribute, or when `team` is blank.
    pub fn build_baseline(
        &self,
        available: &AvailableAttributes,
        position: Position,
        team: &str,
    ) -> Result<CustomPlayerBaseline, ValidationError> {
        self.validate(available)?;
        let team = team.trim();
        if team.is_empty() {
            return Err(ValidationError::MissingTeam);
        }
        let fg = self
            .get(AttributeKey::Shooting)
            .map_or(0.0, |pick| pick.source.fg_fraction());
        Ok(CustomPlayerBaseline {
            pts: self.value(AttributeKey::Shooting),
            ast: self.value(AttributeKey::Passing),
            reb: self.value(AttributeKey::Rebounding),
            stl: self.value(AttributeKey::Steals),
            blk: self.value(AttributeKey::Blocks),
            g: self.value(AttributeKey::Longevity),
            ath: self.value(AttributeKey::Athleticism),
            height: self.value(AttributeKey::Height),
            fg,
            position,
            team: team.to_string(),
        })
    }
}

/// The composed stat vector a custom player starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPlayerBaseline {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
    /// Career games, taken from the longevity source.
    pub g: f64,
    pub ath: f64,
    pub height: f64,
    /// Field-goal fraction of the shooting source.
    pub fg: f64,
    pub position: Position,
    pub team: String,
}

/// Athleticism rating derived from a source player's efficiency, shooting,
/// rebounding, durability and size. A missing or zero PER means the
/// player cannot be assessed and yields 0.
#[must_use]
pub fn athleticism(record: &PlayerRecord) -> f64 {
    let per = record.per();
    if per == 0.0 {
        return 0.0;
    }
    let per_norm = ((per - ATH_PER_PIVOT) / ATH_PER_SCALE).clamp(-ATH_PER_LIMIT, ATH_PER_LIMIT);
    let fg_bonus = (record.fg_fraction() - ATH_FG_PIVOT) * ATH_FG_SCALE;
    let reb_bonus = (record.reb() / 10.0).min(ATH_REB_CAP);
    let durability = (record.games() / ATH_DURABILITY_GAMES).min(1.0);
    let height_bonus = (record.height() - ATH_HEIGHT_PIVOT) / 12.0;
    ATH_W_PER * per_norm
        + ATH_W_FG * fg_bonus
        + ATH_W_REB * reb_bonus
        + ATH_W_DURABILITY * durability
        + ATH_W_HEIGHT * height_bonus
}
