//! Historical roster records consumed by the engine.
//!
//! The loader that produces these records lives outside the engine; this
//! module only fixes the shape of the feed and the lenient numeric rules
//! applied when reading it.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::numbers::stat_or_zero;

/// Errors raised while decoding a roster feed.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster feed is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("roster feed contains no players")]
    Empty,
    #[error("roster feed could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// A historical player's season-average line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub debut_year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub games: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pts: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ast: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub blk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fg_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub per: Option<f64>,
    #[serde(default, deserialize_with = "lenient_height")]
    pub height: Option<f64>,
}

impl PlayerRecord {
    /// Convenience constructor used by fixtures and callers assembling
    /// records by hand.
    #[must_use]
    pub fn new(name: &str, position: &str) -> Self {
        Self {
            name: name.to_string(),
            position: position.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn games(&self) -> f64 {
        stat_or_zero(self.games)
    }

    #[must_use]
    pub fn pts(&self) -> f64 {
        stat_or_zero(self.pts)
    }

    #[must_use]
    pub fn ast(&self) -> f64 {
        stat_or_zero(self.ast)
    }

    #[must_use]
    pub fn reb(&self) -> f64 {
        stat_or_zero(self.reb)
    }

    #[must_use]
    pub fn stl(&self) -> f64 {
        stat_or_zero(self.stl)
    }

    #[must_use]
    pub fn blk(&self) -> f64 {
        stat_or_zero(self.blk)
    }

    #[must_use]
    pub fn per(&self) -> f64 {
        stat_or_zero(self.per)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        stat_or_zero(self.height)
    }

    /// Field-goal percentage normalized to the 0–1 range.
    #[must_use]
    pub fn fg_fraction(&self) -> f64 {
        let raw = stat_or_zero(self.fg_pct);
        if raw > 1.0 { raw / 100.0 } else { raw }
    }
}

/// Ten-year debut window used to filter the historical pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    #[default]
    All,
    Decade(u32),
}

impl Era {
    /// Era starting at the decade containing `year`.
    #[must_use]
    pub const fn decade(year: u32) -> Self {
        Self::Decade(year - year % 10)
    }

    /// Whether a record debuted inside this window. Records without a debut
    /// year only match the unfiltered era.
    #[must_use]
    pub fn contains(self, record: &PlayerRecord) -> bool {
        match self {
            Self::All => true,
            Self::Decade(start) => record
                .debut_year
                .and_then(|year| year.checked_sub(start))
                .is_some_and(|offset| offset < 10),
        }
    }

    /// Key used for the per-era team table, e.g. `1990s`.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Decade(start) => format!("{start}s"),
        }
    }
}

/// The full input feed: players plus team names grouped by era key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RosterFeed {
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<String>>,
}

impl RosterFeed {
    /// Decode a feed from JSON.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Parse` on malformed JSON and
    /// `RosterError::Empty` when the player list is empty.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let feed: Self = serde_json::from_str(json)?;
        if feed.players.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(feed)
    }

    /// Players whose debut falls inside `era`, in feed order.
    #[must_use]
    pub fn era_pool(&self, era: Era) -> Vec<PlayerRecord> {
        self.players
            .iter()
            .filter(|record| era.contains(record))
            .cloned()
            .collect()
    }

    /// Team names for `era`, falling back to the `all` table, then to every
    /// name listed anywhere in the feed.
    #[must_use]
    pub fn teams_for(&self, era: Era) -> Vec<String> {
        if let Some(teams) = self.teams.get(&era.key())
            && !teams.is_empty()
        {
            return teams.clone();
        }
        if let Some(teams) = self.teams.get(&Era::All.key())
            && !teams.is_empty()
        {
            return teams.clone();
        }
        let mut all: Vec<String> = self.teams.values().flatten().cloned().collect();
        all.sort();
        all.dedup();
        all
    }

    /// Look up a player by exact name, falling back to a case-insensitive
    /// match.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PlayerRecord> {
        let needle = name.trim();
        self.players
            .iter()
            .find(|record| record.name == needle)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|record| record.name.eq_ignore_ascii_case(needle))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn parse_number(raw: Option<RawNumber>) -> Option<f64> {
    let value = match raw? {
        RawNumber::Number(value) => value,
        RawNumber::Text(text) => text.trim().trim_end_matches('%').parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer).unwrap_or(None);
    Ok(parse_number(raw))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(value
        .filter(|year| *year >= 0.0)
        .map(crate::numbers::round_f64_to_u32))
}

fn lenient_height<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawNumber::Text(text)) => parse_height_text(&text),
        other => parse_number(other),
    })
}

/// Parse heights given either as inches ("81") or `feet-inches` ("6-9").
fn parse_height_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if let Some((feet, inches)) = trimmed.split_once(['-', '\'']) {
        let feet: f64 = feet.trim().parse().ok()?;
        let inches: f64 = inches.trim().trim_end_matches('"').parse().unwrap_or(0.0);
        let total = feet.mul_add(12.0, inches);
        return total.is_finite().then_some(total);
    }
    parse_number(Some(RawNumber::Text(trimmed.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_fields_accept_strings_and_garbage() {
        let json = r#"{
            "players": [
                {
                    "name": "Test Guard",
                    "position": "Guard-Forward",
                    "debut_year": "1991",
                    "games": "812",
                    "pts": 21.4,
                    "ast": "N/A",
                    "reb": "",
                    "fg_pct": "48.5%",
                    "per": null,
                    "height": "6-7"
                }
            ]
        }"#;
        let feed = RosterFeed::from_json(json).unwrap();
        let record = &feed.players[0];
        assert_eq!(record.debut_year, Some(1991));
        assert!((record.games() - 812.0).abs() < f64::EPSILON);
        assert!(record.ast.is_none());
        assert!(record.ast().abs() < f64::EPSILON);
        assert!(record.reb().abs() < f64::EPSILON);
        assert!((record.fg_fraction() - 0.485).abs() < 1e-9);
        assert!(record.per.is_none());
        assert!((record.height() - 79.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_feed_is_rejected() {
        let err = RosterFeed::from_json(r#"{"players": []}"#).unwrap_err();
        assert!(matches!(err, RosterError::Empty));
        assert!(matches!(
            RosterFeed::from_json("not json").unwrap_err(),
            RosterError::Parse(_)
        ));
    }

    #[test]
    fn era_window_filters_on_debut() {
        let mut early = PlayerRecord::new("Early", "C");
        early.debut_year = Some(1984);
        let mut late = PlayerRecord::new("Late", "PG");
        late.debut_year = Some(1996);
        let unknown = PlayerRecord::new("Unknown", "SF");
        let feed = RosterFeed {
            players: vec![early, late, unknown],
            teams: BTreeMap::new(),
        };
        let nineties = feed.era_pool(Era::decade(1993));
        assert_eq!(nineties.len(), 1);
        assert_eq!(nineties[0].name, "Late");
        assert_eq!(feed.era_pool(Era::All).len(), 3);
        assert_eq!(Era::decade(1993).key(), "1990s");
    }

    #[test]
    fn far_future_decades_do_not_overflow() {
        let era = Era::decade(u32::MAX);
        assert_eq!(era, Era::Decade(4_294_967_290));
        let mut record = PlayerRecord::new("Last", "C");
        record.debut_year = Some(u32::MAX);
        assert!(era.contains(&record));
        record.debut_year = Some(1990);
        assert!(!era.contains(&record));
    }

    #[test]
    fn team_lookup_falls_back_to_all() {
        let mut teams = BTreeMap::new();
        teams.insert("all".to_string(), vec!["Bulls".to_string()]);
        teams.insert("1980s".to_string(), vec!["Celtics".to_string()]);
        let feed = RosterFeed {
            players: vec![PlayerRecord::new("A", "G")],
            teams,
        };
        assert_eq!(feed.teams_for(Era::Decade(1980)), vec!["Celtics"]);
        assert_eq!(feed.teams_for(Era::Decade(2000)), vec!["Bulls"]);
    }

    #[test]
    fn find_is_case_insensitive_fallback() {
        let feed = RosterFeed {
            players: vec![PlayerRecord::new("Larry Bird", "F")],
            teams: BTreeMap::new(),
        };
        assert!(feed.find("larry bird").is_some());
        assert!(feed.find("Magic").is_none());
    }
}
