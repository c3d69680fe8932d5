//! Advanced career metrics over the per-season scoring series.
use serde::{Deserialize, Serialize};

use crate::constants::{GAMES_PER_SEASON, LONGEVITY_STD_FACTOR};
use crate::numbers::{mean, population_std};
use crate::season::SeasonRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AdvancedMetrics {
    /// Population standard deviation of season points.
    pub variance_index: f64,
    /// Seasons at or above replacement level.
    pub longevity_score: u32,
    /// Best season relative to the career mean.
    pub peak_ratio: f64,
    /// Mean of `pts * wins / 82` across seasons.
    pub team_impact: f64,
}

impl AdvancedMetrics {
    #[must_use]
    pub fn from_seasons(seasons: &[SeasonRecord]) -> Self {
        let pts: Vec<f64> = seasons.iter().map(|season| season.line.pts).collect();
        let impact: Vec<(f64, f64)> = seasons
            .iter()
            .map(|season| (season.line.pts, f64::from(season.wins)))
            .collect();
        Self {
            variance_index: variance_index(&pts),
            longevity_score: longevity_score(&pts),
            peak_ratio: peak_ratio(&pts),
            team_impact: team_impact(&impact),
        }
    }
}

#[must_use]
pub fn variance_index(pts: &[f64]) -> f64 {
    population_std(pts)
}

/// Seasons scoring at least `mean - 0.5 * std` points.
#[must_use]
pub fn longevity_score(pts: &[f64]) -> u32 {
    let floor = LONGEVITY_STD_FACTOR.mul_add(-population_std(pts), mean(pts));
    let count = pts.iter().filter(|value| **value >= floor).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Peak season over the career mean; 1.0 for an empty or zero-mean series.
#[must_use]
pub fn peak_ratio(pts: &[f64]) -> f64 {
    let avg = mean(pts);
    if pts.is_empty() || avg == 0.0 {
        return 1.0;
    }
    pts.iter().copied().fold(f64::NEG_INFINITY, f64::max) / avg
}

/// Mean points-times-win-share over seasons where both values are finite.
#[must_use]
pub fn team_impact(seasons: &[(f64, f64)]) -> f64 {
    let games = f64::from(GAMES_PER_SEASON);
    let samples: Vec<f64> = seasons
        .iter()
        .filter(|(pts, wins)| pts.is_finite() && wins.is_finite())
        .map(|(pts, wins)| pts * wins / games)
        .collect();
    mean(&samples)
}
