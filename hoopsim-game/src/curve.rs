//! Career arc model: rise, peak and decline as a multiplicative factor.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CURVE_DECLINE_FLOOR, CURVE_DECLINE_FLOOR_G, CURVE_G_OFFSET, CURVE_G_SPAN, CURVE_PEAK_CEIL,
    CURVE_PEAK_CEIL_G, CURVE_START_FLOOR, CURVE_START_FLOOR_G, GAMES_PER_SEASON,
};
use crate::numbers::{finite_or_zero, lerp_steps, round_f64_to_u32};

/// Shape parameters of one career arc, derived from longevity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveShape {
    pub g_norm: f64,
    pub peak_start: u32,
    pub peak_end: u32,
    pub total_years: u32,
    pub start_floor: f64,
    pub peak_ceil: f64,
    pub decline_floor: f64,
}

impl CurveShape {
    #[must_use]
    pub fn new(longevity_games: f64, total_years: u32) -> Self {
        let g_norm = ((finite_or_zero(longevity_games) - CURVE_G_OFFSET) / CURVE_G_SPAN).clamp(0.0, 1.0);
        let peak_start = round_f64_to_u32(2.0f64.mul_add(g_norm, 2.0));
        let peak_length = round_f64_to_u32(3.0f64.mul_add(g_norm, 1.0));
        let total_years = total_years.max(1);
        let peak_end = total_years.min(peak_start + peak_length - 1);
        Self {
            g_norm,
            peak_start,
            peak_end,
            total_years,
            start_floor: CURVE_START_FLOOR_G.mul_add(g_norm, CURVE_START_FLOOR),
            peak_ceil: CURVE_PEAK_CEIL_G.mul_add(g_norm, CURVE_PEAK_CEIL),
            decline_floor: CURVE_DECLINE_FLOOR_G.mul_add(g_norm, CURVE_DECLINE_FLOOR),
        }
    }

    /// Value reached at the end of the peak. A single-year peak never
    /// climbs past 1.0, so the decline starts from there instead of the
    /// ceiling and the arc stays continuous.
    #[must_use]
    pub fn peak_top(&self) -> f64 {
        if self.peak_end > self.peak_start {
            self.peak_ceil
        } else {
            1.0
        }
    }

    /// Factor for 1-based `year`.
    #[must_use]
    pub fn factor(&self, year: u32) -> f64 {
        self.factor_at(f64::from(year))
    }

    /// Factor at a fractional year position; integer positions match
    /// [`CurveShape::factor`].
    #[must_use]
    pub fn factor_at(&self, year: f64) -> f64 {
        let start = f64::from(self.peak_start);
        let end = f64::from(self.peak_end);
        if year < start {
            lerp_steps(self.start_floor, 1.0, year - 1.0, start - 1.0)
        } else if year <= end {
            lerp_steps(1.0, self.peak_ceil, year - start, end - start)
        } else {
            lerp_steps(
                self.peak_top(),
                self.decline_floor,
                year - end,
                f64::from(self.total_years) - end,
            )
        }
    }
}

/// Performance multiplier for `year_index` (1-based) of a career with the
/// given longevity and length.
#[must_use]
pub fn curve_factor(year_index: u32, longevity_games: f64, total_years: u32) -> f64 {
    CurveShape::new(longevity_games, total_years).factor(year_index)
}

/// Career length in seasons: `round(G / 82)`, at least one, at most `max_years`.
#[must_use]
pub fn total_years(longevity_games: f64, max_years: u32) -> u32 {
    let seasons = round_f64_to_u32(finite_or_zero(longevity_games) / f64::from(GAMES_PER_SEASON));
    seasons.max(1).min(max_years.max(1))
}

/// Career games split across seasons: even shares, remainder to the
/// earliest seasons. The shares always sum to the rounded total, so a
/// career squeezed by the season cap plays over-full schedules.
#[must_use]
pub fn games_by_season(longevity_games: f64, total_years: u32) -> Vec<u32> {
    let total = round_f64_to_u32(finite_or_zero(longevity_games));
    let years = total_years.max(1);
    let share = total / years;
    let remainder = total % years;
    (0..years)
        .map(|idx| {
            let extra = u32::from(idx < remainder);
            share + extra
        })
        .collect()
}
