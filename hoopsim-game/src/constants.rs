//! Centralized balance and tuning constants for the hoopsim engine.
//!
//! These values define the deterministic math for the core simulation.
//! Tunables that callers may override live in `SimulationConfig`; the
//! values here are fixed design constants.

// Stat caps ------------------------------------------------------------------
pub(crate) const CAP_PTS: f64 = 45.0;
pub(crate) const CAP_AST: f64 = 15.0;
pub(crate) const CAP_REB: f64 = 18.0;
pub(crate) const CAP_STL: f64 = 3.5;
pub(crate) const CAP_BLK: f64 = 3.5;

// Derived PER ----------------------------------------------------------------
pub(crate) const PER_BASE: f64 = 10.0;
pub(crate) const PER_W_PTS: f64 = 0.55;
pub(crate) const PER_W_AST: f64 = 0.45;
pub(crate) const PER_W_REB: f64 = 0.35;
pub(crate) const PER_W_STL: f64 = 1.3;
pub(crate) const PER_W_BLK: f64 = 1.2;
pub(crate) const PER_MIN: f64 = 8.0;
pub(crate) const PER_MAX: f64 = 32.0;

// Composite award score ------------------------------------------------------
pub(crate) const SCORE_W_PTS: f64 = 0.55;
pub(crate) const SCORE_W_REB: f64 = 0.30;
pub(crate) const SCORE_W_AST: f64 = 0.25;
pub(crate) const SCORE_W_PER: f64 = 0.15;
pub(crate) const SCORE_W_STL: f64 = 0.4;
pub(crate) const SCORE_W_BLK: f64 = 0.4;

// Season structure -----------------------------------------------------------
pub const GAMES_PER_SEASON: u32 = 82;
pub(crate) const YEAR_VARIANCE_MIN: f64 = 0.85;
pub(crate) const YEAR_VARIANCE_MAX: f64 = 1.1;
pub(crate) const ATHLETICISM_VARIANCE_SHIFT: f64 = 0.02;
pub(crate) const MIP_PROXY_MIN: f64 = 0.80;
pub(crate) const MIP_PROXY_MAX: f64 = 1.05;
pub(crate) const WINS_FLOOR: f64 = 20.0;
pub(crate) const WINS_CEILING: f64 = 60.0;

// Career curve ---------------------------------------------------------------
pub(crate) const CURVE_G_OFFSET: f64 = 300.0;
pub(crate) const CURVE_G_SPAN: f64 = 1_200.0;
pub(crate) const CURVE_START_FLOOR: f64 = 0.75;
pub(crate) const CURVE_START_FLOOR_G: f64 = 0.08;
pub(crate) const CURVE_PEAK_CEIL: f64 = 1.08;
pub(crate) const CURVE_PEAK_CEIL_G: f64 = 0.12;
pub(crate) const CURVE_DECLINE_FLOOR: f64 = 0.82;
pub(crate) const CURVE_DECLINE_FLOOR_G: f64 = 0.05;

// Athleticism ----------------------------------------------------------------
pub(crate) const ATH_W_PER: f64 = 0.45;
pub(crate) const ATH_W_FG: f64 = 0.20;
pub(crate) const ATH_W_REB: f64 = 0.20;
pub(crate) const ATH_W_DURABILITY: f64 = 0.10;
pub(crate) const ATH_W_HEIGHT: f64 = 0.05;
pub(crate) const ATH_PER_PIVOT: f64 = 15.0;
pub(crate) const ATH_PER_SCALE: f64 = 10.0;
pub(crate) const ATH_PER_LIMIT: f64 = 1.5;
pub(crate) const ATH_FG_PIVOT: f64 = 0.45;
pub(crate) const ATH_FG_SCALE: f64 = 4.0;
pub(crate) const ATH_REB_CAP: f64 = 1.2;
pub(crate) const ATH_DURABILITY_GAMES: f64 = 1_200.0;
pub(crate) const ATH_HEIGHT_PIVOT: f64 = 78.0;

// Hall of Fame ---------------------------------------------------------------
pub(crate) const HOF_MVP_MIN: u32 = 1;
pub(crate) const HOF_MVP_SCORE: f64 = 20.0;
pub(crate) const HOF_ALL_PRO_MIN: u32 = 6;
pub(crate) const HOF_ALL_PRO_SCORE: f64 = 18.0;
pub(crate) const HOF_TITLES_MIN: u32 = 2;
pub(crate) const HOF_TITLES_ALL_PRO_MIN: u32 = 3;
pub(crate) const HOF_TITLES_SCORE: f64 = 17.0;
pub(crate) const HOF_DYNASTY_MVP_MIN: u32 = 4;
pub(crate) const HOF_DYNASTY_ALL_PRO_MIN: u32 = 7;
pub(crate) const LONGEVITY_STD_FACTOR: f64 = 0.5;

// Matchup scoring ------------------------------------------------------------
pub(crate) const MATCH_W_PTS: f64 = 1.0;
pub(crate) const MATCH_W_AST: f64 = 0.4;
pub(crate) const MATCH_W_REB: f64 = 0.25;
pub(crate) const MATCH_W_PER: f64 = 0.3;
pub(crate) const MATCH_W_FG: f64 = 0.2;
pub(crate) const MATCH_W_IMPACT: f64 = 0.35;
pub(crate) const MATCH_SOLO_DIVISOR: f64 = 2.0;
pub(crate) const MATCH_TEAM_DIVISOR: f64 = 10.0;
pub(crate) const MATCH_SOLO_PACE: f64 = 100.0;
pub(crate) const MATCH_TEAM_PACE: f64 = 110.0;
pub(crate) const MATCH_SCORE_MIN: f64 = 60.0;
pub(crate) const MATCH_SCORE_MAX: f64 = 140.0;
pub(crate) const MATCH_VARIANCE: f64 = 4.0;
pub(crate) const MATCH_MAX_MOMENTS: usize = 3;
pub(crate) const MATCH_KEY_FACTORS: usize = 3;
pub(crate) const MATCH_SEED_SEPARATOR: &str = "::";

// Draft roles ----------------------------------------------------------------
pub(crate) const ROLE_FIT_IN_POSITION: f64 = 1.0;
pub(crate) const ROLE_FIT_OFF_POSITION: f64 = 0.8;
