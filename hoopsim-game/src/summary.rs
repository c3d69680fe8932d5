//! Narrative-ready digest of a finished career, the payload an external
//! biography writer consumes.
use serde::{Deserialize, Serialize};

use crate::career::{AwardTally, CareerHighs, CareerResult};
use crate::season::{Award, LeaderboardStat};

/// Something worth mentioning about one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub year: u32,
    pub team: String,
    pub awards: Vec<Award>,
    /// Leaderboard categories the player placed in.
    pub leaderboards: Vec<LeaderboardStat>,
    pub pts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerFactSheet {
    pub player_name: String,
    pub position: String,
    pub teams: Vec<String>,
    pub seasons: u32,
    pub games: u32,
    pub awards: AwardTally,
    pub highs: CareerHighs,
    pub hall_of_fame: bool,
    pub hall_of_fame_line: String,
    pub timeline: Vec<TimelineEvent>,
}

impl CareerFactSheet {
    #[must_use]
    pub fn from_career(career: &CareerResult) -> Self {
        let mut teams: Vec<String> = Vec::new();
        for season in &career.seasons {
            if !teams.contains(&season.team) {
                teams.push(season.team.clone());
            }
        }
        let timeline = career
            .seasons
            .iter()
            .filter_map(|season| {
                let leaderboards = season.leaderboards.custom_appearances();
                if season.custom_awards.is_empty() && leaderboards.is_empty() {
                    return None;
                }
                Some(TimelineEvent {
                    year: season.year,
                    team: season.team.clone(),
                    awards: season.custom_awards.to_vec(),
                    leaderboards,
                    pts: season.line.pts,
                })
            })
            .collect();
        Self {
            player_name: career.player_name.clone(),
            position: career.baseline.position.abbrev().to_string(),
            teams,
            seasons: career.total_years,
            games: career.total_games,
            awards: career.awards,
            highs: career.highs,
            hall_of_fame: career.hall_of_fame,
            hall_of_fame_line: hall_of_fame_line(career),
            timeline,
        }
    }
}

fn hall_of_fame_line(career: &CareerResult) -> String {
    let verdict = if career.hall_of_fame {
        "Inducted into the Hall of Fame"
    } else {
        "Not inducted into the Hall of Fame"
    };
    format!(
        "{verdict} after {} seasons ({} MVP, {} All-Pro, {} titles, career score {:.1}).",
        career.total_years,
        career.awards.mvp,
        career.awards.all_pro,
        career.awards.championships,
        career.career_avg_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::CustomPlayerBaseline;
    use crate::position::Position;
    use crate::season::{AwardSet, Leaderboards, SeasonAwards, SeasonRecord, StatLine};

    fn season(year: u32, team: &str, awards: &[Award]) -> SeasonRecord {
        SeasonRecord {
            year,
            team: team.to_string(),
            games: 82,
            wins: 40,
            curve: 1.0,
            line: StatLine::from_counting(20.0, 5.0, 5.0, 1.0, 0.5),
            leaderboards: Leaderboards::default(),
            awards: SeasonAwards::default(),
            custom_awards: awards.iter().copied().collect::<AwardSet>(),
        }
    }

    fn baseline() -> CustomPlayerBaseline {
        CustomPlayerBaseline {
            pts: 20.0,
            ast: 5.0,
            reb: 5.0,
            stl: 1.0,
            blk: 0.5,
            g: 246.0,
            ath: 0.2,
            height: 77.0,
            fg: 0.46,
            position: Position::SmallForward,
            team: "Hawks".to_string(),
        }
    }

    #[test]
    fn fact_sheet_collects_timeline_and_teams() {
        let seasons = vec![
            season(1, "Hawks", &[Award::RookieOfTheYear]),
            season(2, "Hawks", &[]),
            season(3, "Hawks", &[Award::Mvp, Award::AllPro]),
        ];
        let career = CareerResult::from_seasons("Rook", baseline(), seasons);
        let sheet = CareerFactSheet::from_career(&career);
        assert_eq!(sheet.teams, vec!["Hawks".to_string()]);
        assert_eq!(sheet.position, "SF");
        assert_eq!(sheet.timeline.len(), 2);
        assert_eq!(sheet.timeline[1].year, 3);
        assert_eq!(sheet.timeline[1].awards, vec![Award::Mvp, Award::AllPro]);
        assert_eq!(sheet.awards.mvp, 1);
        assert!(sheet.hall_of_fame_line.contains("after 3 seasons"));
        assert_eq!(sheet.hall_of_fame, career.hall_of_fame);
    }
}
