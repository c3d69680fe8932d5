use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use hoopsim_game::{
    CareerFactSheet, CareerResult, LeaderboardStat, MatchResult, SeasonRecord, TournamentBracket,
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReportBody {
    Career(CareerReport),
    Matchup { result: MatchResult },
    Tournament { bracket: TournamentBracket },
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerReport {
    pub career: CareerResult,
    pub fact_sheet: CareerFactSheet,
}

impl Report {
    pub fn new(seed: Option<u64>, body: ReportBody) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            seed,
            body,
        }
    }

    pub fn career(seed: Option<u64>, career: CareerResult) -> Self {
        let fact_sheet = CareerFactSheet::from_career(&career);
        Self::new(seed, ReportBody::Career(CareerReport { career, fact_sheet }))
    }
}

fn season_awards(season: &SeasonRecord) -> String {
    season
        .custom_awards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn board_marks(season: &SeasonRecord) -> String {
    season
        .leaderboards
        .custom_appearances()
        .into_iter()
        .map(LeaderboardStat::label)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn generate_json_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_console_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    match &report.body {
        ReportBody::Career(career) => console_career(out, career)?,
        ReportBody::Matchup { result } => console_match(out, result)?,
        ReportBody::Tournament { bracket } => console_tournament(out, bracket)?,
    }
    if let Some(seed) = report.seed {
        writeln!(out, "Seed: {seed}")?;
    }
    Ok(())
}

fn console_career(out: &mut dyn Write, report: &CareerReport) -> Result<()> {
    let career = &report.career;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("🏀 Career of {}", career.player_name)
            .bright_cyan()
            .bold()
    )?;
    writeln!(out, "{}", "==============================".cyan())?;
    writeln!(
        out,
        "{:>4}  {:<14} {:>3} {:>3} {:>5} {:>5} {:>5} {:>4} {:>4} {:>5}  Awards",
        "Year", "Team", "G", "W", "PTS", "AST", "REB", "STL", "BLK", "PER"
    )?;
    for season in &career.seasons {
        let line = &season.line;
        let awards = season_awards(season);
        writeln!(
            out,
            "{:>4}  {:<14} {:>3} {:>3} {:>5.1} {:>5.1} {:>5.1} {:>4.1} {:>4.1} {:>5.1}  {}",
            season.year,
            season.team,
            season.games,
            season.wins,
            line.pts,
            line.ast,
            line.reb,
            line.stl,
            line.blk,
            line.per,
            awards.yellow()
        )?;
    }
    writeln!(out)?;

    let awards = &career.awards;
    writeln!(out, "{}", "🏆 Honors".bright_yellow().bold())?;
    writeln!(
        out,
        "MVP: {}  ROY: {}  MIP: {}  Titles: {}  Finals MVP: {}  All-Pro: {}",
        awards.mvp,
        awards.rookie_of_the_year,
        awards.most_improved,
        awards.championships,
        awards.finals_mvp,
        awards.all_pro
    )?;
    let verdict = report.fact_sheet.hall_of_fame_line.as_str();
    if career.hall_of_fame {
        writeln!(out, "{}", verdict.green().bold())?;
    } else {
        writeln!(out, "{}", verdict.red())?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "📈 Career Metrics".bright_blue().bold())?;
    writeln!(
        out,
        "Seasons: {}  Games: {}  Avg score: {:.2}",
        career.total_years, career.total_games, career.career_avg_score
    )?;
    let metrics = &career.metrics;
    writeln!(
        out,
        "Variance index: {:.2}  Longevity: {}  Peak ratio: {:.2}  Team impact: {:.2}",
        metrics.variance_index, metrics.longevity_score, metrics.peak_ratio, metrics.team_impact
    )?;
    let totals = &career.totals;
    writeln!(
        out,
        "Totals: {:.0} pts, {:.0} ast, {:.0} reb, {:.0} stl, {:.0} blk",
        totals.pts, totals.ast, totals.reb, totals.stl, totals.blk
    )?;
    let highs = &career.highs;
    writeln!(
        out,
        "Highs: {:.1} pts (Y{}), {:.1} ast (Y{}), {:.1} reb (Y{}), {:.1} PER (Y{})",
        highs.pts.value,
        highs.pts.year,
        highs.ast.value,
        highs.ast.year,
        highs.reb.value,
        highs.reb.year,
        highs.per.value,
        highs.per.year
    )?;
    Ok(())
}

fn console_match(out: &mut dyn Write, result: &MatchResult) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("🏀 {} vs {}", result.name_a, result.name_b)
            .bright_cyan()
            .bold()
    )?;
    writeln!(out, "{}", "==============================".cyan())?;
    for line in &result.narrative {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Final: {} {} - {} {}",
        result.name_a, result.score_a, result.score_b, result.name_b
    )?;
    writeln!(out, "Winner: {}", result.winner_name().green().bold())?;
    if !result.key_factors.is_empty() {
        writeln!(out, "Key factors:")?;
        for factor in &result.key_factors {
            writeln!(
                out,
                "  • {}",
                factor.describe(&result.name_a, &result.name_b)
            )?;
        }
    }
    Ok(())
}

fn console_tournament(out: &mut dyn Write, bracket: &TournamentBracket) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("🏆 Tournament ({} entrants)", bracket.entrants.len())
            .bright_cyan()
            .bold()
    )?;
    writeln!(out, "{}", "==============================".cyan())?;
    for round in &bracket.rounds {
        writeln!(out, "{}", format!("Round {}", round.number).bold())?;
        if let Some(bye) = &round.bye {
            writeln!(out, "  {bye} advances on a bye")?;
        }
        for game in &round.games {
            writeln!(
                out,
                "  {} def. {} {}",
                game.winner_name(),
                game.loser_name(),
                game.scoreline()
            )?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Champion: {}", bracket.champion.green().bold())?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    match &report.body {
        ReportBody::Career(career) => markdown_career(out, career)?,
        ReportBody::Matchup { result } => markdown_match(out, result)?,
        ReportBody::Tournament { bracket } => markdown_tournament(out, bracket)?,
    }
    writeln!(out)?;
    writeln!(out, "_Generated at {}_", report.generated_at)?;
    Ok(())
}

fn markdown_career(out: &mut dyn Write, report: &CareerReport) -> Result<()> {
    let career = &report.career;
    writeln!(out, "# Hoopsim Career: {}\n", career.player_name)?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Seasons**: {}", career.total_years)?;
    writeln!(out, "- **Games**: {}", career.total_games)?;
    writeln!(out, "- **Career score**: {:.2}", career.career_avg_score)?;
    writeln!(out, "- **MVP**: {}", career.awards.mvp)?;
    writeln!(out, "- **All-Pro**: {}", career.awards.all_pro)?;
    writeln!(out, "- **Championships**: {}", career.awards.championships)?;
    writeln!(out, "- **Hall of Fame**: {}\n", report.fact_sheet.hall_of_fame_line)?;

    writeln!(out, "## Seasons\n")?;
    writeln!(out, "| Year | Team | G | W | PTS | AST | REB | STL | BLK | PER | Leaders | Awards |")?;
    writeln!(out, "|---:|---|---:|---:|---:|---:|---:|---:|---:|---:|---|---|")?;
    for season in &career.seasons {
        let line = &season.line;
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {} | {} |",
            season.year,
            season.team,
            season.games,
            season.wins,
            line.pts,
            line.ast,
            line.reb,
            line.stl,
            line.blk,
            line.per,
            board_marks(season),
            season_awards(season)
        )?;
    }
    writeln!(out)?;

    let metrics = &career.metrics;
    writeln!(out, "## Advanced Metrics\n")?;
    writeln!(out, "- **Career variance index**: {:.2}", metrics.variance_index)?;
    writeln!(out, "- **Longevity score**: {}", metrics.longevity_score)?;
    writeln!(out, "- **Peak vs consistency**: {:.2}", metrics.peak_ratio)?;
    writeln!(out, "- **Team impact**: {:.2}", metrics.team_impact)?;
    Ok(())
}

fn markdown_match(out: &mut dyn Write, result: &MatchResult) -> Result<()> {
    writeln!(out, "# Hoopsim Matchup: {} vs {}\n", result.name_a, result.name_b)?;
    writeln!(
        out,
        "**Final**: {} {} - {} {}\n",
        result.name_a, result.score_a, result.score_b, result.name_b
    )?;
    writeln!(out, "## Play-by-play\n")?;
    for line in &result.narrative {
        writeln!(out, "- {line}")?;
    }
    if !result.key_factors.is_empty() {
        writeln!(out, "\n## Key Factors\n")?;
        for factor in &result.key_factors {
            writeln!(out, "- {}", factor.describe(&result.name_a, &result.name_b))?;
        }
    }
    Ok(())
}

fn markdown_tournament(out: &mut dyn Write, bracket: &TournamentBracket) -> Result<()> {
    writeln!(out, "# Hoopsim Tournament\n")?;
    writeln!(out, "- **Entrants**: {}", bracket.entrants.join(", "))?;
    writeln!(out, "- **Champion**: {}\n", bracket.champion)?;
    for round in &bracket.rounds {
        writeln!(out, "## Round {}\n", round.number)?;
        if let Some(bye) = &round.bye {
            writeln!(out, "- _Bye_: {bye}")?;
        }
        for game in &round.games {
            writeln!(
                out,
                "- {} def. {} ({})",
                game.winner_name(),
                game.loser_name(),
                game.scoreline()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
