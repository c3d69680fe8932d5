mod logic;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use hoopsim_game::{
    CareerSetup, CosmeticRng, DEFAULT_PLAYER_NAME, Entity, Era, Position, SimulationEngine,
    run_tournament, simulate_game,
};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use logic::reports::{
    ReportBody, generate_console_report, generate_json_report, generate_markdown_report,
};
use logic::{Report, TesterAssets, parse_picks, parse_teams, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Simulate a custom player's career
    Career,
    /// Resolve one head-to-head game
    Matchup,
    /// Run a single-elimination bracket
    Tournament,
}

#[derive(Debug, Parser)]
#[command(name = "hoopsim-tester", version = "0.1.0")]
#[command(about = "Basketball career and matchup simulator driven from historical rosters")]
struct Args {
    /// What to simulate
    #[arg(long, value_enum, default_value_t = RunMode::Career)]
    mode: RunMode,

    /// Roster feed JSON (defaults to the bundled sample roster)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Restrict the pool to players who debuted in this decade
    #[arg(long)]
    era: Option<u32>,

    /// Tuning overlay JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cosmetic seed; entropy is used when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Attribute picks: shooting=NAME,passing=NAME,... (matchup and
    /// tournament modes enter the custom player when given)
    #[arg(long, default_value = "")]
    picks: String,

    /// Draft position for the custom player
    #[arg(long, default_value = "SF")]
    position: Position,

    /// Team for the custom player (defaults to the first team of the era)
    #[arg(long)]
    team: Option<String>,

    /// Custom player name
    #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
    name: String,

    /// Solo entrants (comma-separated roster names)
    #[arg(long, default_value = "")]
    entrants: String,

    /// Team entrants: "Name=PG|SG|SF|PF|C;Name2=..."
    #[arg(long, default_value = "")]
    teams: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let to_file = args.output.is_some();
    if to_file {
        colored::control::set_override(false);
    }
    let chatter = stdout_is_free(&args);
    if chatter && (!to_file || args.verbose) {
        announce_banner();
    }

    let assets = TesterAssets::load(args.roster.as_deref(), args.config.as_deref())?;
    let engine = assets.engine()?;
    if chatter && args.verbose {
        println!(
            "📋 Roster: {} players, {} attributes available",
            engine.feed().players.len(),
            engine.available().len()
        );
    }

    let mut rng = args
        .seed
        .map_or_else(CosmeticRng::from_entropy, CosmeticRng::from_user_seed);
    let report = build_report(&args, &engine, &mut rng)?;
    log::info!("{:?} run complete, writing {} report", args.mode, args.report);
    write_report(&args, &report)
}

fn announce_banner() {
    println!("{}", "🏀 Hoopsim Simulator".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

/// JSON written to stdout must be the only thing on stdout.
fn stdout_is_free(args: &Args) -> bool {
    args.output.is_some() || args.report != "json"
}

fn era_of(args: &Args) -> Era {
    args.era.map_or(Era::All, Era::decade)
}

fn build_report(args: &Args, engine: &SimulationEngine, rng: &mut CosmeticRng) -> Result<Report> {
    let report = match args.mode {
        RunMode::Career => {
            let setup = career_setup(args, engine)?;
            let career = engine
                .career(&setup, rng)
                .context("career simulation rejected")?;
            Report::career(args.seed, career)
        }
        RunMode::Matchup => {
            let entrants = gather_entrants(args, engine)?;
            let [a, b] = entrants.as_slice() else {
                bail!("a matchup needs exactly two entrants, got {}", entrants.len());
            };
            Report::new(args.seed, ReportBody::Matchup {
                result: simulate_game(a, b),
            })
        }
        RunMode::Tournament => {
            let entrants = gather_entrants(args, engine)?;
            let bracket = run_tournament(&entrants, rng).context("tournament rejected")?;
            Report::new(args.seed, ReportBody::Tournament { bracket })
        }
    };
    Ok(report)
}

fn career_setup(args: &Args, engine: &SimulationEngine) -> Result<CareerSetup> {
    let era = era_of(args);
    let pairs = parse_picks(&args.picks)?;
    let picks = engine.picks_by_name(&pairs)?;
    let team = match &args.team {
        Some(team) => team.trim().to_string(),
        None => engine
            .feed()
            .teams_for(era)
            .into_iter()
            .next()
            .with_context(|| format!("no teams listed for era {}", era.key()))?,
    };
    Ok(CareerSetup {
        player_name: args.name.trim().to_string(),
        picks,
        position: args.position,
        team,
        era,
    })
}

fn gather_entrants(args: &Args, engine: &SimulationEngine) -> Result<Vec<Entity>> {
    let mut entrants = Vec::new();
    if !args.picks.trim().is_empty() {
        let setup = career_setup(args, engine)?;
        entrants.push(
            engine
                .custom_entrant(&setup)
                .context("custom player cannot enter")?,
        );
    }
    for name in split_csv(&args.entrants) {
        entrants.push(engine.solo_entrant(&name)?);
    }
    for (name, lineup) in parse_teams(&args.teams)? {
        let team = engine
            .team_entrant(&name, &lineup)
            .with_context(|| format!("invalid team {name}"))?;
        entrants.push(team);
    }
    if entrants.is_empty() {
        bail!("no entrants given; use --entrants or --teams");
    }
    Ok(entrants)
}

fn write_report(args: &Args, report: &Report) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, report)?,
        "markdown" => generate_markdown_report(&mut output_target, report)?,
        _ => generate_console_report(&mut output_target, report)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PICKS: &str = "shooting=Michael Jordan,passing=Magic Johnson,rebounding=Dennis Rodman,\
steals=Gary Payton,blocks=Dikembe Mutombo,longevity=Karl Malone,athleticism=LeBron James,\
height=Shaquille O'Neal";

    fn base_args() -> Args {
        Args {
            mode: RunMode::Career,
            roster: None,
            era: None,
            config: None,
            seed: Some(42),
            report: "json".to_string(),
            output: None,
            verbose: false,
            picks: String::new(),
            position: Position::SmallForward,
            team: None,
            name: DEFAULT_PLAYER_NAME.to_string(),
            entrants: String::new(),
            teams: String::new(),
        }
    }

    fn engine() -> SimulationEngine {
        TesterAssets::load(None, None).unwrap().engine().unwrap()
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hoopsim-main-{label}-{}", std::process::id()))
    }

    #[test]
    fn args_parse_modes_and_positions() {
        let args = Args::try_parse_from([
            "hoopsim-tester",
            "--mode",
            "tournament",
            "--position",
            "pg",
            "--era",
            "1995",
        ])
        .unwrap();
        assert_eq!(args.mode, RunMode::Tournament);
        assert_eq!(args.position, Position::PointGuard);
        assert_eq!(era_of(&args), Era::Decade(1990));
        assert!(Args::try_parse_from(["hoopsim-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn career_setup_defaults_team_from_era() {
        let mut args = base_args();
        args.picks = FULL_PICKS.replace("Dennis Rodman", "Ben Wallace");
        args.era = Some(1990);
        let engine = engine();
        let setup = career_setup(&args, &engine).unwrap();
        let first = engine.feed().teams_for(Era::Decade(1990))[0].clone();
        assert_eq!(setup.team, first);
        assert_eq!(setup.era, Era::Decade(1990));
    }

    #[test]
    fn unknown_pick_player_is_an_error() {
        let mut args = base_args();
        args.picks = FULL_PICKS.to_string();
        // Dennis Rodman is not in the bundled roster
        let err = career_setup(&args, &engine()).unwrap_err();
        assert!(format!("{err:#}").contains("Dennis Rodman"));
    }

    #[test]
    fn matchup_requires_two_entrants() {
        let mut args = base_args();
        args.mode = RunMode::Matchup;
        args.entrants = "Michael Jordan".to_string();
        let mut rng = CosmeticRng::from_user_seed(1);
        assert!(build_report(&args, &engine(), &mut rng).is_err());

        args.entrants = "Michael Jordan,Larry Bird".to_string();
        let report = build_report(&args, &engine(), &mut rng).unwrap();
        assert!(matches!(report.body, ReportBody::Matchup { .. }));
    }

    #[test]
    fn custom_player_joins_the_field_when_picks_are_given() {
        let mut args = base_args();
        args.mode = RunMode::Matchup;
        args.name = "Prospect".to_string();
        args.picks = FULL_PICKS.replace("Dennis Rodman", "Ben Wallace");
        args.entrants = "Larry Bird".to_string();
        let entrants = gather_entrants(&args, &engine()).unwrap();
        assert_eq!(entrants.len(), 2);
        assert_eq!(entrants[0].name, "Prospect");
        assert_eq!(entrants[1].name, "Larry Bird");
    }

    #[test]
    fn tournament_report_written_to_file() {
        let mut args = base_args();
        args.mode = RunMode::Tournament;
        args.report = "markdown".to_string();
        args.entrants = "Michael Jordan,Larry Bird,Tim Duncan".to_string();
        let output_path = temp_path("bracket.md");
        args.output = Some(output_path.clone());
        let mut rng = CosmeticRng::from_user_seed(9);
        let report = build_report(&args, &engine(), &mut rng).unwrap();
        write_report(&args, &report).unwrap();
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("# Hoopsim Tournament"));
        assert!(content.contains("Champion"));
        std::fs::remove_file(output_path).ok();
    }

    #[test]
    fn stdout_json_suppresses_chatter() {
        let mut args = base_args();
        assert!(!stdout_is_free(&args));
        args.report = "markdown".to_string();
        assert!(stdout_is_free(&args));
        args.report = "json".to_string();
        args.output = Some(temp_path("quiet.json"));
        assert!(stdout_is_free(&args));
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = temp_path("target.txt");
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        std::fs::remove_file(path).ok();
    }
}
