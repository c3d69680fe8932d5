use std::process::Command;

const PICKS: &str = "shooting=Michael Jordan,passing=Magic Johnson,rebounding=Wilt Chamberlain,\
steals=Gary Payton,blocks=Dikembe Mutombo,longevity=Karl Malone,athleticism=LeBron James,\
height=Shaquille O'Neal";

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "hoopsim-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_career_json(seed: &str) -> serde_json::Value {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output_path = temp_path(&format!("career-{seed}"));
    let status = Command::new(exe)
        .args([
            "--mode", "career", "--picks", PICKS, "--position", "PG", "--team", "Bulls",
            "--seed", seed, "--report", "json", "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    std::fs::remove_file(&output_path).ok();
    serde_json::from_str(&content).expect("json report")
}

#[test]
fn cli_career_json_is_reproducible_for_a_seed() {
    let first = run_career_json("2024");
    let second = run_career_json("2024");
    assert_eq!(first["mode"], "career");
    assert_eq!(first["seed"], 2024);
    assert_eq!(first["career"]["seasons"], second["career"]["seasons"]);
    assert_eq!(first["career"]["seasons"][0]["team"], "Bulls");
    assert!(first["fact_sheet"]["hall_of_fame_line"].is_string());
}

#[test]
fn cli_json_on_stdout_parses_cleanly() {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "matchup",
            "--entrants",
            "Larry Bird,Magic Johnson",
            "--report",
            "json",
            "--verbose",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is pure json");
    assert_eq!(report["mode"], "matchup");
    assert_eq!(report["result"]["name_a"], "Larry Bird");
}

#[test]
fn cli_rejects_a_six_player_lineup() {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "tournament",
            "--teams",
            "Crowded=Magic Johnson|Michael Jordan|Larry Bird|Karl Malone|Kareem Abdul-Jabbar|Tim Duncan",
            "--entrants",
            "Stephen Curry",
        ])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lists 6 players"));
}

#[test]
fn cli_matchup_writes_markdown() {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output_path = temp_path("matchup");
    let status = Command::new(exe)
        .args([
            "--mode",
            "matchup",
            "--entrants",
            "Michael Jordan,Ben Wallace",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    std::fs::remove_file(&output_path).ok();
    assert!(content.contains("# Hoopsim Matchup: Michael Jordan vs Ben Wallace"));
    assert!(content.contains("## Play-by-play"));
}

#[test]
fn cli_fails_when_a_pick_is_missing() {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "career",
            "--picks",
            "shooting=Michael Jordan",
            "--report",
            "json",
        ])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no player picked for the passing attribute"));
}

#[test]
fn cli_tournament_console_names_a_champion() {
    let exe = env!("CARGO_BIN_EXE_hoopsim-tester");
    let output = Command::new(exe)
        .args([
            "--mode",
            "tournament",
            "--teams",
            "Showtime=Magic Johnson|Michael Jordan|Larry Bird|Karl Malone|Kareem Abdul-Jabbar;\
             Twin Towers=John Stockton|Reggie Miller|Scottie Pippen|Tim Duncan|David Robinson",
            "--entrants",
            "Stephen Curry",
            "--seed",
            "5",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hoopsim Simulator"));
    assert!(stdout.contains("Champion:"));
}
