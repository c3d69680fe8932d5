use hoopsim_game::{
    CosmeticRng, Entity, RosterFeed, SimulationConfig, SimulationEngine, ValidationError,
    run_tournament, simulate_game,
};

fn engine() -> SimulationEngine {
    let feed = RosterFeed::from_json(include_str!(
        "../../hoopsim-tester/assets/sample_roster.json"
    ))
    .unwrap();
    SimulationEngine::from_feed(feed, SimulationConfig::default())
}

fn lineup(names: [&str; 5]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn showtime(engine: &SimulationEngine) -> Entity {
    engine
        .team_entrant(
            "Showtime",
            &lineup([
                "Magic Johnson",
                "Michael Jordan",
                "Larry Bird",
                "Karl Malone",
                "Kareem Abdul-Jabbar",
            ]),
        )
        .unwrap()
}

fn splash(engine: &SimulationEngine) -> Entity {
    engine
        .team_entrant(
            "Splash",
            &lineup([
                "Stephen Curry",
                "Kobe Bryant",
                "Kevin Durant",
                "Tim Duncan",
                "Shaquille O'Neal",
            ]),
        )
        .unwrap()
}

#[test]
fn identical_inputs_replay_identically() {
    let engine = engine();
    let a = showtime(&engine);
    let b = splash(&engine);
    let first = simulate_game(&a, &b);
    for _ in 0..5 {
        assert_eq!(simulate_game(&a, &b), first);
    }
    assert!((60..=144).contains(&first.score_a));
    assert!((60..=144).contains(&first.score_b));
    assert_ne!(first.score_a, first.score_b);
    assert!(first.key_factors.len() <= 3);
}

#[test]
fn off_role_lineups_lose_role_impact() {
    let engine = engine();
    let natural = showtime(&engine);
    let scrambled = engine
        .team_entrant(
            "Scrambled",
            &lineup([
                "Kareem Abdul-Jabbar",
                "Karl Malone",
                "Larry Bird",
                "Michael Jordan",
                "Magic Johnson",
            ]),
        )
        .unwrap();
    assert!((natural.stats.pts - scrambled.stats.pts).abs() < 1e-9);
    assert!(natural.stats.role_impact.unwrap() > scrambled.stats.role_impact.unwrap());
}

#[test]
fn solo_matchups_read_the_roster_line() {
    let engine = engine();
    let jordan = engine.solo_entrant("michael jordan").unwrap();
    let wallace = engine.solo_entrant("Ben Wallace").unwrap();
    let result = simulate_game(&jordan, &wallace);
    assert_eq!(result.winner_name(), "Michael Jordan");
    assert_eq!(result.narrative.len(), 5);
    assert_eq!(result.key_factors[0].label, "Scoring");
}

#[test]
fn tournament_games_match_standalone_games() {
    let engine = engine();
    let field: Vec<Entity> = [
        "Michael Jordan",
        "LeBron James",
        "Tim Duncan",
        "Steve Nash",
        "Allen Iverson",
        "Dikembe Mutombo",
        "Reggie Miller",
    ]
    .iter()
    .map(|name| engine.solo_entrant(name).unwrap())
    .collect();
    let mut rng = CosmeticRng::from_user_seed(2_024);
    let bracket = run_tournament(&field, &mut rng).unwrap();
    assert_eq!(bracket.entrants.len(), 7);
    assert_eq!(bracket.rounds.len(), 3);
    assert!(field.iter().any(|entity| entity.name == bracket.champion));

    for round in &bracket.rounds {
        for game in &round.games {
            let a = field.iter().find(|e| e.name == game.name_a).unwrap();
            let b = field.iter().find(|e| e.name == game.name_b).unwrap();
            assert_eq!(&simulate_game(a, b), game);
        }
    }
}

#[test]
fn unknown_players_are_reported() {
    let engine = engine();
    assert_eq!(
        engine.solo_entrant("Nobody Special").unwrap_err(),
        ValidationError::UnknownPlayer("Nobody Special".to_string())
    );
}
