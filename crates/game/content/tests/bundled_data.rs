use std::fs;
use std::path::PathBuf;

use tactics_content::ContentFactory;
use tactics_core::{
    ActorOracle, Direction, GameEnv, GameStatus, Placement, SimulationConfig, simulate,
};
use tactics_solver::{SolverConfig, solve, validate};

fn bundled() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn bundled_assets_load() {
    let catalog = bundled().load_assets().expect("assets.ron parses");
    for id in ["knight", "archer", "scout", "mage"] {
        assert!(catalog.character(id).is_some(), "missing character {id}");
    }
    assert!(catalog.enemy("slime").is_some());
    assert!(catalog.enemy("goblin").is_some());
}

#[test]
fn every_bundled_puzzle_validates() {
    let factory = bundled();
    let catalog = factory.load_assets().expect("assets");
    let env = GameEnv::from_catalog(&catalog);
    let config = factory.load_solver_config().expect("solver.toml");

    let names = factory.puzzle_names().expect("puzzle directory");
    assert_eq!(names, vec!["first_steps", "goal_rush", "spike_hall"]);
    for name in names {
        let puzzle = factory.load_puzzle(&name).expect("puzzle parses");
        assert_eq!(puzzle.id, name);
        let issues = validate(&puzzle, &env, &config);
        assert!(issues.is_empty(), "{name}: {issues:?}");
    }
}

#[test]
fn first_steps_is_solvable_with_one_knight() {
    let factory = bundled();
    let catalog = factory.load_assets().expect("assets");
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = factory.load_puzzle("first_steps").expect("puzzle");

    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(result.solvable, "{result:?}");
    assert_eq!(result.min_characters_needed, Some(1));
}

#[test]
fn goal_rush_scout_reaches_the_goal() {
    let factory = bundled();
    let catalog = factory.load_assets().expect("assets");
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = factory.load_puzzle("goal_rush").expect("puzzle");

    let placements = [Placement::new("scout", 1, 1, Direction::East)];
    let outcome = simulate(&puzzle, &placements, &env, &SimulationConfig::default())
        .expect("placement is valid");
    assert_eq!(outcome.status, GameStatus::Victory);
    assert_eq!(outcome.turns, 2);
}

#[test]
fn factory_reads_a_custom_data_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir(dir.path().join("puzzles")).expect("puzzles dir");
    fs::write(
        dir.path().join("assets.ron"),
        r#"(
            characters: [(
                id: "pusher",
                max_health: 1,
                default_facing: East,
                program: [(kind: Move(tiles: 1)), (kind: Repeat)],
                combat: (contact_damage: 1),
            )],
            enemies: [(id: "dummy", max_health: 1, behavior: Static)],
        )"#,
    )
    .expect("write assets");
    fs::write(
        dir.path().join("puzzles/lane.ron"),
        r#"(
            id: "lane",
            layout: ["..."],
            enemies: [(enemy_id: "dummy", x: 2, y: 0)],
            available_characters: ["pusher"],
            win_conditions: [DefeatAllEnemies],
        )"#,
    )
    .expect("write puzzle");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write stray file");

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.puzzle_names().expect("list"), vec!["lane"]);
    // No solver.toml: defaults apply.
    assert_eq!(
        factory.load_solver_config().expect("defaults"),
        SolverConfig::default()
    );

    let catalog = factory.load_assets().expect("assets");
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = factory.load_puzzle("lane").expect("puzzle");
    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(result.solvable);
    let solution = result.solution_found.expect("solution");
    assert_eq!(solution.placements[0].position(), tactics_core::Position::new(0, 0));
    assert_eq!(solution.turns_to_win, 2);
}

#[test]
fn missing_puzzle_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = ContentFactory::new(dir.path())
        .load_puzzle("nowhere")
        .expect_err("no such file");
    assert!(error.to_string().contains("nowhere.ron"), "{error}");
}
