use tactics_core::{
    Action, ActionKind, AssetCatalog, CharacterDefinition, Direction, EnemyDefinition,
    EnemyPlacement, GameEnv, Grid, Position, Puzzle, Tile, WinCondition,
    state::CombatProfile,
};
use tactics_solver::{SolverConfig, solve, solve_async};

fn charger(id: &str, contact_damage: i32) -> CharacterDefinition {
    CharacterDefinition::new(id, 3)
        .with_facing(Direction::East)
        .with_program(vec![
            Action::new(ActionKind::forward(1)),
            Action::new(ActionKind::Repeat),
        ])
        .with_combat(CombatProfile {
            contact_damage,
            ..CombatProfile::default()
        })
}

fn catalog() -> AssetCatalog {
    AssetCatalog::new()
        .with_character(charger("knight", 3))
        .with_character(CharacterDefinition::new("scout", 2).with_program(vec![Action::new(
            ActionKind::Wait,
        )]))
        .with_character(CharacterDefinition::new("runner", 2).with_program(vec![Action::new(
            ActionKind::Wait,
        )]))
        .with_enemy(EnemyDefinition::new("slime", 2))
        .with_enemy(EnemyDefinition::new("golem", 99))
}

fn walled(width: u32, height: u32, open: &[(i32, i32)]) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if !open.contains(&(x, y)) {
                grid.set(Position::new(x, y), Some(Tile::wall()));
            }
        }
    }
    grid
}

#[test]
fn single_charger_beats_adjacent_enemy() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = Puzzle::new("adjacent", walled(3, 3, &[(0, 1), (1, 1)]))
        .with_enemy(EnemyPlacement::new("slime", 1, 1))
        .with_roster(["knight"], 1)
        .with_win_condition(WinCondition::DefeatAllEnemies);

    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(result.solvable, "{result:?}");
    assert_eq!(result.min_characters_needed, Some(1));
    assert_eq!(result.total_combinations_tested, 1);
    let solution = result.solution_found.expect("solution");
    assert_eq!(solution.turns_to_win, 1);
    assert_eq!(solution.placements[0].character_id, "knight");
    assert_eq!(solution.placements[0].position(), Position::new(0, 1));
    assert_eq!(solution.placements[0].facing, Direction::East);
    assert_eq!(result.error, None);
}

#[test]
fn no_placement_tiles_short_circuits() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = Puzzle::new("sealed", walled(2, 1, &[(1, 0)]))
        .with_enemy(EnemyPlacement::new("slime", 1, 0))
        .with_roster(["knight"], 1)
        .with_win_condition(WinCondition::DefeatAllEnemies);

    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(!result.solvable);
    assert_eq!(result.total_combinations_tested, 0);
    assert_eq!(result.min_characters_needed, None);
    let error = result.error.expect("explicit reason");
    assert!(error.contains("no valid placement tiles"), "{error}");
}

#[test]
fn two_goals_need_two_characters() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let mut grid = Grid::new(4, 1);
    grid.set(Position::new(2, 0), Some(Tile::goal()));
    grid.set(Position::new(3, 0), Some(Tile::goal()));
    let puzzle = Puzzle::new("pair", grid)
        .with_roster(["scout", "runner"], 2)
        .with_win_condition(WinCondition::ReachGoal { count: 2 });

    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(result.solvable, "{result:?}");
    assert_eq!(result.min_characters_needed, Some(2));
    let solution = result.solution_found.expect("solution");
    assert_eq!(solution.placements.len(), 2);
    let mut tiles: Vec<_> = solution.placements.iter().map(|p| p.position()).collect();
    tiles.sort();
    assert_eq!(tiles, vec![Position::new(2, 0), Position::new(3, 0)]);
    // Every single-character candidate was tried first: 2 ids x 4 tiles.
    assert!(result.total_combinations_tested > 8);
}

fn unwinnable() -> Puzzle {
    Puzzle::new("wall of flesh", Grid::new(3, 3))
        .with_enemy(EnemyPlacement::new("golem", 2, 2))
        .with_roster(["scout"], 1)
        .with_max_turns(2)
        .with_win_condition(WinCondition::DefeatAllEnemies)
}

#[test]
fn exhausted_budget_reports_partial_result() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let config = SolverConfig::default().with_max_combinations(3);

    let result = solve(&unwinnable(), &env, &config);
    assert!(!result.solvable);
    assert_eq!(result.total_combinations_tested, 4);
    let error = result.error.expect("budget message");
    assert!(error.contains("budget of 3"), "{error}");
}

#[test]
fn exhaustive_search_without_a_win_has_no_error() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);

    let result = solve(&unwinnable(), &env, &SolverConfig::default());
    assert!(!result.solvable);
    assert_eq!(result.total_combinations_tested, 8);
    assert_eq!(result.error, None);
}

#[test]
fn invalid_puzzles_are_rejected_before_searching() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let puzzle = Puzzle::new("empty", Grid::new(3, 3));

    let result = solve(&puzzle, &env, &SolverConfig::default());
    assert!(!result.solvable);
    assert_eq!(result.total_combinations_tested, 0);
    let error = result.error.expect("issues");
    assert!(error.contains("roster is empty"), "{error}");
    assert!(error.contains("no win condition"), "{error}");
}

fn corridor() -> Puzzle {
    Puzzle::new("corridor", Grid::new(5, 1))
        .with_enemy(EnemyPlacement::new("slime", 4, 0))
        .with_roster(["knight"], 1)
        .with_win_condition(WinCondition::DefeatAllEnemies)
}

#[test]
fn fastest_search_keeps_the_quickest_win() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);

    let first = solve(&corridor(), &env, &SolverConfig::default());
    let first_solution = first.solution_found.expect("solution");
    assert_eq!(first.total_combinations_tested, 1);
    assert_eq!(first_solution.placements[0].position(), Position::new(0, 0));
    assert_eq!(first_solution.turns_to_win, 4);

    let fastest = solve(&corridor(), &env, &SolverConfig::default().finding_fastest());
    let fastest_solution = fastest.solution_found.expect("solution");
    assert_eq!(fastest.total_combinations_tested, 4);
    assert_eq!(fastest_solution.placements[0].position(), Position::new(3, 0));
    assert_eq!(fastest_solution.turns_to_win, 1);
    assert_eq!(fastest.min_characters_needed, Some(1));
}

#[test]
fn repeated_searches_agree() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let config = SolverConfig::default().finding_fastest();

    let first = solve(&corridor(), &env, &config);
    let second = solve(&corridor(), &env, &config);
    assert!(first.same_answer(&second));
}

#[tokio::test]
async fn async_search_matches_sync_search() {
    let catalog = catalog();
    let env = GameEnv::from_catalog(&catalog);
    let config = SolverConfig {
        yield_every: 1,
        ..SolverConfig::default().finding_fastest()
    };

    let sync = solve(&corridor(), &env, &config);
    let async_result = solve_async(&corridor(), &env, &config).await;
    assert!(sync.same_answer(&async_result));
}
