//! Up-front parameter checks, reported before any simulation runs.

use tactics_core::{GameEnv, Puzzle};

use crate::config::SolverConfig;

/// Every problem that makes `puzzle` unsearchable. Empty means valid.
///
/// Problems are collected, not short-circuited, so a caller can show them all
/// at once.
pub fn validate(puzzle: &Puzzle, env: &GameEnv<'_>, config: &SolverConfig) -> Vec<String> {
    let mut issues = Vec::new();

    if puzzle.width() == 0 || puzzle.height() == 0 || puzzle.grid.area() < 2 {
        issues.push(format!(
            "grid {}x{} is too small",
            puzzle.width(),
            puzzle.height()
        ));
    }
    if puzzle.available_characters.is_empty() {
        issues.push("character roster is empty".to_string());
    }
    for id in &puzzle.available_characters {
        if env.character(id).is_none() {
            issues.push(format!("unknown character '{id}' in roster"));
        }
    }
    if puzzle.win_conditions.is_empty() {
        issues.push("puzzle has no win condition".to_string());
    }
    let defeat_condition = puzzle.win_conditions.iter().find(|c| c.needs_enemies());
    if let Some(condition) = defeat_condition {
        if puzzle.enemies.is_empty() {
            issues.push(format!("win condition '{condition}' needs at least one enemy"));
        }
    }
    for enemy in &puzzle.enemies {
        if env.enemy(&enemy.enemy_id).is_none() {
            issues.push(format!("unknown enemy '{}'", enemy.enemy_id));
        }
        if !puzzle
            .grid
            .tile(enemy.position())
            .is_some_and(|t| !t.is_wall())
        {
            issues.push(format!(
                "enemy '{}' placed on a wall or off the grid at {}",
                enemy.enemy_id,
                enemy.position()
            ));
        }
    }
    if puzzle.max_turns == 0 || config.turn_cap == Some(0) {
        issues.push("turn cap is zero".to_string());
    }
    if config.max_characters.unwrap_or(puzzle.max_characters) == 0 {
        issues.push("max characters is zero".to_string());
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        AssetCatalog, CharacterDefinition, EnemyDefinition, EnemyPlacement, Grid, WinCondition,
    };

    fn catalog() -> AssetCatalog {
        AssetCatalog::new()
            .with_character(CharacterDefinition::new("knight", 3))
            .with_enemy(EnemyDefinition::new("slime", 1))
    }

    #[test]
    fn well_formed_puzzle_has_no_issues() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let puzzle = Puzzle::new("ok", Grid::new(3, 3))
            .with_enemy(EnemyPlacement::new("slime", 2, 2))
            .with_roster(["knight"], 1)
            .with_win_condition(WinCondition::DefeatAllEnemies);
        assert!(validate(&puzzle, &env, &SolverConfig::default()).is_empty());
    }

    #[test]
    fn every_problem_is_reported() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let puzzle = Puzzle::new("broken", Grid::new(1, 1))
            .with_roster(["wizard"], 0)
            .with_max_turns(0)
            .with_win_condition(WinCondition::DefeatAllEnemies);

        let issues = validate(&puzzle, &env, &SolverConfig::default());
        assert_eq!(issues.len(), 5, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("too small")));
        assert!(issues.iter().any(|i| i.contains("'wizard'")));
        assert!(issues.iter().any(|i| i.contains("needs at least one enemy")));
        assert!(issues.iter().any(|i| i.contains("turn cap")));
        assert!(issues.iter().any(|i| i.contains("max characters")));
    }

    #[test]
    fn missing_roster_and_conditions() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let puzzle = Puzzle::new("bare", Grid::new(2, 2));
        let issues = validate(&puzzle, &env, &SolverConfig::default());
        assert_eq!(
            issues,
            vec![
                "character roster is empty".to_string(),
                "puzzle has no win condition".to_string(),
            ]
        );
    }
}
