//! Puzzle definitions and turning one into a running [`GameState`].

use tracing::debug;

use crate::config::SimulationConfig;
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::geometry::Direction;
use crate::state::{
    BehaviorKind, CollectibleState, Entity, EntityId, GameRules, GameState, GameStatus, Grid,
    Position, Team,
};

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

/// One victory or defeat rule of a puzzle.
///
/// Victory needs every declared condition at once; `KeepAlive` and
/// `WinWithinTurns` can also force a defeat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WinCondition {
    #[cfg_attr(feature = "serde", serde(alias = "defeat_all_enemies"))]
    DefeatAllEnemies,
    #[cfg_attr(feature = "serde", serde(alias = "collect_all"))]
    CollectAll,
    /// `count` living characters standing on goal tiles.
    #[cfg_attr(feature = "serde", serde(alias = "reach_goal"))]
    ReachGoal {
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        count: u32,
    },
    #[cfg_attr(feature = "serde", serde(alias = "survive_turns"))]
    SurviveTurns { turns: u32 },
    #[cfg_attr(feature = "serde", serde(alias = "win_within_turns"))]
    WinWithinTurns { turns: u32 },
    /// At most `count` characters placed.
    #[cfg_attr(feature = "serde", serde(alias = "max_characters"))]
    MaxCharacters { count: u32 },
    /// At least `count` characters alive, at all times.
    #[cfg_attr(feature = "serde", serde(alias = "keep_alive", alias = "characters_alive"))]
    KeepAlive { count: u32 },
    #[cfg_attr(feature = "serde", serde(alias = "collect_all_keys"))]
    CollectAllKeys,
}

impl WinCondition {
    /// Whether the condition can only hold if the puzzle has enemies.
    pub fn needs_enemies(&self) -> bool {
        matches!(self, WinCondition::DefeatAllEnemies)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyPlacement {
    #[cfg_attr(feature = "serde", serde(alias = "enemyId"))]
    pub enemy_id: String,
    pub x: i32,
    pub y: i32,
    /// Defaults to the definition's facing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Option<Direction>,
    /// Waits off-board for a pressure plate spawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dormant: bool,
}

impl EnemyPlacement {
    pub fn new(enemy_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            x,
            y,
            facing: None,
            dormant: false,
        }
    }

    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = Some(facing);
        self
    }

    pub fn dormant(mut self) -> Self {
        self.dormant = true;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectiblePlacement {
    #[cfg_attr(feature = "serde", serde(alias = "collectibleId"))]
    pub collectible_id: String,
    pub x: i32,
    pub y: i32,
}

impl CollectiblePlacement {
    pub fn new(collectible_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            collectible_id: collectible_id.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A character put on the board for one run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Placement {
    pub character_id: String,
    pub x: i32,
    pub y: i32,
    pub facing: Direction,
}

impl Placement {
    pub fn new(character_id: impl Into<String>, x: i32, y: i32, facing: Direction) -> Self {
        Self {
            character_id: character_id.into(),
            x,
            y,
            facing,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Static puzzle definition. Never mutated by a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub grid: Grid,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemyPlacement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collectibles: Vec<CollectiblePlacement>,
    #[cfg_attr(feature = "serde", serde(default, alias = "availableCharacters"))]
    pub available_characters: Vec<String>,
    #[cfg_attr(feature = "serde", serde(alias = "maxCharacters"))]
    pub max_characters: u32,
    #[cfg_attr(feature = "serde", serde(alias = "maxTurns"))]
    pub max_turns: u32,
    #[cfg_attr(feature = "serde", serde(default, alias = "winConditions"))]
    pub win_conditions: Vec<WinCondition>,
}

impl Puzzle {
    pub fn new(id: impl Into<String>, grid: Grid) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            grid,
            enemies: Vec::new(),
            collectibles: Vec::new(),
            available_characters: Vec::new(),
            max_characters: 1,
            max_turns: 20,
            win_conditions: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn with_enemy(mut self, enemy: EnemyPlacement) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn with_collectible(mut self, collectible: CollectiblePlacement) -> Self {
        self.collectibles.push(collectible);
        self
    }

    pub fn with_roster<I, S>(mut self, characters: I, max_characters: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_characters = characters.into_iter().map(Into::into).collect();
        self.max_characters = max_characters;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_win_condition(mut self, condition: WinCondition) -> Self {
        self.win_conditions.push(condition);
        self
    }
}

/// Why a puzzle could not be put on the board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("unknown character '{character_id}'")]
    UnknownCharacter {
        character_id: String,
        context: ErrorContext,
    },

    #[error("unknown enemy '{enemy_id}'")]
    UnknownEnemy {
        enemy_id: String,
        context: ErrorContext,
    },

    #[error("'{character_id}' cannot stand on {position}")]
    Unstandable {
        character_id: String,
        position: Position,
        context: ErrorContext,
    },

    #[error("'{character_id}' placed on occupied tile {position}")]
    Occupied {
        character_id: String,
        position: Position,
        context: ErrorContext,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SetupError::Occupied { .. } => ErrorSeverity::Recoverable,
            SetupError::UnknownCharacter { .. }
            | SetupError::UnknownEnemy { .. }
            | SetupError::Unstandable { .. } => ErrorSeverity::Validation,
            SetupError::Oracle(error) => error.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            SetupError::UnknownCharacter { context, .. }
            | SetupError::UnknownEnemy { context, .. }
            | SetupError::Unstandable { context, .. }
            | SetupError::Occupied { context, .. } => Some(context),
            SetupError::Oracle(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::UnknownCharacter { .. } => "SETUP_UNKNOWN_CHARACTER",
            SetupError::UnknownEnemy { .. } => "SETUP_UNKNOWN_ENEMY",
            SetupError::Unstandable { .. } => "SETUP_UNSTANDABLE",
            SetupError::Occupied { .. } => "SETUP_OCCUPIED",
            SetupError::Oracle(error) => error.error_code(),
        }
    }
}

/// Builds a fresh running state for `puzzle` with `placements`.
///
/// Characters get ids first in placement order, then enemies in puzzle order.
/// The puzzle itself is left untouched, so one puzzle can seed any number of
/// independent runs.
pub fn instantiate(
    puzzle: &Puzzle,
    placements: &[Placement],
    env: &GameEnv<'_>,
    config: &SimulationConfig,
) -> Result<GameState, SetupError> {
    env.actors()?;

    let rules = GameRules {
        win_conditions: puzzle.win_conditions.clone(),
        max_turns: config.effective_max_turns(puzzle.max_turns),
        placed_characters: placements.len() as u32,
    };
    let mut state = GameState::new(puzzle.grid.clone(), rules, config.seed);

    for placement in placements {
        let position = placement.position();
        let Some(definition) = env.character(&placement.character_id) else {
            return Err(SetupError::UnknownCharacter {
                character_id: placement.character_id.clone(),
                context: ErrorContext::new(0).with_position(position),
            });
        };
        if !state.is_standable(position) {
            return Err(SetupError::Unstandable {
                character_id: placement.character_id.clone(),
                position,
                context: ErrorContext::new(0).with_position(position),
            });
        }
        if let Some(occupant) = state.entities.living_at(position, None) {
            return Err(SetupError::Occupied {
                character_id: placement.character_id.clone(),
                position,
                context: ErrorContext::new(0)
                    .with_actor(occupant.id)
                    .with_position(position),
            });
        }

        let entity = Entity::new(
            EntityId(0),
            Team::Character,
            definition.id.clone(),
            position,
            placement.facing,
            definition.max_health,
        )
        .with_program(definition.program.clone())
        .with_combat(definition.combat.clone());
        state.entities.spawn(entity);
    }

    for enemy in &puzzle.enemies {
        let Some(definition) = env.enemy(&enemy.enemy_id) else {
            return Err(SetupError::UnknownEnemy {
                enemy_id: enemy.enemy_id.clone(),
                context: ErrorContext::new(0).with_position(enemy.position()),
            });
        };
        let mut entity = Entity::new(
            EntityId(0),
            Team::Enemy,
            definition.id.clone(),
            enemy.position(),
            enemy.facing.unwrap_or(definition.default_facing),
            definition.max_health,
        )
        .with_program(definition.program.clone())
        .with_combat(definition.combat.clone());
        entity.behavior = definition.behavior;
        entity.dormant = enemy.dormant;
        entity.active = definition.behavior == BehaviorKind::Active && !enemy.dormant;
        entity.score_value = definition.score;
        entity.drops = definition.drops.clone();
        state.entities.spawn(entity);
    }

    state.collectibles = puzzle
        .collectibles
        .iter()
        .map(|c| CollectibleState::new(c.collectible_id.clone(), c.position()))
        .collect();

    state.status = GameStatus::Running;
    debug!(
        puzzle = %puzzle.id,
        characters = placements.len(),
        enemies = puzzle.enemies.len(),
        max_turns = state.rules.max_turns,
        "puzzle instantiated"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AssetCatalog, CharacterDefinition, EnemyDefinition};
    use crate::state::Tile;

    fn catalog() -> AssetCatalog {
        AssetCatalog::new()
            .with_character(CharacterDefinition::new("knight", 5).with_facing(Direction::East))
            .with_enemy(EnemyDefinition::new("rock", 3))
            .with_enemy(
                EnemyDefinition::new("bat", 2)
                    .with_program(vec![crate::action::ActionKind::forward(1).into()]),
            )
    }

    fn puzzle() -> Puzzle {
        let mut grid = Grid::new(4, 3);
        grid.set(Position::new(3, 2), Some(Tile::wall()));
        grid.set(Position::new(0, 2), None);
        Puzzle::new("p", grid)
            .with_enemy(EnemyPlacement::new("rock", 2, 0))
            .with_enemy(EnemyPlacement::new("bat", 3, 0).dormant())
            .with_collectible(CollectiblePlacement::new("gem", 1, 1))
            .with_roster(["knight"], 1)
            .with_max_turns(12)
    }

    #[test]
    fn characters_come_first_then_enemies_in_puzzle_order() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let placements = [Placement::new("knight", 0, 0, Direction::South)];
        let state = instantiate(&puzzle(), &placements, &env, &SimulationConfig::new())
            .expect("valid setup");

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.entities.len(), 3);
        let knight = state.entity(EntityId(0)).expect("knight");
        assert_eq!(knight.team, Team::Character);
        assert_eq!(knight.facing, Direction::South);

        let rock = state.entity(EntityId(1)).expect("rock");
        assert!(!rock.active, "static enemies never act");
        let bat = state.entity(EntityId(2)).expect("bat");
        assert!(bat.dormant && !bat.active);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.rules.placed_characters, 1);
    }

    #[test]
    fn turn_cap_tightens_the_puzzle_limit() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let config = SimulationConfig::new().with_turn_cap(5);
        let state = instantiate(&puzzle(), &[], &env, &config).expect("valid setup");
        assert_eq!(state.rules.max_turns, 5);
    }

    #[test]
    fn bad_placements_are_rejected() {
        let catalog = catalog();
        let env = GameEnv::from_catalog(&catalog);
        let config = SimulationConfig::new();
        let puzzle = puzzle();

        let wall = [Placement::new("knight", 3, 2, Direction::North)];
        let error = instantiate(&puzzle, &wall, &env, &config).expect_err("wall");
        assert_eq!(error.error_code(), "SETUP_UNSTANDABLE");

        let void = [Placement::new("knight", 0, 2, Direction::North)];
        assert!(matches!(
            instantiate(&puzzle, &void, &env, &config),
            Err(SetupError::Unstandable { .. })
        ));

        let twice = [
            Placement::new("knight", 1, 0, Direction::North),
            Placement::new("knight", 1, 0, Direction::North),
        ];
        let error = instantiate(&puzzle, &twice, &env, &config).expect_err("occupied");
        assert!(error.severity().is_recoverable());
        assert_eq!(error.context().and_then(|c| c.actor), Some(EntityId(0)));

        let unknown = [Placement::new("wizard", 1, 0, Direction::North)];
        assert!(matches!(
            instantiate(&puzzle, &unknown, &env, &config),
            Err(SetupError::UnknownCharacter { .. })
        ));
    }

    #[test]
    fn missing_actor_oracle_is_fatal() {
        let env = GameEnv::empty();
        let error = instantiate(&puzzle(), &[], &env, &SimulationConfig::new())
            .expect_err("no actors");
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert_eq!(error.error_code(), "ORACLE_ACTORS_NOT_AVAILABLE");
    }
}
