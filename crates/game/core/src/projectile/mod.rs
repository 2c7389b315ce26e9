//! Projectile & area-effect resolver.
//!
//! Projectiles move in discrete tile steps, `speed` tiles per turn, never by
//! elapsed time. Straight shots precompute their tile path at launch; homing
//! shots re-aim at their live target before every step and fall back to a
//! straight line once it dies. Each entered tile is checked for walls first,
//! then for targets, with the turn's pre-move enemy positions taking
//! precedence so a shot wins ties against a target that just stepped away.
pub mod area;

use tracing::{debug, trace};

pub use area::{AreaPayload, burst, tick_area_effects};

use crate::combat::{DamageKind, apply_damage, apply_heal};
use crate::env::{AreaSpec, AttackData, BouncePolicy, GameEnv};
use crate::geometry::{Direction, TurnSide, line_path};
use crate::state::{EntityId, GameState, ParticleKind, Position, Projectile, ProjectilePayload};
use crate::status::apply_status;

/// Roll context for random bounces.
const BOUNCE_ROLL: u32 = 0xB0B;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flight {
    Continue,
    Spent,
}

/// Fires a projectile from `source` along `direction`.
///
/// Returns the projectile id, or `None` when the source is gone.
pub fn launch(
    state: &mut GameState,
    source: EntityId,
    direction: Direction,
    attack: &AttackData,
    homing_target: Option<EntityId>,
) -> Option<u32> {
    let (origin, team) = state
        .entity(source)
        .filter(|e| e.is_alive())
        .map(|e| (e.position, e.team))?;

    let range = attack.range.max(1);
    let target = origin.step(direction, range as i32);
    let spec = &attack.projectile;
    let homing_target = if spec.homing { homing_target } else { None };
    let path = if homing_target.is_some() {
        Vec::new()
    } else {
        line_path(origin, target)
    };

    let id = state.next_object_id();
    trace!(id, %source, %origin, ?direction, range, "projectile launched");
    state.projectiles.push(Projectile {
        id,
        source,
        team,
        origin,
        position: origin,
        target,
        direction,
        speed: spec.speed.max(1),
        remaining_range: range,
        payload: ProjectilePayload {
            damage: attack.damage,
            heal: attack.heal,
            status_effect: attack.status_effect.clone(),
            explode: spec.explode.clone(),
        },
        homing_target,
        bounce: spec.bounce,
        bounces: 0,
        pierce: spec.pierce,
        path,
        path_index: 0,
        hit: Default::default(),
    });
    Some(id)
}

/// Advances every projectile by its speed, resolving hits and bounces.
pub fn advance_projectiles(state: &mut GameState, env: &GameEnv<'_>) {
    let flying = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(flying.len());
    for mut projectile in flying {
        if advance(state, env, &mut projectile) == Flight::Continue {
            survivors.push(projectile);
        }
    }
    survivors.append(&mut state.projectiles);
    state.projectiles = survivors;
}

/// Counts particle lifetimes down and drops the expired ones.
pub fn expire_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.ttl = particle.ttl.saturating_sub(1);
    }
    state.particles.retain(|p| p.ttl > 0);
}

fn is_open(state: &GameState, position: Position) -> bool {
    state.grid.tile(position).is_some_and(|t| !t.is_wall())
}

fn advance(state: &mut GameState, env: &GameEnv<'_>, projectile: &mut Projectile) -> Flight {
    let mut budget = projectile.speed.max(1);
    while budget > 0 {
        if projectile.remaining_range == 0 {
            return Flight::Spent;
        }

        let next = next_tile(state, projectile);
        if !is_open(state, next) {
            if bounce(state, env, projectile) {
                continue;
            }
            impact(state, env, projectile);
            return Flight::Spent;
        }

        projectile.position = next;
        if projectile.next_path_tile() == Some(next) {
            projectile.path_index += 1;
        }
        projectile.remaining_range -= 1;
        budget -= 1;

        if resolve_hits(state, env, projectile, next) == Flight::Spent {
            return Flight::Spent;
        }
    }

    if projectile.remaining_range == 0 {
        Flight::Spent
    } else {
        Flight::Continue
    }
}

fn next_tile(state: &GameState, projectile: &mut Projectile) -> Position {
    if let Some(target_id) = projectile.homing_target {
        match state.entity(target_id).filter(|e| e.is_alive()) {
            Some(target) => {
                let step = line_path(projectile.position, target.position).first().copied();
                if let Some(step) = step {
                    let (dx, dy) = (step.x - projectile.position.x, step.y - projectile.position.y);
                    if let Some(direction) = Direction::from_offset(dx, dy) {
                        projectile.direction = direction;
                    }
                    return step;
                }
            }
            None => {
                debug!(id = projectile.id, "homing target lost, flying straight");
                projectile.homing_target = None;
            }
        }
    }

    projectile
        .next_path_tile()
        .unwrap_or_else(|| projectile.position.neighbor(projectile.direction))
}

/// Living entities the projectile can hit on `tile`, pre-move positions first.
fn targets_on(state: &GameState, projectile: &Projectile, tile: Position) -> Vec<EntityId> {
    let heal = projectile.payload.is_heal();
    let eligible = |id: EntityId| {
        state.entity(id).is_some_and(|e| {
            e.is_alive()
                && e.id != projectile.source
                && !projectile.hit.contains(&e.id)
                && if heal {
                    e.team == projectile.team
                } else {
                    e.team.opposes(projectile.team)
                }
        })
    };

    let mut targets: Vec<EntityId> = state
        .pre_move_positions
        .iter()
        .filter(|(_, position)| **position == tile)
        .map(|(id, _)| *id)
        .filter(|id| eligible(*id))
        .collect();
    for entity in state.entities.iter().filter(|e| e.position == tile) {
        if eligible(entity.id) && !targets.contains(&entity.id) {
            targets.push(entity.id);
        }
    }
    targets
}

fn resolve_hits(
    state: &mut GameState,
    env: &GameEnv<'_>,
    projectile: &mut Projectile,
    tile: Position,
) -> Flight {
    for target in targets_on(state, projectile, tile) {
        deliver(state, env, projectile, target);
        projectile.hit.insert(target);

        if let Some(explode) = projectile.payload.explode.clone() {
            detonate(state, env, projectile, tile, &explode);
            return Flight::Spent;
        }
        if !projectile.pierce {
            return Flight::Spent;
        }
    }
    Flight::Continue
}

fn deliver(state: &mut GameState, env: &GameEnv<'_>, projectile: &Projectile, target: EntityId) {
    let payload = &projectile.payload;
    trace!(id = projectile.id, %target, "projectile hit");
    if payload.damage > 0 {
        apply_damage(state, target, payload.damage, DamageKind::Direct);
    }
    if payload.heal > 0 {
        apply_heal(state, target, payload.heal);
    }
    if let Some(status_effect) = payload.status_effect.as_deref() {
        apply_status(state, env, target, status_effect, Some(projectile.source));
    }
}

fn detonate(
    state: &mut GameState,
    env: &GameEnv<'_>,
    projectile: &Projectile,
    center: Position,
    spec: &AreaSpec,
) {
    let payload = AreaPayload {
        damage: projectile.payload.damage,
        heal: projectile.payload.heal,
        status_effect: projectile.payload.status_effect.as_deref(),
    };
    burst(
        state,
        env,
        projectile.source,
        projectile.team,
        center,
        spec,
        payload,
    );
}

fn impact(state: &mut GameState, env: &GameEnv<'_>, projectile: &Projectile) {
    trace!(id = projectile.id, position = %projectile.position, "projectile hit a wall");
    state.emit_particle(ParticleKind::Impact, projectile.position);
    if let Some(explode) = projectile.payload.explode.clone() {
        detonate(state, env, projectile, projectile.position, &explode);
    }
}

/// Redirects a projectile that is about to enter a wall. Returns false when
/// it has no bounce left (or nowhere to go).
fn bounce(state: &mut GameState, env: &GameEnv<'_>, projectile: &mut Projectile) -> bool {
    let Some(spec) = projectile.bounce else {
        return false;
    };
    if projectile.bounces >= spec.max_bounces {
        return false;
    }

    let position = projectile.position;
    let heading = projectile.direction;
    let direction = match spec.policy {
        BouncePolicy::Reverse => heading.opposite(),
        BouncePolicy::TurnLeft(angle) => heading.turn(TurnSide::Left, angle),
        BouncePolicy::TurnRight(angle) => heading.turn(TurnSide::Right, angle),
        BouncePolicy::Reflect => reflect(state, position, heading),
        BouncePolicy::Random => {
            let open: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|d| is_open(state, position.neighbor(*d)))
                .collect();
            if open.is_empty() {
                return false;
            }
            let seed = state.next_roll_seed(projectile.source, BOUNCE_ROLL);
            open[env.roller().pick(seed, open.len())]
        }
    };

    projectile.direction = direction;
    projectile.bounces += 1;
    projectile.homing_target = None;
    projectile.path = open_run(state, position, direction, projectile.remaining_range);
    projectile.path_index = 0;
    projectile.target = projectile.path.last().copied().unwrap_or(position);
    debug!(id = projectile.id, ?direction, bounces = projectile.bounces, "projectile bounced");
    true
}

/// Mirrors the blocked axis. Diagonals keep whichever axis is still free;
/// a corner hit flips both.
fn reflect(state: &GameState, position: Position, heading: Direction) -> Direction {
    if heading.is_cardinal() {
        return heading.opposite();
    }
    let (dx, dy) = heading.offset();
    let horizontal_blocked = !is_open(state, Position::new(position.x + dx, position.y));
    let vertical_blocked = !is_open(state, Position::new(position.x, position.y + dy));
    let (rx, ry) = match (horizontal_blocked, vertical_blocked) {
        (true, false) => (-dx, dy),
        (false, true) => (dx, -dy),
        _ => (-dx, -dy),
    };
    Direction::from_offset(rx, ry).unwrap_or(heading.opposite())
}

/// Straight tiles from `from` along `direction`, stopping before the first wall.
fn open_run(state: &GameState, from: Position, direction: Direction, range: u32) -> Vec<Position> {
    line_path(from, from.step(direction, range as i32))
        .into_iter()
        .take_while(|p| is_open(state, *p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AssetCatalog, BounceSpec, ProjectileSpec, StatusEffectAsset};
    use crate::state::{Entity, GameRules, Grid, StatusKind, Team, Tile};
    use crate::status::tick_turn_end;

    fn board(width: u32, height: u32) -> GameState {
        let mut state = GameState::new(Grid::new(width, height), GameRules::default(), 5);
        state.turn = 1;
        state
    }

    fn spawn(state: &mut GameState, team: Team, x: i32, y: i32, health: i32) -> EntityId {
        state.entities.spawn(Entity::new(
            EntityId(0),
            team,
            "unit",
            Position::new(x, y),
            Direction::East,
            health,
        ))
    }

    fn health(state: &GameState, id: EntityId) -> i32 {
        state.entity(id).map_or(i32::MIN, |e| e.health)
    }

    #[test]
    fn straight_shot_travels_speed_tiles_per_turn() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(6, 1);
        let archer = spawn(&mut state, Team::Character, 0, 0, 3);
        let target = spawn(&mut state, Team::Enemy, 4, 0, 3);

        let attack = AttackData::projectile(2, 5, ProjectileSpec::default());
        launch(&mut state, archer, Direction::East, &attack, None);

        for _ in 0..3 {
            advance_projectiles(&mut state, &env);
        }
        assert_eq!(state.projectiles[0].position, Position::new(3, 0));
        assert_eq!(health(&state, target), 3);

        advance_projectiles(&mut state, &env);
        assert!(state.projectiles.is_empty());
        assert_eq!(health(&state, target), 1);
    }

    #[test]
    fn pre_move_snapshot_wins_the_tie() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(5, 2);
        let archer = spawn(&mut state, Team::Character, 0, 0, 3);
        let target = spawn(&mut state, Team::Enemy, 2, 0, 3);

        let spec = ProjectileSpec {
            speed: 3,
            ..ProjectileSpec::default()
        };
        launch(&mut state, archer, Direction::East, &AttackData::projectile(1, 4, spec), None);

        // The enemy steps off the line after the snapshot was taken.
        state.pre_move_positions.insert(target, Position::new(2, 0));
        state.entity_mut(target).expect("target").position = Position::new(2, 1);

        advance_projectiles(&mut state, &env);
        assert_eq!(health(&state, target), 2);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn status_from_a_hit_waits_for_the_next_turn_end_tick() {
        let catalog = AssetCatalog::new()
            .with_status_effect(StatusEffectAsset::new("venom", StatusKind::Poison, 1, 2));
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(5, 1);
        let archer = spawn(&mut state, Team::Character, 0, 0, 3);
        let target = spawn(&mut state, Team::Enemy, 2, 0, 3);

        let spec = ProjectileSpec {
            speed: 4,
            ..ProjectileSpec::default()
        };
        let attack = AttackData::projectile(1, 4, spec).with_status("venom");
        launch(&mut state, archer, Direction::East, &attack, None);
        advance_projectiles(&mut state, &env);

        let statuses = &state.entity(target).expect("target").statuses;
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].applied_turn, 1);
        assert_eq!(health(&state, target), 2);

        tick_turn_end(&mut state);
        assert_eq!(health(&state, target), 2);

        state.turn = 2;
        tick_turn_end(&mut state);
        assert_eq!(health(&state, target), 1);
    }

    #[test]
    fn piercing_shot_hits_each_target_once() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(6, 1);
        let archer = spawn(&mut state, Team::Character, 0, 0, 3);
        let first = spawn(&mut state, Team::Enemy, 1, 0, 3);
        let second = spawn(&mut state, Team::Enemy, 3, 0, 3);

        let spec = ProjectileSpec {
            speed: 5,
            pierce: true,
            ..ProjectileSpec::default()
        };
        launch(&mut state, archer, Direction::East, &AttackData::projectile(1, 5, spec), None);
        advance_projectiles(&mut state, &env);

        assert_eq!(health(&state, first), 2);
        assert_eq!(health(&state, second), 2);
    }

    #[test]
    fn reverse_bounce_returns_along_the_line() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(5, 1);
        state.grid.set(Position::new(3, 0), Some(Tile::wall()));
        let caster = spawn(&mut state, Team::Enemy, 1, 0, 3);
        let victim = spawn(&mut state, Team::Character, 0, 0, 3);

        let spec = ProjectileSpec {
            speed: 4,
            bounce: Some(BounceSpec {
                policy: BouncePolicy::Reverse,
                max_bounces: 1,
            }),
            ..ProjectileSpec::default()
        };
        launch(&mut state, caster, Direction::East, &AttackData::projectile(1, 4, spec), None);
        advance_projectiles(&mut state, &env);

        // East to (2,0), bounce off (3,0), back through (1,0) to hit (0,0).
        assert_eq!(health(&state, victim), 2);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn wall_impact_explodes() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(5, 3);
        state.grid.set(Position::new(3, 1), Some(Tile::wall()));
        let caster = spawn(&mut state, Team::Character, 0, 1, 3);
        let bystander = spawn(&mut state, Team::Enemy, 2, 2, 3);

        let spec = ProjectileSpec {
            speed: 4,
            explode: Some(AreaSpec {
                radius: 1,
                ..AreaSpec::default()
            }),
            ..ProjectileSpec::default()
        };
        launch(&mut state, caster, Direction::East, &AttackData::projectile(2, 4, spec), None);
        advance_projectiles(&mut state, &env);

        assert_eq!(health(&state, bystander), 1);
        assert!(state.particles.iter().any(|p| p.kind == ParticleKind::Impact));
    }

    #[test]
    fn homing_shot_tracks_then_flies_straight_after_target_dies() {
        let catalog = AssetCatalog::new();
        let env = GameEnv::from_catalog(&catalog);
        let mut state = board(7, 7);
        let caster = spawn(&mut state, Team::Character, 0, 0, 3);
        let target = spawn(&mut state, Team::Enemy, 3, 3, 3);

        let spec = ProjectileSpec {
            homing: true,
            ..ProjectileSpec::default()
        };
        launch(&mut state, caster, Direction::East, &AttackData::projectile(1, 6, spec), Some(target));
        advance_projectiles(&mut state, &env);
        assert_eq!(state.projectiles[0].position, Position::new(1, 1));
        assert_eq!(state.projectiles[0].direction, Direction::SouthEast);

        crate::combat::kill(&mut state, target);
        advance_projectiles(&mut state, &env);
        assert_eq!(state.projectiles[0].position, Position::new(2, 2));
        assert_eq!(state.projectiles[0].homing_target, None);
    }
}
