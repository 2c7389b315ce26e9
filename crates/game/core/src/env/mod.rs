//! Traits describing read-only asset data.
//!
//! Oracles expose character and enemy templates, spells, custom tiles, status
//! effects, and collectibles by id. The [`Env`] aggregate bundles them so the
//! engine can look everything up without coupling to a concrete repository.
//! Any lookup may come back empty; callers log and skip instead of failing.
mod abilities;
mod actors;
mod catalog;
mod collectibles;
mod error;
mod rng;
mod status;
mod tiles;

pub use abilities::{
    AbilityOracle, AreaAffects, AreaCenter, AreaSpec, AttackData, AttackPattern, BouncePolicy,
    BounceSpec, CustomAttackAsset, DirectionMode, PersistentSpec, ProjectileSpec, SpellAsset,
};
pub use actors::{ActorOracle, CharacterDefinition, EnemyDefinition};
pub use catalog::AssetCatalog;
pub use collectibles::{CollectibleDefinition, CollectibleKind, CollectibleOracle};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use status::{StatusEffectAsset, StatusOracle};
pub use tiles::{CustomTileType, PlateEffect, TileBehavior, TileOracle};

static DEFAULT_RNG: PcgRng = PcgRng;

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, A, B, T, S, C, R>
where
    A: ActorOracle + ?Sized,
    B: AbilityOracle + ?Sized,
    T: TileOracle + ?Sized,
    S: StatusOracle + ?Sized,
    C: CollectibleOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    actors: Option<&'a A>,
    abilities: Option<&'a B>,
    tiles: Option<&'a T>,
    statuses: Option<&'a S>,
    collectibles: Option<&'a C>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn ActorOracle + 'a,
    dyn AbilityOracle + 'a,
    dyn TileOracle + 'a,
    dyn StatusOracle + 'a,
    dyn CollectibleOracle + 'a,
    dyn RngOracle + 'a,
>;

// Copy for any oracle types, sized or not.
impl<A, B, T, S, C, R> Clone for Env<'_, A, B, T, S, C, R>
where
    A: ActorOracle + ?Sized,
    B: AbilityOracle + ?Sized,
    T: TileOracle + ?Sized,
    S: StatusOracle + ?Sized,
    C: CollectibleOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B, T, S, C, R> Copy for Env<'_, A, B, T, S, C, R>
where
    A: ActorOracle + ?Sized,
    B: AbilityOracle + ?Sized,
    T: TileOracle + ?Sized,
    S: StatusOracle + ?Sized,
    C: CollectibleOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<A, B, T, S, C, R> std::fmt::Debug for Env<'_, A, B, T, S, C, R>
where
    A: ActorOracle + ?Sized,
    B: AbilityOracle + ?Sized,
    T: TileOracle + ?Sized,
    S: StatusOracle + ?Sized,
    C: CollectibleOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("actors", &self.actors.is_some())
            .field("abilities", &self.abilities.is_some())
            .field("tiles", &self.tiles.is_some())
            .field("statuses", &self.statuses.is_some())
            .field("collectibles", &self.collectibles.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}

impl<'a, A, B, T, S, C, R> Env<'a, A, B, T, S, C, R>
where
    A: ActorOracle + ?Sized,
    B: AbilityOracle + ?Sized,
    T: TileOracle + ?Sized,
    S: StatusOracle + ?Sized,
    C: CollectibleOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        actors: Option<&'a A>,
        abilities: Option<&'a B>,
        tiles: Option<&'a T>,
        statuses: Option<&'a S>,
        collectibles: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            actors,
            abilities,
            tiles,
            statuses,
            collectibles,
            rng,
        }
    }

    pub fn with_all(
        actors: &'a A,
        abilities: &'a B,
        tiles: &'a T,
        statuses: &'a S,
        collectibles: &'a C,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(actors),
            Some(abilities),
            Some(tiles),
            Some(statuses),
            Some(collectibles),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            actors: None,
            abilities: None,
            tiles: None,
            statuses: None,
            collectibles: None,
            rng: None,
        }
    }

    /// Returns the ActorOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActorsNotAvailable` if no actor oracle was provided.
    pub fn actors(&self) -> Result<&'a A, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }

    pub fn abilities(&self) -> Result<&'a B, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    pub fn tiles(&self) -> Result<&'a T, OracleError> {
        self.tiles.ok_or(OracleError::TilesNotAvailable)
    }

    pub fn statuses(&self) -> Result<&'a S, OracleError> {
        self.statuses.ok_or(OracleError::StatusesNotAvailable)
    }

    pub fn collectibles(&self) -> Result<&'a C, OracleError> {
        self.collectibles.ok_or(OracleError::CollectiblesNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, A, B, T, S, C, R> Env<'a, A, B, T, S, C, R>
where
    A: ActorOracle + 'a,
    B: AbilityOracle + 'a,
    T: TileOracle + 'a,
    S: StatusOracle + 'a,
    C: CollectibleOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let actors: Option<&'a dyn ActorOracle> = self.actors.map(|o| o as _);
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|o| o as _);
        let tiles: Option<&'a dyn TileOracle> = self.tiles.map(|o| o as _);
        let statuses: Option<&'a dyn StatusOracle> = self.statuses.map(|o| o as _);
        let collectibles: Option<&'a dyn CollectibleOracle> = self.collectibles.map(|o| o as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|o| o as _);
        Env::new(actors, abilities, tiles, statuses, collectibles, rng)
    }
}

impl<'a> GameEnv<'a> {
    /// Every asset oracle backed by one catalog, with the default PCG rng.
    pub fn from_catalog(catalog: &'a AssetCatalog) -> Self {
        Env::new(
            Some(catalog as &'a dyn ActorOracle),
            Some(catalog as &'a dyn AbilityOracle),
            Some(catalog as &'a dyn TileOracle),
            Some(catalog as &'a dyn StatusOracle),
            Some(catalog as &'a dyn CollectibleOracle),
            Some(&DEFAULT_RNG as &'a dyn RngOracle),
        )
    }

    // Flat lookups. A missing oracle reads the same as a missing id.

    pub fn character(&self, id: &str) -> Option<&'a CharacterDefinition> {
        self.actors.and_then(|o| o.character(id))
    }

    pub fn enemy(&self, id: &str) -> Option<&'a EnemyDefinition> {
        self.actors.and_then(|o| o.enemy(id))
    }

    pub fn spell(&self, id: &str) -> Option<&'a SpellAsset> {
        self.abilities.and_then(|o| o.spell(id))
    }

    pub fn custom_attack(&self, id: &str) -> Option<&'a CustomAttackAsset> {
        self.abilities.and_then(|o| o.custom_attack(id))
    }

    pub fn tile_type(&self, id: &str) -> Option<&'a CustomTileType> {
        self.tiles.and_then(|o| o.tile_type(id))
    }

    pub fn status_effect(&self, id: &str) -> Option<&'a StatusEffectAsset> {
        self.statuses.and_then(|o| o.status_effect(id))
    }

    pub fn collectible(&self, id: &str) -> Option<&'a CollectibleDefinition> {
        self.collectibles.and_then(|o| o.collectible(id))
    }

    /// The configured rng, or the built-in PCG generator.
    pub fn roller(&self) -> &'a dyn RngOracle {
        match self.rng {
            Some(rng) => rng,
            None => &DEFAULT_RNG,
        }
    }
}

impl Default for GameEnv<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
