//! In-memory asset repository.
//!
//! [`AssetCatalog`] implements every asset oracle over plain maps. Content
//! loaders fill it from data files; tests build it inline.

use std::collections::BTreeMap;

use super::{
    AbilityOracle, ActorOracle, CharacterDefinition, CollectibleDefinition, CollectibleOracle,
    CustomAttackAsset, CustomTileType, EnemyDefinition, SpellAsset, StatusEffectAsset,
    StatusOracle, TileOracle,
};

/// Serialized as flat lists per asset kind; ids come from each asset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CatalogLists", into = "CatalogLists"))]
pub struct AssetCatalog {
    characters: BTreeMap<String, CharacterDefinition>,
    enemies: BTreeMap<String, EnemyDefinition>,
    spells: BTreeMap<String, SpellAsset>,
    custom_attacks: BTreeMap<String, CustomAttackAsset>,
    tile_types: BTreeMap<String, CustomTileType>,
    status_effects: BTreeMap<String, StatusEffectAsset>,
    collectibles: BTreeMap<String, CollectibleDefinition>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_character(&mut self, definition: CharacterDefinition) {
        self.characters.insert(definition.id.clone(), definition);
    }

    pub fn insert_enemy(&mut self, definition: EnemyDefinition) {
        self.enemies.insert(definition.id.clone(), definition);
    }

    pub fn insert_spell(&mut self, spell: SpellAsset) {
        self.spells.insert(spell.id.clone(), spell);
    }

    pub fn insert_custom_attack(&mut self, attack: CustomAttackAsset) {
        self.custom_attacks.insert(attack.id.clone(), attack);
    }

    pub fn insert_tile_type(&mut self, tile_type: CustomTileType) {
        self.tile_types.insert(tile_type.id.clone(), tile_type);
    }

    pub fn insert_status_effect(&mut self, effect: StatusEffectAsset) {
        self.status_effects.insert(effect.id.clone(), effect);
    }

    pub fn insert_collectible(&mut self, collectible: CollectibleDefinition) {
        self.collectibles.insert(collectible.id.clone(), collectible);
    }

    // Builder-style variants for inline fixtures.

    pub fn with_character(mut self, definition: CharacterDefinition) -> Self {
        self.insert_character(definition);
        self
    }

    pub fn with_enemy(mut self, definition: EnemyDefinition) -> Self {
        self.insert_enemy(definition);
        self
    }

    pub fn with_spell(mut self, spell: SpellAsset) -> Self {
        self.insert_spell(spell);
        self
    }

    pub fn with_custom_attack(mut self, attack: CustomAttackAsset) -> Self {
        self.insert_custom_attack(attack);
        self
    }

    pub fn with_tile_type(mut self, tile_type: CustomTileType) -> Self {
        self.insert_tile_type(tile_type);
        self
    }

    pub fn with_status_effect(mut self, effect: StatusEffectAsset) -> Self {
        self.insert_status_effect(effect);
        self
    }

    pub fn with_collectible(mut self, collectible: CollectibleDefinition) -> Self {
        self.insert_collectible(collectible);
        self
    }

    pub fn character_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.keys().map(String::as_str)
    }

    /// Total number of assets across all kinds.
    pub fn len(&self) -> usize {
        self.characters.len()
            + self.enemies.len()
            + self.spells.len()
            + self.custom_attacks.len()
            + self.tile_types.len()
            + self.status_effects.len()
            + self.collectibles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActorOracle for AssetCatalog {
    fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }
}

impl AbilityOracle for AssetCatalog {
    fn spell(&self, id: &str) -> Option<&SpellAsset> {
        self.spells.get(id)
    }

    fn custom_attack(&self, id: &str) -> Option<&CustomAttackAsset> {
        self.custom_attacks.get(id)
    }
}

impl TileOracle for AssetCatalog {
    fn tile_type(&self, id: &str) -> Option<&CustomTileType> {
        self.tile_types.get(id)
    }
}

impl StatusOracle for AssetCatalog {
    fn status_effect(&self, id: &str) -> Option<&StatusEffectAsset> {
        self.status_effects.get(id)
    }
}

impl CollectibleOracle for AssetCatalog {
    fn collectible(&self, id: &str) -> Option<&CollectibleDefinition> {
        self.collectibles.get(id)
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct CatalogLists {
    characters: Vec<CharacterDefinition>,
    enemies: Vec<EnemyDefinition>,
    spells: Vec<SpellAsset>,
    #[serde(alias = "customAttacks")]
    custom_attacks: Vec<CustomAttackAsset>,
    #[serde(alias = "tileTypes", alias = "custom_tiles")]
    tile_types: Vec<CustomTileType>,
    #[serde(alias = "statusEffects")]
    status_effects: Vec<StatusEffectAsset>,
    collectibles: Vec<CollectibleDefinition>,
}

#[cfg(feature = "serde")]
impl From<CatalogLists> for AssetCatalog {
    fn from(lists: CatalogLists) -> Self {
        let mut catalog = AssetCatalog::new();
        lists.characters.into_iter().for_each(|a| catalog.insert_character(a));
        lists.enemies.into_iter().for_each(|a| catalog.insert_enemy(a));
        lists.spells.into_iter().for_each(|a| catalog.insert_spell(a));
        lists.custom_attacks.into_iter().for_each(|a| catalog.insert_custom_attack(a));
        lists.tile_types.into_iter().for_each(|a| catalog.insert_tile_type(a));
        lists.status_effects.into_iter().for_each(|a| catalog.insert_status_effect(a));
        lists.collectibles.into_iter().for_each(|a| catalog.insert_collectible(a));
        catalog
    }
}

#[cfg(feature = "serde")]
impl From<AssetCatalog> for CatalogLists {
    fn from(catalog: AssetCatalog) -> Self {
        Self {
            characters: catalog.characters.into_values().collect(),
            enemies: catalog.enemies.into_values().collect(),
            spells: catalog.spells.into_values().collect(),
            custom_attacks: catalog.custom_attacks.into_values().collect(),
            tile_types: catalog.tile_types.into_values().collect(),
            status_effects: catalog.status_effects.into_values().collect(),
            collectibles: catalog.collectibles.into_values().collect(),
        }
    }
}
