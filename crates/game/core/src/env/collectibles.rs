/// Provides collectible definitions by id.
pub trait CollectibleOracle: Send + Sync {
    fn collectible(&self, id: &str) -> Option<&CollectibleDefinition>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CollectibleKind {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "item", alias = "coin"))]
    Item,
    #[cfg_attr(feature = "serde", serde(alias = "key"))]
    Key,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectibleDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: CollectibleKind,
    #[cfg_attr(feature = "serde", serde(default, alias = "scoreValue"))]
    pub score: i32,
    /// Health restored to the character picking it up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: i32,
    #[cfg_attr(feature = "serde", serde(default, alias = "preventPlacement"))]
    pub blocks_placement: bool,
}

impl CollectibleDefinition {
    pub fn new(id: impl Into<String>, kind: CollectibleKind, score: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            score,
            heal: 0,
            blocks_placement: false,
        }
    }
}
