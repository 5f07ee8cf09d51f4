#![warn(missing_docs)]
//! Test surfaces: entity trees shaped the way the language pipeline emits
//! them, plus small registry fixtures.

use mcintent_assets::{RegistryStore, StaticSource, ITEM_CATEGORY};
use mcintent_core::{tags, Entity};

/// Item dump used by tests; carries a header comment like generated dumps.
pub const SAMPLE_ITEMS: &str = r#"/*
 * Test dump with game 'item' registry names.
 */
{
  "version": "1.16.4",
  "data": {
    "sand": "minecraft:sand",
    "dirt": "minecraft:dirt",
    "grass": "minecraft:grass_block",
    "grass block": "minecraft:grass_block",
    "gold": "minecraft:gold_block",
    "iron sword": "minecraft:iron_sword",
    "jigsaw": "minecraft:jigsaw",
    "feather": "minecraft:feather",
    "potion": "minecraft:potion"
  }
}
"#;

/// Registry store serving [`SAMPLE_ITEMS`] as the item category.
pub fn sample_registry() -> RegistryStore {
    RegistryStore::new(StaticSource::new().with(ITEM_CATEGORY, SAMPLE_ITEMS))
}

/// Numeric quantity entity.
pub fn number(value: f64) -> Entity {
    Entity::new(tags::NUMERIC)
        .with_number(value)
        .with_original_text(value.to_string())
}

/// "me" as the issuer refers to themselves.
pub fn me() -> Entity {
    Entity::new(tags::PLAYER)
        .with_lemma("i")
        .with_original_text("me")
}

/// Another player referenced by name.
pub fn player(name: &str) -> Entity {
    Entity::new(tags::PLAYER)
        .with_lemma(name.to_lowercase())
        .with_original_text(name)
}

/// "near <player>".
pub fn near(target: Entity) -> Entity {
    Entity::new(tags::POSITION_PLAYER)
        .with_part(Entity::new("near").with_lemma("near"))
        .with_part(target)
}

/// "<distance> meters in front of <player>"; distance omitted when `None`.
pub fn in_front_of(target: Entity, distance: Option<f64>) -> Entity {
    let mut position = Entity::new(tags::POSITION_FRONT);
    if let Some(distance) = distance {
        position = position.with_part(number(distance));
    }
    position
        .with_part(Entity::new("front").with_lemma("front"))
        .with_part(target)
}

/// "with length of <n>" modifier phrase.
pub fn length_of(value: f64) -> Entity {
    Entity::new("mc:len")
        .with_part(Entity::new("length").with_lemma("length"))
        .with_part(number(value))
}

/// Shape keyword entity.
pub fn shape(tag: &str) -> Entity {
    Entity::new(tag).with_original_text(tag)
}

/// Block or item entity bound to a registry name.
pub fn item(name: &str) -> Entity {
    Entity::new("mc:item")
        .with_value(name)
        .with_original_text(name)
}

/// "give <player>" action phrase.
pub fn give_to(target: Entity) -> Entity {
    Entity::new("mc:give")
        .with_part(Entity::new("give").with_lemma("give"))
        .with_part(target)
}

/// Weather or time-of-day keyword entity.
pub fn keyword(tag: &str) -> Entity {
    Entity::new(tag).with_original_text(tag)
}
