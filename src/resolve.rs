//! Pull quantities, players and positions out of nested entities.

use mcintent_core::{tags, Coordinate, Entity, PlayerRef};

use crate::CompileError;

/// Lemmas that mean the issuer is talking about themselves.
const FIRST_PERSON: [&str; 3] = ["i", "my", "me"];

/// Truncate toward zero, saturating at the `i32` range.
fn to_count(number: f64) -> i32 {
    number.trunc() as i32
}

/// Length carried by a modifier phrase ("with length of 2").
///
/// The numeric value sits one level down, in the phrase's parts. Falls back to
/// `default` when there is no phrase or it carries no number.
pub fn resolve_length(entity: Option<&Entity>, default: i32) -> i32 {
    entity
        .and_then(|phrase| phrase.find_part(tags::NUMERIC))
        .and_then(|num| num.number)
        .map(to_count)
        .unwrap_or(default)
}

/// Count carried directly by a numeric entity ("give me 10 ...").
pub fn resolve_count(entity: Option<&Entity>, default: i32) -> i32 {
    entity
        .and_then(|num| num.number)
        .map(to_count)
        .unwrap_or(default)
}

/// Target player named inside `entity`.
pub fn resolve_player(entity: &Entity) -> Result<PlayerRef, CompileError> {
    let part = entity.find_part(tags::PLAYER).ok_or_else(|| {
        CompileError::structural(format!("player wasn't found in '{}'", entity.tag))
    })?;

    let first_person = match part.lemma.as_deref() {
        None => true,
        Some(lemma) => FIRST_PERSON.contains(&lemma.to_lowercase().as_str()),
    };
    if first_person {
        return Ok(PlayerRef::Myself);
    }

    match part.original_text.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(PlayerRef::named(name)?),
        _ => Ok(PlayerRef::Myself),
    }
}

/// Offset of the fill origin relative to the target player.
pub fn resolve_position(
    entity: &Entity,
    front_distance: i32,
) -> Result<Coordinate, CompileError> {
    match entity.tag.as_str() {
        tags::POSITION_PLAYER => Ok(Coordinate::ZERO),
        tags::POSITION_FRONT => Ok(Coordinate::new(
            0,
            0,
            resolve_length(Some(entity), front_distance),
        )),
        other => Err(CompileError::UnsupportedPosition(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcintent_testkit::{in_front_of, length_of, me, near, number, player};

    #[test]
    fn length_defaults_without_phrase_or_number() {
        assert_eq!(resolve_length(None, 5), 5);
        assert_eq!(resolve_length(Some(&Entity::new("mc:len")), 5), 5);
    }

    #[test]
    fn length_reads_nested_number_and_truncates() {
        assert_eq!(resolve_length(Some(&length_of(2.0)), 5), 2);
        assert_eq!(resolve_length(Some(&length_of(3.9)), 5), 3);
        assert_eq!(resolve_length(Some(&length_of(-2.7)), 5), -2);
    }

    #[test]
    fn length_ignores_the_outer_number() {
        // Only parts are searched, never the phrase itself.
        assert_eq!(resolve_length(Some(&number(7.0)), 5), 5);
    }

    #[test]
    fn count_reads_own_number() {
        assert_eq!(resolve_count(Some(&number(10.0)), 1), 10);
        assert_eq!(resolve_count(None, 1), 1);
    }

    #[test]
    fn first_person_resolves_to_self() {
        for lemma in ["i", "my", "me", "Me"] {
            let entity = near(Entity::new(tags::PLAYER).with_lemma(lemma).with_original_text("x"));
            assert_eq!(resolve_player(&entity).unwrap(), PlayerRef::Myself);
        }
        assert_eq!(resolve_player(&near(me())).unwrap(), PlayerRef::Myself);
    }

    #[test]
    fn missing_lemma_resolves_to_self() {
        let entity = near(Entity::new(tags::PLAYER).with_original_text("Steve"));
        assert_eq!(resolve_player(&entity).unwrap(), PlayerRef::Myself);
    }

    #[test]
    fn named_player_uses_surface_text() {
        let entity = near(player("Steve"));
        assert_eq!(
            resolve_player(&entity).unwrap(),
            PlayerRef::Named("Steve".into())
        );
    }

    #[test]
    fn named_player_must_be_a_game_username() {
        for name in ["Steve kill @e[type=!player]", "Jösé"] {
            let err = resolve_player(&near(player(name))).unwrap_err();
            assert!(matches!(&err, CompileError::InvalidPlayerName(bad) if bad.0 == name));
            assert!(err.is_rejection());
        }
    }

    #[test]
    fn named_player_without_text_falls_back_to_self() {
        let entity = near(Entity::new(tags::PLAYER).with_lemma("steve"));
        assert_eq!(resolve_player(&entity).unwrap(), PlayerRef::Myself);
    }

    #[test]
    fn missing_player_is_structural() {
        let err = resolve_player(&Entity::new(tags::POSITION_FRONT)).unwrap_err();
        assert!(matches!(err, CompileError::Structural(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn at_player_is_origin_even_with_number() {
        let entity = near(me()).with_part(number(4.0));
        assert_eq!(resolve_position(&entity, 10).unwrap(), Coordinate::ZERO);
    }

    #[test]
    fn in_front_uses_distance_or_default() {
        assert_eq!(
            resolve_position(&in_front_of(me(), None), 10).unwrap(),
            Coordinate::new(0, 0, 10)
        );
        assert_eq!(
            resolve_position(&in_front_of(me(), Some(3.0)), 10).unwrap(),
            Coordinate::new(0, 0, 3)
        );
    }

    #[test]
    fn unknown_position_is_rejected() {
        let err = resolve_position(&Entity::new("position:behind"), 10).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPosition(tag) if tag == "position:behind"));
    }
}
