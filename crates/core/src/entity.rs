//! Semantic entities.
//!
//! The language pipeline segments a sentence into tagged entities, each of
//! which may wrap further entities (its "parts"). Only the handful of fields
//! the command compiler reads are modelled here; everything else the pipeline
//! attaches is dropped at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Well-known entity tags produced by the upstream pipeline.
pub mod tags {
    /// Numeric quantity; the parsed value lives in [`Entity::number`](super::Entity::number).
    pub const NUMERIC: &str = "nlpcraft:num";
    /// Reference to a player ("me", "Steve", ...).
    pub const PLAYER: &str = "mc:player";
    /// "at/near the player" position phrase.
    pub const POSITION_PLAYER: &str = "position:player";
    /// "in front of the player" position phrase.
    pub const POSITION_FRONT: &str = "position:front";
    /// Optional prefix on shape tags (`shape:cube`).
    pub const SHAPE_PREFIX: &str = "shape:";
}

/// Maximum nesting accepted at the boundary.
pub const MAX_DEPTH: usize = 32;

/// A recognised unit of input, possibly wrapping nested entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Identifying tag, e.g. `position:front`.
    pub tag: String,
    /// Raw value bound to the entity (registry element name for items/blocks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Normalized numeric value for quantity entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    /// Surface text exactly as the user typed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Canonicalized form of the surface text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Nested entities, in sentence order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Entity>,
}

impl Entity {
    /// Create a bare entity with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Attach a raw value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a normalized number.
    pub fn with_number(mut self, number: f64) -> Self {
        self.number = Some(number);
        self
    }

    /// Attach the original surface text.
    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = Some(text.into());
        self
    }

    /// Attach a lemma.
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Append a nested entity.
    pub fn with_part(mut self, part: Entity) -> Self {
        self.parts.push(part);
        self
    }

    /// First direct part carrying `tag`.
    pub fn find_part(&self, tag: &str) -> Option<&Entity> {
        self.parts.iter().find(|part| part.tag == tag)
    }

    /// Whether this entity carries `tag`.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Validate the tree once at the pipeline boundary.
    ///
    /// After this returns `Ok`, every tag is non-empty, every number is finite,
    /// and no text that may end up inside a command contains control characters.
    pub fn validate(&self) -> Result<(), EntityError> {
        self.validate_at(0)
    }

    fn validate_at(&self, depth: usize) -> Result<(), EntityError> {
        if depth > MAX_DEPTH {
            return Err(EntityError::TooDeep { max: MAX_DEPTH });
        }
        if self.tag.trim().is_empty() {
            return Err(EntityError::EmptyTag);
        }
        if let Some(number) = self.number {
            if !number.is_finite() {
                return Err(EntityError::NonFiniteNumber {
                    tag: self.tag.clone(),
                });
            }
        }
        if let Some(text) = self.original_text.as_deref() {
            if text.chars().any(char::is_control) {
                return Err(EntityError::ControlCharacters {
                    tag: self.tag.clone(),
                });
            }
        }
        for part in &self.parts {
            part.validate_at(depth + 1)?;
        }
        Ok(())
    }
}

/// Malformed entity trees rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// An entity arrived without a tag.
    #[error("entity tag cannot be empty")]
    EmptyTag,
    /// A numeric entity carried NaN or infinity.
    #[error("entity '{tag}' carries a non-finite number")]
    NonFiniteNumber {
        /// Offending entity tag.
        tag: String,
    },
    /// Surface text contained newlines or other control characters.
    #[error("entity '{tag}' has control characters in its text")]
    ControlCharacters {
        /// Offending entity tag.
        tag: String,
    },
    /// The tree nests deeper than any grammar produces.
    #[error("entity tree nests deeper than {max} levels")]
    TooDeep {
        /// Configured limit.
        max: usize,
    },
}

/// Target of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerRef {
    /// The command issuer, rendered as `@p`.
    Myself,
    /// A player by name.
    Named(String),
}

/// Surface text that is not a valid game username.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid player name")]
pub struct InvalidPlayerName(pub String);

impl PlayerRef {
    /// Selector token for the command issuer.
    pub const SELF_TOKEN: &'static str = "@p";
    /// Longest username the game accepts.
    pub const MAX_NAME_LEN: usize = 16;

    /// A player by name; `name` must be 1 to 16 ASCII letters, digits or `_`.
    pub fn named(name: impl Into<String>) -> Result<Self, InvalidPlayerName> {
        let name = name.into();
        let valid = (1..=Self::MAX_NAME_LEN).contains(&name.len())
            && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if valid {
            Ok(Self::Named(name))
        } else {
            Err(InvalidPlayerName(name))
        }
    }
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Myself => f.write_str(Self::SELF_TOKEN),
            Self::Named(name) => f.write_str(name),
        }
    }
}
