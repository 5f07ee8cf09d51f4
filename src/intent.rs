//! Matched intents and their compilation into game commands.

use mcintent_assets::{RegistryStore, ITEM_CATEGORY};
use mcintent_core::{compute_bounds, Entity, ShapeKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::{GameCommand, TimeOfDay, WeatherState};
use crate::config::CompilerConfig;
use crate::resolve::{resolve_count, resolve_length, resolve_player, resolve_position};
use crate::CompileError;

/// An intent matched by the upstream grammar, with the entities bound to its terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// "make it rain"
    Weather { arg: Entity },
    /// "set time to evening"
    Time { arg: Entity },
    /// "give me 10 grass blocks"
    Give {
        item: Entity,
        action: Entity,
        #[serde(default)]
        quantity: Option<Entity>,
    },
    /// "make a cube of gold near me"
    Fill {
        shape: Entity,
        block: Entity,
        #[serde(default)]
        length: Option<Entity>,
        position: Entity,
    },
}

impl Intent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weather { .. } => "weather",
            Self::Time { .. } => "time",
            Self::Give { .. } => "give",
            Self::Fill { .. } => "fill",
        }
    }

    fn entities(&self) -> Vec<&Entity> {
        match self {
            Self::Weather { arg } | Self::Time { arg } => vec![arg],
            Self::Give {
                item,
                action,
                quantity,
            } => [Some(item), Some(action), quantity.as_ref()]
                .into_iter()
                .flatten()
                .collect(),
            Self::Fill {
                shape,
                block,
                length,
                position,
            } => [Some(shape), Some(block), length.as_ref(), Some(position)]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

/// One request as handed over by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMatch {
    /// The winning intent.
    #[serde(flatten)]
    pub intent: Intent,
    /// Whether other intents matched equally well.
    #[serde(default)]
    pub ambiguous: bool,
}

impl From<Intent> for IntentMatch {
    fn from(intent: Intent) -> Self {
        Self {
            intent,
            ambiguous: false,
        }
    }
}

/// Turns matched intents into command text.
///
/// Stateless apart from the shared registry; one instance serves any number
/// of requests.
#[derive(Debug)]
pub struct IntentCompiler<'r> {
    registry: &'r RegistryStore,
    config: CompilerConfig,
}

impl<'r> IntentCompiler<'r> {
    pub fn new(registry: &'r RegistryStore, config: CompilerConfig) -> Self {
        Self { registry, config }
    }

    /// Compile a request to its command line.
    pub fn compile(&self, request: &IntentMatch) -> Result<String, CompileError> {
        let command = self.compile_command(request)?;
        let text = command.to_string();
        debug!(intent = request.intent.name(), command = %text, "synthesized command");
        Ok(text)
    }

    /// Compile a request to a structured command.
    ///
    /// Nothing is rendered until every term has resolved, so a failure never
    /// leaves a partial command behind.
    pub fn compile_command(&self, request: &IntentMatch) -> Result<GameCommand, CompileError> {
        if request.ambiguous && self.config.reject_ambiguous {
            return Err(CompileError::Ambiguous);
        }
        for entity in request.intent.entities() {
            entity.validate()?;
        }

        match &request.intent {
            Intent::Weather { arg } => self.weather(arg),
            Intent::Time { arg } => self.time(arg),
            Intent::Give {
                item,
                action,
                quantity,
            } => self.give(item, action, quantity.as_ref()),
            Intent::Fill {
                shape,
                block,
                length,
                position,
            } => self.fill(shape, block, length.as_ref(), position),
        }
    }

    fn weather(&self, arg: &Entity) -> Result<GameCommand, CompileError> {
        Ok(GameCommand::WeatherSet {
            state: WeatherState::from_tag(&arg.tag)?,
        })
    }

    fn time(&self, arg: &Entity) -> Result<GameCommand, CompileError> {
        Ok(GameCommand::TimeSet {
            time: TimeOfDay::from_tag(&arg.tag)?,
        })
    }

    fn give(
        &self,
        item: &Entity,
        action: &Entity,
        quantity: Option<&Entity>,
    ) -> Result<GameCommand, CompileError> {
        let player = resolve_player(action)?;
        let count = resolve_count(quantity, self.config.default_give_quantity);
        let item = self.item_id(item)?;
        Ok(GameCommand::Give {
            player,
            item,
            count,
        })
    }

    fn fill(
        &self,
        shape: &Entity,
        block: &Entity,
        length: Option<&Entity>,
        position: &Entity,
    ) -> Result<GameCommand, CompileError> {
        let shape = ShapeKind::from_tag(&shape.tag)?;
        let length = resolve_length(length, self.config.default_fill_length);
        let bounds = compute_bounds(shape, length);
        let block = self.item_id(block)?;
        let player = resolve_player(position)?;
        let position = resolve_position(position, self.config.default_front_distance)?;
        Ok(GameCommand::Fill {
            player,
            position,
            bounds,
            block,
        })
    }

    fn item_id(&self, entity: &Entity) -> Result<String, CompileError> {
        let name = entity.value.as_deref().ok_or_else(|| {
            CompileError::structural(format!("'{}' carries no registry name", entity.tag))
        })?;
        Ok(self.registry.lookup(ITEM_CATEGORY, name)?)
    }
}
