use std::fmt;

use mcintent_core::{Bounds, Coordinate, PlayerRef};

use crate::CompileError;

/// Weather states the game's `weather` command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherState {
    Clear,
    Rain,
    Thunder,
}

impl WeatherState {
    pub fn from_tag(tag: &str) -> Result<Self, CompileError> {
        match tag {
            "clear" => Ok(Self::Clear),
            "rain" => Ok(Self::Rain),
            "thunder" => Ok(Self::Thunder),
            _ => Err(CompileError::UnsupportedWeather(tag.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rain",
            Self::Thunder => "thunder",
        }
    }
}

/// Named times of day and the game tick each maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Day,
    Afternoon,
    Evening,
    Night,
    Midnight,
}

impl TimeOfDay {
    pub fn from_tag(tag: &str) -> Result<Self, CompileError> {
        match tag {
            "morning" => Ok(Self::Morning),
            "day" => Ok(Self::Day),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            "midnight" => Ok(Self::Midnight),
            _ => Err(CompileError::UnsupportedTime(tag.to_string())),
        }
    }

    pub fn tick(self) -> u32 {
        match self {
            Self::Morning => 23000,
            Self::Day => 1000,
            Self::Afternoon => 6000,
            // Evening and night share a tick.
            Self::Evening | Self::Night => 12000,
            Self::Midnight => 18000,
        }
    }
}

/// A synthesized command, ready to be rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    WeatherSet {
        state: WeatherState,
    },
    TimeSet {
        time: TimeOfDay,
    },
    Give {
        player: PlayerRef,
        item: String,
        count: i32,
    },
    Fill {
        player: PlayerRef,
        position: Coordinate,
        bounds: Bounds,
        block: String,
    },
}

impl fmt::Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeatherSet { state } => write!(f, "weather {}", state.name()),
            Self::TimeSet { time } => write!(f, "time set {}", time.tick()),
            Self::Give {
                player,
                item,
                count,
            } => write!(f, "give {player} {item} {count}"),
            Self::Fill {
                player,
                position,
                bounds,
                block,
            } => f.write_str(&format_fill(player, *position, *bounds, block)),
        }
    }
}

/// Render a fill anchored on `player`, offset by `position`, facing-relative.
///
/// The layout is fixed by the game's command grammar.
pub fn format_fill(
    player: &PlayerRef,
    position: Coordinate,
    bounds: Bounds,
    block: &str,
) -> String {
    format!(
        "execute at {player} positioned {} rotated 0 0 run fill {} {} {block}",
        position.relative(),
        bounds.from.relative_rotated(),
        bounds.to.relative_rotated(),
    )
}
