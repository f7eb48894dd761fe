//! Error types for game actions and configuration loading.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::game::{BuildingKind, Coord, ResourceKind};

/// Why an action was aimed at the wrong thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    /// The home base cannot be collected from.
    HomeBase,
    /// The cell lies outside the map.
    OutOfBounds(Coord),
    /// The cell has no usable resource configuration.
    Unconfigured(Coord),
    /// There is no robot slot with this index.
    UnknownSlot(usize),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::HomeBase => write!(f, "Cannot deploy to home base!"),
            TargetError::OutOfBounds(cell) => write!(f, "Cell {cell} is outside the map"),
            TargetError::Unconfigured(cell) => write!(f, "No configuration for cell {cell}"),
            TargetError::UnknownSlot(slot) => write!(f, "No robot slot {}", slot + 1),
        }
    }
}

/// A rejected player action.
///
/// Rejections leave the game state as it was. The `Display` text is the
/// status line shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The grid configuration has not finished loading.
    ConfigNotReady,
    /// The action targets the home base, an unconfigured cell or a missing
    /// slot.
    InvalidTarget(TargetError),
    /// A resource is below what the action needs.
    InsufficientResource {
        /// The short resource.
        kind: ResourceKind,
        /// Amount required.
        needed: u32,
        /// Amount held.
        available: u32,
    },
    /// A required building has not been built.
    MissingBuilding(BuildingKind),
    /// Today's deployments are used up.
    DailyLimitReached {
        /// Daily quota.
        max: u32,
    },
    /// The day is ending; actions resume on the next day.
    DayEnding,
    /// Food ran out. No further actions are possible.
    GameOver,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::ConfigNotReady => {
                write!(f, "Configuration loading... Please wait and try again")
            }
            ActionError::InvalidTarget(target) => write!(f, "{target}"),
            ActionError::InsufficientResource {
                kind,
                needed,
                available,
            } => write!(f, "Not enough {kind} (need {needed}, have {available})"),
            ActionError::MissingBuilding(kind) => write!(f, "No {kind}s available"),
            ActionError::DailyLimitReached { max } => {
                write!(f, "Daily deployment limit reached ({max})")
            }
            ActionError::DayEnding => write!(f, "The day is ending, please wait"),
            ActionError::GameOver => write!(f, "Game Over: Not enough food to survive!"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<TargetError> for ActionError {
    fn from(target: TargetError) -> Self {
        ActionError::InvalidTarget(target)
    }
}

/// Result type for engine actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Failure to load or validate a configuration document.
#[derive(Debug)]
pub enum ConfigError {
    /// The document could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The document is not valid JSON for its schema.
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// The document parsed but breaks a rule.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            ConfigError::Invalid(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}
