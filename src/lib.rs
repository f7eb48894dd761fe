// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Outpost: a robot-deployment resource game on a 5×5 map.
//!
//! The player sends robots out from a home base to gather food, scrap,
//! circuits and fuel. Every trip costs fuel by distance and counts against a
//! daily quota. Each night the colony eats; when the food runs out, the game
//! is over. Scrap can be refined into steel once a refiner is built.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Terminal front-end (bin)        │
//! ├─────────────────────────────────────┤
//! │   Engine  ──►  Presenter (trait)    │
//! ├─────────────────────────────────────┤
//! │  Game state · Rules · Scheduler     │
//! ├─────────────────────────────────────┤
//! │  Config documents (JSON, serde)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine never draws anything itself. It reports every state change to
//! a [`Presenter`], and delayed effects (cell flashes, the pause before a new
//! day) run on a logical clock the caller advances.

pub mod config;
pub mod error;
pub mod game;

pub use error::{ActionError, ActionResult, ConfigError, TargetError};

// Re-export key game types at crate root for convenience
pub use game::{
    Coord, Dice, Engine, GameRules, GameState, NullPresenter, Outcome, Presenter, ResourceKind,
    SeededDice,
};
