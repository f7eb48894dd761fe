//! Game layer for Outpost.
//!
//! Implements the rules of the deployment game:
//! - 5×5 map with the home base in the centre
//! - Resource stock, daily deployment quota and food consumption
//! - Weighted resource rolls per cell
//! - Refiners that turn scrap into steel
//! - The [`Engine`] that validates and applies player actions

mod buildings;
mod day;
mod deployment;
mod dice;
mod engine;
mod grid;
mod invariants;
mod presenter;
mod resources;
mod rules;
mod scheduler;
mod state;
mod weights;

pub use buildings::{BuildingKind, BuildingState};
pub use day::{DayCycle, NextDayPrompt};
pub use deployment::DeploymentState;
pub use dice::{Dice, SeededDice};
pub use engine::{Engine, Outcome};
pub use grid::{Coord, GRID_SIZE, HOME, ParseCoordError, calculate_fuel_cost};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use presenter::{NullPresenter, Presenter};
pub use resources::{RESOURCE_KIND_COUNT, ResourceBundle, ResourceKind, ResourcePool};
pub use rules::{DeployRule, GameRules};
pub use scheduler::{ScheduledTask, Scheduler, TaskId};
pub use state::{GameState, Phase};
pub use weights::WeightedTable;
