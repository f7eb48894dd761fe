//! Tunable game constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{ResourceBundle, ResourceKind};

/// How deploying a robot is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DeployRule {
    /// Deploying is a free toggle that only reveals the map. Deployments are
    /// counted when a cell is collected from.
    #[default]
    Free,
    /// Deploying costs fuel and one daily deployment. Using the last
    /// deployment of the day ends the day.
    #[serde(rename_all = "camelCase")]
    Gated {
        /// Fuel charged per deployment.
        fuel_cost: u32,
    },
}

/// Game constants, loadable from a JSON rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRules {
    /// Stock at the start of day 1.
    pub starting_resources: ResourceBundle,
    /// Number of robot slots.
    pub robot_slots: usize,
    /// Deployments allowed per day.
    pub max_deployments_per_day: u32,
    /// Food eaten at the end of every day.
    pub daily_food_consumption: u32,
    /// Deployment charging rule.
    pub deploy_rule: DeployRule,
    /// Price of one refiner.
    pub refiner_cost: ResourceBundle,
    /// Scrap consumed per refine.
    pub refine_scrap_cost: u32,
    /// Steel produced per refine.
    pub refine_steel_yield: u32,
    /// Pause between eating and the next day starting, in milliseconds.
    pub day_advance_delay_ms: u64,
    /// How long a collection flash stays on a cell, in milliseconds.
    pub flash_duration_ms: u64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_resources: ResourceBundle::new()
                .with(ResourceKind::Food, 10)
                .with(ResourceKind::Scrap, 5)
                .with(ResourceKind::Fuel, 3),
            robot_slots: 1,
            max_deployments_per_day: 3,
            daily_food_consumption: 2,
            deploy_rule: DeployRule::Free,
            refiner_cost: ResourceBundle::new()
                .with(ResourceKind::Scrap, 20)
                .with(ResourceKind::Fuel, 5)
                .with(ResourceKind::Circuits, 2),
            refine_scrap_cost: 3,
            refine_steel_yield: 1,
            day_advance_delay_ms: 2000,
            flash_duration_ms: 300,
        }
    }
}

impl GameRules {
    /// Day-advance delay as a duration.
    #[must_use]
    pub const fn day_advance_delay(&self) -> Duration {
        Duration::from_millis(self.day_advance_delay_ms)
    }

    /// Flash duration as a duration.
    #[must_use]
    pub const fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}
