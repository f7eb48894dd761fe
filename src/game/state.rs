//! Game state management.

use crate::game::{BuildingState, DayCycle, DeploymentState, GameRules, ResourcePool};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting actions.
    #[default]
    Active,
    /// Food has been eaten and the next day is about to start.
    EndingDay,
    /// Food ran out. Terminal.
    GameOver,
}

/// Complete mutable state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Resource stock.
    pub resources: ResourcePool,
    /// Robot slots.
    pub deployment: DeploymentState,
    /// Day counter and quota.
    pub day: DayCycle,
    /// Constructed buildings.
    pub buildings: BuildingState,
    /// Lifecycle phase.
    pub phase: Phase,
}

impl GameState {
    /// Fresh day-1 state built from `rules`.
    #[must_use]
    pub fn new(rules: &GameRules) -> Self {
        Self {
            resources: ResourcePool::from_bundle(&rules.starting_resources),
            deployment: DeploymentState::new(rules.robot_slots),
            day: DayCycle::new(rules.max_deployments_per_day, rules.daily_food_consumption),
            buildings: BuildingState::default(),
            phase: Phase::Active,
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The map is visible iff a robot is deployed.
    #[must_use]
    pub fn map_visible(&self) -> bool {
        self.deployment.map_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{NextDayPrompt, ResourceKind};

    #[test]
    fn test_game_state_creation() {
        let state = GameState::new(&GameRules::default());
        assert_eq!(state.resources.get(ResourceKind::Food), 10);
        assert_eq!(state.resources.get(ResourceKind::Scrap), 5);
        assert_eq!(state.resources.get(ResourceKind::Fuel), 3);
        assert_eq!(state.resources.get(ResourceKind::Steel), 0);
        assert_eq!(state.day.current_day, 1);
        assert_eq!(state.day.prompt, NextDayPrompt::Idle);
        assert_eq!(state.deployment.len(), 1);
        assert_eq!(state.buildings.refiners, 0);
        assert!(!state.map_visible());
        assert!(!state.is_game_over());
    }
}
