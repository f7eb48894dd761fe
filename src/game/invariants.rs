//! Game invariants - sanity checks that detect bugs.
//!
//! No sequence of actions should be able to break these. If one does, the
//! engine has a bug.

use crate::game::{GameRules, GameState, NextDayPrompt, Phase};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants against the rules the session runs under.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState, rules: &GameRules) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violated = |message: String| violations.push(InvariantViolation { message });

    let day = &state.day;
    if day.current_day == 0 {
        violated("day counter is 0".to_string());
    }

    if day.deployments_today > day.max_deployments_per_day {
        violated(format!(
            "{} deployments today exceeds the daily max {}",
            day.deployments_today, day.max_deployments_per_day
        ));
    }

    if day.max_deployments_per_day != rules.max_deployments_per_day
        || day.daily_food_consumption != rules.daily_food_consumption
    {
        violated("day cycle parameters drifted from the rules".to_string());
    }

    if state.deployment.len() != rules.robot_slots {
        violated(format!(
            "{} robot slots, rules say {}",
            state.deployment.len(),
            rules.robot_slots
        ));
    }

    if state.phase == Phase::EndingDay && day.prompt == NextDayPrompt::PendingConfirmation {
        violated("day is ending while still awaiting confirmation".to_string());
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState, rules: &GameRules) {
    let violations = check_invariants(state, rules);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState, _rules: &GameRules) {}
