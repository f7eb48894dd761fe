//! Property-based tests for the engine and its building blocks.
//!
//! Run with: cargo test --release prop_engine

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use proptest::prelude::*;

use outpost::config::GridResourceConfig;
use outpost::game::{
    Coord, DeployRule, Engine, GameRules, HOME, NullPresenter, Phase, ResourceKind, SeededDice,
    WeightedTable, calculate_fuel_cost, check_invariants,
};
use outpost::ActionError;

#[derive(Debug, Clone)]
enum Action {
    Toggle(usize),
    Collect(u8, u8),
    NextDay,
    BuildRefiner,
    Refine,
    Wait(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..3).prop_map(Action::Toggle),
        (0u8..6, 0u8..6).prop_map(|(x, y)| Action::Collect(x, y)),
        Just(Action::NextDay),
        Just(Action::BuildRefiner),
        Just(Action::Refine),
        (0u64..3000).prop_map(Action::Wait),
    ]
}

fn kind() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Fuel cost is the Manhattan distance from home.
    #[test]
    fn prop_fuel_cost_is_distance(x in 0u8..5, y in 0u8..5) {
        let cost = calculate_fuel_cost(x, y);
        prop_assert_eq!(cost, u32::from(x.abs_diff(2)) + u32::from(y.abs_diff(2)));
        prop_assert_eq!(cost == 0, Coord::new(x, y) == HOME);
        prop_assert!(cost <= 4);
    }

    /// Every roll inside the total picks a kind that has positive weight.
    #[test]
    fn prop_pick_respects_weights(
        weights in prop::collection::vec((kind(), 0.0f64..10.0), 1..6),
        fraction in 0.0f64..=1.0,
    ) {
        let table = WeightedTable::new(weights.iter().copied());
        prop_assume!(!table.is_empty());

        let picked = table.pick(table.total() * fraction).unwrap();
        let positive = weights.iter().any(|(k, w)| *k == picked && *w > 0.0);
        prop_assert!(positive, "picked {picked} with no positive weight");

        let sum: f64 = table.probabilities().iter().map(|(_, p)| p).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    /// No action sequence breaks an invariant, and rejected actions
    /// (other than post-spend collection failures) leave the state unchanged.
    #[test]
    fn prop_actions_keep_invariants(
        seed in any::<u64>(),
        gated in any::<bool>(),
        actions in prop::collection::vec(action(), 1..80),
    ) {
        let rules = GameRules {
            robot_slots: 2,
            deploy_rule: if gated { DeployRule::Gated { fuel_cost: 1 } } else { DeployRule::Free },
            ..GameRules::default()
        };
        let mut engine = Engine::new(rules, NullPresenter, SeededDice::new(seed));
        engine.install_grid_config(GridResourceConfig::fallback());
        let mut now = Duration::ZERO;

        for action in actions {
            let before = engine.state().clone();
            let result = match action {
                Action::Toggle(slot) => engine.toggle_robot(slot),
                Action::Collect(x, y) => engine.collect_resources(x, y),
                Action::NextDay => engine.handle_next_day(),
                Action::BuildRefiner => engine.build_refiner(),
                Action::Refine => engine.refine_steel(),
                Action::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    engine.advance_clock(now);
                    continue;
                }
            };

            if let Err(e) = result {
                prop_assert_eq!(engine.state(), &before, "{:?} mutated state", e);
            }
            if before.phase == Phase::GameOver {
                prop_assert_eq!(result, Err(ActionError::GameOver));
            }

            let state = engine.state();
            prop_assert!(state.day.deployments_today <= state.day.max_deployments_per_day);
            prop_assert!(state.day.current_day >= before.day.current_day);
            let violations = check_invariants(state, engine.rules());
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }
}
