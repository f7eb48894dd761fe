#![no_main]

//! Action sequence fuzzer.
//!
//! Drives the engine with arbitrary rules, grid contents, rolls and player
//! input, checking invariants after every step. Rejected actions must not
//! change the state, except that a malformed cell keeps its spend.

use std::collections::BTreeMap;
use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use outpost::config::{CellResourceConfig, GridResourceConfig};
use outpost::game::{
    Coord, DeployRule, Engine, GameRules, NullPresenter, Phase, RESOURCE_KIND_COUNT, ResourceKind,
    SeededDice, check_invariants,
};
use outpost::{ActionError, TargetError};

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Toggle(u8),
    Collect { x: u8, y: u8 },
    NextDay,
    AdvanceNow,
    BuildRefiner,
    Refine,
    Wait(u16),
}

/// Replacement contents for one grid cell.
#[derive(Arbitrary, Debug)]
struct CellOverride {
    x: u8,
    y: u8,
    weights: Option<Vec<(u8, u8)>>,
    amounts: Option<Vec<(u8, u16)>>,
}

impl CellOverride {
    fn config(&self) -> CellResourceConfig {
        CellResourceConfig {
            weights: self.weights.as_ref().map(|w| {
                w.iter()
                    .map(|&(k, weight)| (kind(k), f64::from(weight)))
                    .collect::<BTreeMap<_, _>>()
            }),
            amounts: self.amounts.as_ref().map(|a| {
                a.iter()
                    .map(|&(k, amount)| (kind(k), u32::from(amount)))
                    .collect::<BTreeMap<_, _>>()
            }),
        }
    }
}

fn kind(index: u8) -> ResourceKind {
    ResourceKind::ALL[usize::from(index) % RESOURCE_KIND_COUNT]
}

/// Structured input for action fuzzing.
#[derive(Arbitrary, Debug)]
struct ActionInput {
    seed: u64,
    robot_slots: u8,
    max_deployments: u8,
    daily_food: u8,
    gated_fuel_cost: Option<u8>,
    collection_chance: u8,
    cells: Vec<CellOverride>,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: ActionInput| {
    let rules = GameRules {
        robot_slots: usize::from(input.robot_slots % 5),
        max_deployments_per_day: u32::from(input.max_deployments % 8),
        daily_food_consumption: u32::from(input.daily_food % 6),
        deploy_rule: input
            .gated_fuel_cost
            .map_or(DeployRule::Free, |c| DeployRule::Gated { fuel_cost: u32::from(c % 4) }),
        ..GameRules::default()
    };
    let mut grid = GridResourceConfig::fallback();
    grid.collection_chance = f64::from(input.collection_chance % 101);
    for cell in input.cells.iter().take(25) {
        let key = Coord::new(cell.x % 5, cell.y % 5).key();
        grid.grid_resources.insert(key, cell.config());
    }

    let mut engine = Engine::new(rules, NullPresenter, SeededDice::new(input.seed));
    engine.install_grid_config(grid);
    let mut now = Duration::ZERO;

    for action in input.actions.into_iter().take(200) {
        let before = engine.state().clone();
        let result: Result<(), ActionError> = match action {
            FuzzAction::Toggle(slot) => engine.toggle_robot(usize::from(slot % 6)).map(drop),
            FuzzAction::Collect { x, y } => engine.collect_resources(x % 7, y % 7).map(drop),
            FuzzAction::NextDay => engine.handle_next_day().map(drop),
            FuzzAction::AdvanceNow => engine.advance_to_next_day(),
            FuzzAction::BuildRefiner => engine.build_refiner().map(drop),
            FuzzAction::Refine => engine.refine_steel().map(drop),
            FuzzAction::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                engine.advance_clock(now);
                continue;
            }
        };

        match result {
            Err(ActionError::InvalidTarget(TargetError::Unconfigured(_))) => {
                // Only the fuel spend survives a malformed cell.
                for kind in ResourceKind::ALL.into_iter().filter(|k| *k != ResourceKind::Fuel) {
                    assert_eq!(engine.state().resources.get(kind), before.resources.get(kind));
                }
            }
            Err(e) => assert_eq!(engine.state(), &before, "{e} mutated state"),
            Ok(()) => {}
        }
        if before.phase == Phase::GameOver {
            assert!(engine.state().is_game_over());
        }

        let violations = check_invariants(engine.state(), engine.rules());
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});
