//! The action engine: validates player actions and applies them to the
//! game state.
//!
//! Every action checks its preconditions before touching state. A rejected
//! action returns an [`ActionError`], shows its message through the
//! [`Presenter`] and leaves the state as it was. The one deliberate exception
//! is collection: once the fuel and quota checks pass, the fuel and the
//! deployment are spent even if the cell turns out to be unconfigured or the
//! collection roll fails.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::GridResourceConfig;
use crate::error::{ActionError, ActionResult, TargetError};
use crate::game::{
    BuildingKind, Coord, DeployRule, Dice, GameRules, GameState, NextDayPrompt, Phase, Presenter,
    ResourceKind, ScheduledTask, Scheduler, TaskId, assert_invariants, calculate_fuel_cost,
};

/// What a successful action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A robot slot is now deployed.
    Deployed {
        /// Slot index.
        slot: usize,
    },
    /// A robot slot is now empty.
    Undeployed {
        /// Slot index.
        slot: usize,
    },
    /// The collection roll succeeded and resources were granted.
    Collected {
        /// Cell collected from.
        cell: Coord,
        /// Resource granted.
        kind: ResourceKind,
        /// Quantity granted.
        amount: u32,
    },
    /// The collection roll failed. Fuel and the deployment are still spent.
    CollectionFailed {
        /// Cell collected from.
        cell: Coord,
    },
    /// Deployments remain, so the player must confirm ending the day.
    ConfirmationRequested {
        /// Deployments left today.
        remaining: u32,
    },
    /// Food was eaten and the next day has started or is scheduled to.
    DayEnded {
        /// The day that ended.
        day: u32,
        /// Food eaten.
        food_consumed: u32,
    },
    /// There was not enough food. The game is over.
    GameOver {
        /// The day the colony starved.
        day: u32,
    },
    /// A refiner was built.
    RefinerBuilt {
        /// Refiners owned after building.
        total: u32,
    },
    /// Scrap was refined into steel.
    SteelRefined {
        /// Scrap consumed.
        scrap_used: u32,
        /// Steel produced.
        steel_made: u32,
    },
}

/// Runs player actions against one game session.
///
/// The engine owns the state, the rules, the scheduler for delayed effects,
/// the presenter it reports to and the dice it rolls. Nothing is shared.
#[derive(Debug)]
pub struct Engine<P: Presenter, D: Dice> {
    state: GameState,
    rules: GameRules,
    grid: Option<GridResourceConfig>,
    scheduler: Scheduler,
    clock: Duration,
    flash_resets: HashMap<Coord, TaskId>,
    pending_advance: Option<TaskId>,
    presenter: P,
    dice: D,
}

impl<P: Presenter, D: Dice> Engine<P, D> {
    /// A day-1 session. Actions are rejected until a grid configuration is
    /// installed.
    #[must_use]
    pub fn new(rules: GameRules, presenter: P, dice: D) -> Self {
        let state = GameState::new(&rules);
        Self::with_state(state, rules, presenter, dice)
    }

    /// A session resuming from an explicit state, which must have been built
    /// for `rules`.
    #[must_use]
    pub fn with_state(state: GameState, rules: GameRules, presenter: P, dice: D) -> Self {
        Self {
            state,
            rules,
            grid: None,
            scheduler: Scheduler::new(),
            clock: Duration::ZERO,
            flash_resets: HashMap::new(),
            pending_advance: None,
            presenter,
            dice,
        }
    }

    /// Install the grid configuration; actions are accepted from now on.
    pub fn install_grid_config(&mut self, config: GridResourceConfig) {
        info!(
            cells = config.grid_resources.len(),
            collection_chance = config.collection_chance,
            "grid configuration installed"
        );
        self.grid = Some(config);
        self.refresh_all();
    }

    /// Whether the grid configuration has been installed.
    #[must_use]
    pub fn is_config_ready(&self) -> bool {
        self.grid.is_some()
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rules this session runs under.
    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// The installed grid configuration.
    #[must_use]
    pub fn grid_config(&self) -> Option<&GridResourceConfig> {
        self.grid.as_ref()
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presenter, for front-end-only state.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Logical time last passed to [`Engine::advance_clock`].
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Pending delayed tasks.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Fuel needed to reach a cell.
    #[must_use]
    pub const fn calculate_fuel_cost(&self, x: u8, y: u8) -> u32 {
        calculate_fuel_cost(x, y)
    }

    /// Push every piece of state to the presenter.
    pub fn refresh_all(&mut self) {
        self.refresh_resources();
        self.refresh_deployment_counter();
        self.presenter.refresh_day_counter(self.state.day.current_day);
        self.refresh_slots();
        self.presenter.set_next_day_prompt(self.state.day.prompt);
        self.presenter.refresh_buildings(&self.state.buildings);
        match self.state.phase {
            Phase::GameOver => self.presenter.set_action_message(&ActionError::GameOver.to_string()),
            Phase::Active | Phase::EndingDay => self.show_slot_summary(),
        }
    }

    /// Move the logical clock forward to `now` and run every task that became
    /// due, in order. The clock never moves backwards.
    pub fn advance_clock(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
        while let Some((id, task)) = self.scheduler.pop_due(self.clock) {
            self.run_task(id, task);
        }
    }

    fn run_task(&mut self, id: TaskId, task: ScheduledTask) {
        match task {
            ScheduledTask::ClearFlash(cell) => {
                if self.flash_resets.get(&cell) == Some(&id) {
                    self.flash_resets.remove(&cell);
                }
                self.presenter.clear_cell_flash(cell);
            }
            ScheduledTask::AdvanceDay => {
                self.pending_advance = None;
                if self.state.phase == Phase::EndingDay {
                    self.start_next_day();
                }
            }
        }
    }

    /// Deploy if the slot is empty, undeploy if it is deployed.
    ///
    /// # Errors
    ///
    /// See [`Engine::deploy_robot`] and [`Engine::undeploy_robot`].
    pub fn toggle_robot(&mut self, slot: usize) -> ActionResult<Outcome> {
        match self.state.deployment.is_deployed(slot) {
            Some(true) => self.undeploy_robot(slot),
            Some(false) | None => self.deploy_robot(slot),
        }
    }

    /// Deploy the robot in `slot`, revealing the map.
    ///
    /// Under [`DeployRule::Gated`] this costs fuel and one deployment, and
    /// using the last deployment of the day ends the day.
    ///
    /// # Errors
    ///
    /// Fails if the slot does not exist, or under the gated rule if the daily
    /// quota is used up or fuel is short.
    pub fn deploy_robot(&mut self, slot: usize) -> ActionResult<Outcome> {
        let result = self.try_deploy(slot);
        self.report("deploy", result)
    }

    fn try_deploy(&mut self, slot: usize) -> ActionResult<Outcome> {
        self.ensure_ready()?;
        let deployed = self
            .state
            .deployment
            .is_deployed(slot)
            .ok_or(TargetError::UnknownSlot(slot))?;
        if deployed {
            self.show_slot_summary();
            return Ok(Outcome::Deployed { slot });
        }

        let gated = match self.rules.deploy_rule {
            DeployRule::Free => false,
            DeployRule::Gated { fuel_cost } => {
                if self.state.day.limit_reached() {
                    return Err(ActionError::DailyLimitReached {
                        max: self.state.day.max_deployments_per_day,
                    });
                }
                self.state.resources.withdraw(ResourceKind::Fuel, fuel_cost)?;
                self.state.day.record_deployment();
                self.refresh_resources();
                self.refresh_deployment_counter();
                true
            }
        };

        self.state.deployment.set(slot, true);
        debug!(slot, "robot deployed");
        self.refresh_slots();
        self.show_slot_summary();

        if gated && self.state.day.limit_reached() {
            self.end_day();
        }
        Ok(Outcome::Deployed { slot })
    }

    /// Undeploy the robot in `slot`. Free, and allowed while the day is
    /// ending or configuration is still loading.
    ///
    /// # Errors
    ///
    /// Fails if the slot does not exist or the game is over.
    pub fn undeploy_robot(&mut self, slot: usize) -> ActionResult<Outcome> {
        let result = self.try_undeploy(slot);
        self.report("undeploy", result)
    }

    fn try_undeploy(&mut self, slot: usize) -> ActionResult<Outcome> {
        if self.state.is_game_over() {
            return Err(ActionError::GameOver);
        }
        if !self.state.deployment.set(slot, false) {
            return Err(TargetError::UnknownSlot(slot).into());
        }
        debug!(slot, "robot undeployed");
        self.refresh_slots();
        self.show_slot_summary();
        Ok(Outcome::Undeployed { slot })
    }

    /// Send a robot to `(x, y)` and roll for resources.
    ///
    /// Fuel equal to the distance from home and one deployment are spent as
    /// soon as the fuel and quota checks pass, whatever the roll.
    ///
    /// # Errors
    ///
    /// Fails if configuration is still loading, the target is home or off the
    /// map, fuel is short, the daily quota is used up, or the cell has no
    /// usable configuration (after spending).
    pub fn collect_resources(&mut self, x: u8, y: u8) -> ActionResult<Outcome> {
        let result = self.try_collect(Coord::new(x, y));
        self.report("collect", result)
    }

    fn try_collect(&mut self, cell: Coord) -> ActionResult<Outcome> {
        self.ensure_ready()?;
        if cell.is_home() {
            return Err(TargetError::HomeBase.into());
        }
        if !cell.in_bounds() {
            return Err(TargetError::OutOfBounds(cell).into());
        }

        let fuel_cost = calculate_fuel_cost(cell.x, cell.y);
        self.state.resources.require(ResourceKind::Fuel, fuel_cost)?;
        if self.state.day.limit_reached() {
            return Err(ActionError::DailyLimitReached {
                max: self.state.day.max_deployments_per_day,
            });
        }

        self.state.resources.withdraw(ResourceKind::Fuel, fuel_cost)?;
        self.state.day.record_deployment();
        self.refresh_resources();
        self.refresh_deployment_counter();
        debug!(%cell, fuel_cost, "attempting collection");

        let grid = self.grid.as_ref().ok_or(ActionError::ConfigNotReady)?;
        let collection_chance = grid.collection_chance;
        let Some(cell_config) = grid.cell(cell).cloned() else {
            warn!(%cell, "no configuration for cell");
            return Err(TargetError::Unconfigured(cell).into());
        };
        let Some(table) = cell_config.table() else {
            warn!(%cell, "cell configuration is malformed");
            return Err(TargetError::Unconfigured(cell).into());
        };

        let collection_roll = self.dice.percent();
        if collection_roll > collection_chance {
            debug!(%cell, collection_roll, collection_chance, "collection failed");
            self.flash(cell, false);
            self.presenter
                .set_action_message("Collection failed - try another location");
            return Ok(Outcome::CollectionFailed { cell });
        }

        let resource_roll = self.dice.below(table.total());
        let kind = table
            .pick(resource_roll)
            .ok_or(TargetError::Unconfigured(cell))?;
        let amount = cell_config.amount(kind);
        self.state.resources.add(kind, amount);
        info!(%cell, %kind, amount, "resources collected");

        self.refresh_resources();
        self.flash(cell, true);
        self.presenter
            .set_action_message(&format!("Collected {amount} {kind}!"));
        Ok(Outcome::Collected { cell, kind, amount })
    }

    /// Press the Next Day button.
    ///
    /// With deployments left, the first press only asks for confirmation and
    /// the second ends the day. With none left the day ends at once.
    ///
    /// # Errors
    ///
    /// Fails if configuration is still loading, the day is already ending, or
    /// the game is over.
    pub fn handle_next_day(&mut self) -> ActionResult<Outcome> {
        let result = self.try_next_day();
        self.report("next_day", result)
    }

    fn try_next_day(&mut self) -> ActionResult<Outcome> {
        self.ensure_ready()?;
        let remaining = self.state.day.remaining();

        match self.state.day.prompt {
            NextDayPrompt::Idle if remaining > 0 => {
                self.set_prompt(NextDayPrompt::PendingConfirmation);
                self.presenter.set_action_message(&format!(
                    "Warning: You have {remaining} deployment(s) remaining. Confirm to advance anyway."
                ));
                Ok(Outcome::ConfirmationRequested { remaining })
            }
            NextDayPrompt::PendingConfirmation | NextDayPrompt::Idle => Ok(self.end_day()),
        }
    }

    /// Eat the day's food and schedule the next day.
    ///
    /// If there is not enough food the game ends instead.
    ///
    /// # Errors
    ///
    /// Fails if configuration is still loading, the day is already ending, or
    /// the game is over.
    pub fn consume_daily_food(&mut self) -> ActionResult<Outcome> {
        let result = self.ensure_ready().map(|()| self.end_day());
        self.report("consume_food", result)
    }

    fn end_day(&mut self) -> Outcome {
        if self.state.day.prompt != NextDayPrompt::Idle {
            self.set_prompt(NextDayPrompt::Idle);
        }
        let day = self.state.day.current_day;
        let food = self.state.day.daily_food_consumption;

        if self.state.resources.withdraw(ResourceKind::Food, food).is_err() {
            self.state.phase = Phase::GameOver;
            warn!(day, needed = food, "out of food, game over");
            self.presenter
                .set_action_message(&ActionError::GameOver.to_string());
            return Outcome::GameOver { day };
        }

        info!(day, food_consumed = food, "day ended");
        self.refresh_resources();
        self.presenter
            .set_action_message(&format!("Day {day} ended - {food} food consumed"));

        let delay = self.rules.day_advance_delay();
        if delay.is_zero() {
            self.start_next_day();
        } else {
            self.state.phase = Phase::EndingDay;
            let id = self
                .scheduler
                .schedule(self.clock + delay, ScheduledTask::AdvanceDay);
            self.pending_advance = Some(id);
        }

        Outcome::DayEnded {
            day,
            food_consumed: food,
        }
    }

    /// Start the next day now: reset the quota, undeploy every robot and hide
    /// the map. Cancels a scheduled advance, if any.
    ///
    /// # Errors
    ///
    /// Fails if the game is over.
    pub fn advance_to_next_day(&mut self) -> ActionResult<()> {
        if self.state.is_game_over() {
            return self.report("advance_day", Err(ActionError::GameOver));
        }
        if let Some(id) = self.pending_advance.take() {
            self.scheduler.cancel(id);
        }
        self.start_next_day();
        Ok(())
    }

    fn start_next_day(&mut self) {
        self.state.day.advance();
        self.state.deployment.reset();
        self.state.phase = Phase::Active;
        info!(day = self.state.day.current_day, "new day");

        self.presenter.refresh_day_counter(self.state.day.current_day);
        self.refresh_deployment_counter();
        self.presenter.set_next_day_prompt(NextDayPrompt::Idle);
        self.refresh_slots();
        self.show_slot_summary();
    }

    /// Build a refiner, paying its full cost at once.
    ///
    /// # Errors
    ///
    /// Fails with the first unaffordable cost component, leaving every
    /// resource untouched.
    pub fn build_refiner(&mut self) -> ActionResult<Outcome> {
        let result = self.try_build_refiner();
        self.report("build_refiner", result)
    }

    fn try_build_refiner(&mut self) -> ActionResult<Outcome> {
        self.ensure_ready()?;
        self.state.resources.spend(&self.rules.refiner_cost)?;
        self.state.buildings.add(BuildingKind::Refiner);
        let total = self.state.buildings.refiners;
        info!(total, "refiner built");

        self.refresh_resources();
        self.presenter.refresh_buildings(&self.state.buildings);
        self.presenter
            .set_action_message(&format!("Refiner built! ({total} total)"));
        Ok(Outcome::RefinerBuilt { total })
    }

    /// Refine scrap into steel. Needs at least one refiner.
    ///
    /// # Errors
    ///
    /// Fails if there is no refiner or not enough scrap.
    pub fn refine_steel(&mut self) -> ActionResult<Outcome> {
        let result = self.try_refine_steel();
        self.report("refine_steel", result)
    }

    fn try_refine_steel(&mut self) -> ActionResult<Outcome> {
        self.ensure_ready()?;
        if self.state.buildings.count(BuildingKind::Refiner) == 0 {
            return Err(ActionError::MissingBuilding(BuildingKind::Refiner));
        }

        let scrap_used = self.rules.refine_scrap_cost;
        let steel_made = self.rules.refine_steel_yield;
        self.state
            .resources
            .withdraw(ResourceKind::Scrap, scrap_used)?;
        self.state.resources.add(ResourceKind::Steel, steel_made);
        debug!(scrap_used, steel_made, "steel refined");

        self.refresh_resources();
        self.presenter.set_action_message(&format!(
            "Refined {steel_made} steel using {scrap_used} scrap!"
        ));
        Ok(Outcome::SteelRefined {
            scrap_used,
            steel_made,
        })
    }

    fn ensure_ready(&self) -> ActionResult<()> {
        if self.grid.is_none() {
            return Err(ActionError::ConfigNotReady);
        }
        match self.state.phase {
            Phase::Active => Ok(()),
            Phase::EndingDay => Err(ActionError::DayEnding),
            Phase::GameOver => Err(ActionError::GameOver),
        }
    }

    fn report<T>(&mut self, action: &'static str, result: ActionResult<T>) -> ActionResult<T> {
        assert_invariants(&self.state, &self.rules);
        if let Err(e) = &result {
            debug!(action, error = %e, "action rejected");
            self.presenter.set_action_message(&e.to_string());
        }
        result
    }

    fn flash(&mut self, cell: Coord, success: bool) {
        self.presenter.flash_cell_outcome(cell, success);
        if let Some(previous) = self.flash_resets.remove(&cell) {
            self.scheduler.cancel(previous);
        }
        let due = self.clock + self.rules.flash_duration();
        let id = self.scheduler.schedule(due, ScheduledTask::ClearFlash(cell));
        self.flash_resets.insert(cell, id);
    }

    fn set_prompt(&mut self, prompt: NextDayPrompt) {
        self.state.day.prompt = prompt;
        self.presenter.set_next_day_prompt(prompt);
    }

    fn refresh_resources(&mut self) {
        self.presenter.refresh_resources(&self.state.resources);
    }

    fn refresh_deployment_counter(&mut self) {
        self.presenter.refresh_deployment_counter(
            self.state.day.deployments_today,
            self.state.day.max_deployments_per_day,
        );
    }

    fn refresh_slots(&mut self) {
        self.presenter.refresh_slots(self.state.deployment.slots());
        self.presenter.set_map_visible(self.state.map_visible());
    }

    fn show_slot_summary(&mut self) {
        let deployed = self.state.deployment.deployed_count();
        let remaining = self.state.day.remaining();
        let text = if deployed > 0 {
            format!(
                "{deployed} robot(s) deployed - select grid cells to collect resources \
                 (fuel cost varies by distance, {remaining} left today)!"
            )
        } else if remaining > 0 {
            format!("Deploy robots ({remaining} actions left today)")
        } else {
            "Daily action limit reached - advance to the next day".to_string()
        };
        self.presenter.set_action_message(&text);
    }
}
