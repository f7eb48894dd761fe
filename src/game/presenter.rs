//! The display collaborator the engine reports to.

use crate::game::{BuildingState, Coord, NextDayPrompt, ResourcePool};

/// Display operations the engine calls after changing state.
///
/// Every method is fire-and-forget: it returns nothing and must be safe to
/// call at any time. Implementations own all rendering state; the engine
/// owns none.
pub trait Presenter {
    /// Resource quantities changed.
    fn refresh_resources(&mut self, resources: &ResourcePool);

    /// Deployment counter changed (`used` of `max` today).
    fn refresh_deployment_counter(&mut self, used: u32, max: u32);

    /// Day counter changed.
    fn refresh_day_counter(&mut self, day: u32);

    /// Replace the status line shown to the player.
    fn set_action_message(&mut self, text: &str);

    /// Show or hide the map grid.
    fn set_map_visible(&mut self, visible: bool);

    /// Flash a cell green on success or red on failure.
    fn flash_cell_outcome(&mut self, cell: Coord, success: bool);

    /// Return a flashed cell to its normal color.
    fn clear_cell_flash(&mut self, cell: Coord);

    /// Next Day button changed between normal and confirm.
    fn set_next_day_prompt(&mut self, prompt: NextDayPrompt);

    /// Robot slot flags changed.
    fn refresh_slots(&mut self, slots: &[bool]);

    /// Building counts changed.
    fn refresh_buildings(&mut self, buildings: &BuildingState);
}

/// A presenter that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn refresh_resources(&mut self, _resources: &ResourcePool) {}
    fn refresh_deployment_counter(&mut self, _used: u32, _max: u32) {}
    fn refresh_day_counter(&mut self, _day: u32) {}
    fn set_action_message(&mut self, _text: &str) {}
    fn set_map_visible(&mut self, _visible: bool) {}
    fn flash_cell_outcome(&mut self, _cell: Coord, _success: bool) {}
    fn clear_cell_flash(&mut self, _cell: Coord) {}
    fn set_next_day_prompt(&mut self, _prompt: NextDayPrompt) {}
    fn refresh_slots(&mut self, _slots: &[bool]) {}
    fn refresh_buildings(&mut self, _buildings: &BuildingState) {}
}
