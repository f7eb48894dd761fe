//! Display model the engine writes into and the renderer reads from.

use outpost::game::{BuildingState, Coord, NextDayPrompt, Presenter, ResourcePool};
use std::collections::HashMap;

/// Everything currently shown on screen.
#[derive(Debug, Default)]
pub(crate) struct TuiPresenter {
    pub(crate) resources: ResourcePool,
    pub(crate) deployments_used: u32,
    pub(crate) deployments_max: u32,
    pub(crate) day: u32,
    pub(crate) message: String,
    pub(crate) map_visible: bool,
    /// Cells currently flashing, with whether the collection succeeded.
    pub(crate) flashes: HashMap<Coord, bool>,
    pub(crate) prompt: NextDayPrompt,
    pub(crate) slots: Vec<bool>,
    pub(crate) buildings: BuildingState,
}

impl TuiPresenter {
    /// Flash state of `cell`, if any.
    pub(crate) fn flash(&self, cell: Coord) -> Option<bool> {
        self.flashes.get(&cell).copied()
    }
}

impl Presenter for TuiPresenter {
    fn refresh_resources(&mut self, resources: &ResourcePool) {
        self.resources = *resources;
    }

    fn refresh_deployment_counter(&mut self, used: u32, max: u32) {
        self.deployments_used = used;
        self.deployments_max = max;
    }

    fn refresh_day_counter(&mut self, day: u32) {
        self.day = day;
    }

    fn set_action_message(&mut self, text: &str) {
        text.clone_into(&mut self.message);
    }

    fn set_map_visible(&mut self, visible: bool) {
        self.map_visible = visible;
    }

    fn flash_cell_outcome(&mut self, cell: Coord, success: bool) {
        self.flashes.insert(cell, success);
    }

    fn clear_cell_flash(&mut self, cell: Coord) {
        self.flashes.remove(&cell);
    }

    fn set_next_day_prompt(&mut self, prompt: NextDayPrompt) {
        self.prompt = prompt;
    }

    fn refresh_slots(&mut self, slots: &[bool]) {
        slots.clone_into(&mut self.slots);
    }

    fn refresh_buildings(&mut self, buildings: &BuildingState) {
        self.buildings = *buildings;
    }
}
