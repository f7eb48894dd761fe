//! Terminal layout parameters. Only the front-end reads these.

use serde::{Deserialize, Serialize};

/// Resource panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceDisplayLayout {
    /// Blank rows between resource lines.
    pub line_spacing: u16,
    /// Width of the resource column.
    pub width: u16,
}

impl Default for ResourceDisplayLayout {
    fn default() -> Self {
        Self {
            line_spacing: 0,
            width: 24,
        }
    }
}

/// Map grid geometry, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridLayout {
    /// Tile width in columns.
    pub tile_width: u16,
    /// Tile height in rows.
    pub tile_height: u16,
    /// Gap between tiles.
    pub tile_spacing: u16,
    /// Print each tile's fuel cost in its corner.
    pub show_fuel_costs: bool,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            tile_width: 8,
            tile_height: 3,
            tile_spacing: 1,
            show_fuel_costs: true,
        }
    }
}

/// Robot slot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotLayout {
    /// Slot width in columns.
    pub slot_width: u16,
    /// Gap between slots.
    pub slot_spacing: u16,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            slot_width: 9,
            slot_spacing: 1,
        }
    }
}

/// Status line area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionsTextLayout {
    /// Rows reserved for the status line, including borders.
    pub height: u16,
}

impl Default for ActionsTextLayout {
    fn default() -> Self {
        Self { height: 4 }
    }
}

/// The layout document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Resource panel.
    pub resource_display: ResourceDisplayLayout,
    /// Map grid.
    pub grid: GridLayout,
    /// Robot slots.
    pub robot_slots: SlotLayout,
    /// Status line.
    pub actions_text: ActionsTextLayout,
}

impl LayoutConfig {
    /// Columns needed to draw the whole grid.
    #[must_use]
    pub const fn grid_width(&self, cells: u16) -> u16 {
        span(cells, self.grid.tile_width, self.grid.tile_spacing)
    }

    /// Rows needed to draw the whole grid.
    #[must_use]
    pub const fn grid_height(&self, cells: u16) -> u16 {
        span(cells, self.grid.tile_height, self.grid.tile_spacing)
    }

    /// Offset of tile `(col, row)` from the top-left of the map area.
    #[must_use]
    pub const fn tile_offset(&self, col: u16, row: u16) -> (u16, u16) {
        let grid = &self.grid;
        (
            col.saturating_mul(grid.tile_width.saturating_add(grid.tile_spacing)),
            row.saturating_mul(grid.tile_height.saturating_add(grid.tile_spacing)),
        )
    }
}

// Saturates so oversized documents cannot overflow terminal coordinates.
const fn span(cells: u16, tile: u16, spacing: u16) -> u16 {
    cells
        .saturating_mul(tile)
        .saturating_add(cells.saturating_sub(1).saturating_mul(spacing))
}
