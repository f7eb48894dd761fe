//! Constructed buildings.

use std::fmt;

/// A building the player can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    /// Turns scrap into steel.
    Refiner,
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingKind::Refiner => f.write_str("refiner"),
        }
    }
}

/// Counts of constructed buildings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildingState {
    /// Refiners built so far.
    pub refiners: u32,
}

impl BuildingState {
    /// How many of `kind` exist.
    #[must_use]
    pub const fn count(&self, kind: BuildingKind) -> u32 {
        match kind {
            BuildingKind::Refiner => self.refiners,
        }
    }

    /// Record one more `kind`.
    pub fn add(&mut self, kind: BuildingKind) {
        match kind {
            BuildingKind::Refiner => self.refiners = self.refiners.saturating_add(1),
        }
    }
}
