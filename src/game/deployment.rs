//! Robot slots.
//!
//! Deploying is a selection toggle: a deployed robot does not sit on any
//! particular cell, it only unlocks the map.

/// Ordered robot slots, each deployed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentState {
    slots: Vec<bool>,
}

impl DeploymentState {
    /// `count` undeployed slots.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![false; count],
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if there are no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Deployed flag of `slot`, or `None` if there is no such slot.
    #[must_use]
    pub fn is_deployed(&self, slot: usize) -> Option<bool> {
        self.slots.get(slot).copied()
    }

    /// Set the deployed flag. Returns `false` if `slot` does not exist.
    pub fn set(&mut self, slot: usize, deployed: bool) -> bool {
        match self.slots.get_mut(slot) {
            Some(flag) => {
                *flag = deployed;
                true
            }
            None => false,
        }
    }

    /// Number of deployed robots.
    #[must_use]
    pub fn deployed_count(&self) -> usize {
        self.slots.iter().filter(|d| **d).count()
    }

    /// The map is visible iff any robot is deployed.
    #[must_use]
    pub fn map_visible(&self) -> bool {
        self.slots.iter().any(|d| *d)
    }

    /// Undeploy every robot.
    pub fn reset(&mut self) {
        self.slots.fill(false);
    }

    /// Slot flags in order.
    #[must_use]
    pub fn slots(&self) -> &[bool] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_follows_slots() {
        let mut slots = DeploymentState::new(2);
        assert!(!slots.map_visible());

        assert!(slots.set(1, true));
        assert!(slots.map_visible());
        assert_eq!(slots.deployed_count(), 1);

        assert!(slots.set(1, false));
        assert!(!slots.map_visible());
    }

    #[test]
    fn test_unknown_slot() {
        let mut slots = DeploymentState::new(1);
        assert!(!slots.set(3, true));
        assert_eq!(slots.is_deployed(3), None);
        assert!(!slots.map_visible());
    }

    #[test]
    fn test_reset() {
        let mut slots = DeploymentState::new(3);
        slots.set(0, true);
        slots.set(2, true);
        slots.reset();
        assert_eq!(slots.slots(), &[false, false, false]);
    }
}
