//! Resource kinds and the player's resource pool.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Number of distinct resource kinds.
pub const RESOURCE_KIND_COUNT: usize = 5;

/// A kind of resource the player can hold.
///
/// Declaration order is the fixed enumeration order used by the weighted
/// resource roll and by cost checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Consumed every day; running out ends the game.
    Food,
    /// Raw salvage. Older configuration documents call this `metal`.
    #[serde(alias = "metal")]
    Scrap,
    /// Electronics used for construction.
    Circuits,
    /// Spent to reach grid cells.
    Fuel,
    /// Produced by refining scrap.
    Steel,
}

impl ResourceKind {
    /// All kinds in enumeration order.
    pub const ALL: [ResourceKind; RESOURCE_KIND_COUNT] = [
        ResourceKind::Food,
        ResourceKind::Scrap,
        ResourceKind::Circuits,
        ResourceKind::Fuel,
        ResourceKind::Steel,
    ];

    /// Lowercase name, as used in configuration documents and messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Food => "food",
            ResourceKind::Scrap => "scrap",
            ResourceKind::Circuits => "circuits",
            ResourceKind::Fuel => "fuel",
            ResourceKind::Steel => "steel",
        }
    }

    /// Capitalized name for display labels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ResourceKind::Food => "Food",
            ResourceKind::Scrap => "Scrap",
            ResourceKind::Circuits => "Circuits",
            ResourceKind::Fuel => "Fuel",
            ResourceKind::Steel => "Steel",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bundle of resource quantities, used for costs and starting stock.
///
/// Entries keep the order they were listed in, without duplicates. Cost
/// checks report the first unmet entry in that order.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: Vec<(ResourceKind, u32)>,
}

impl ResourceBundle {
    /// An empty bundle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `amount` of `kind`, merging with an existing entry.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.insert(kind, amount);
        self
    }

    fn insert(&mut self, kind: ResourceKind, amount: u32) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = existing.saturating_add(amount),
            None => self.entries.push((kind, amount)),
        }
    }

    /// Iterate over (kind, amount) in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Amount of `kind` in the bundle (0 if absent).
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, amount)| *amount)
    }

    /// Human-readable listing such as `20 scrap, 5 fuel, 2 circuits`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|(kind, amount)| format!("{amount} {kind}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Two bundles are equal when they hold the same amounts, whatever the order.
impl PartialEq for ResourceBundle {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|entry| other.entries.contains(entry))
    }
}

impl Eq for ResourceBundle {}

impl Serialize for ResourceBundle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, amount) in &self.entries {
            map.serialize_entry(kind, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResourceBundle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BundleVisitor;

        impl<'de> serde::de::Visitor<'de> for BundleVisitor {
            type Value = ResourceBundle;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of resource kinds to amounts")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut bundle = ResourceBundle::new();
                while let Some((kind, amount)) = access.next_entry::<ResourceKind, u32>()? {
                    bundle.insert(kind, amount);
                }
                Ok(bundle)
            }
        }

        deserializer.deserialize_map(BundleVisitor)
    }
}

/// The player's current stock of every resource kind.
///
/// Quantities are unsigned; withdrawals are checked and rejected rather than
/// clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourcePool {
    amounts: [u32; RESOURCE_KIND_COUNT],
}

impl ResourcePool {
    /// A pool holding nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            amounts: [0; RESOURCE_KIND_COUNT],
        }
    }

    /// A pool seeded from a bundle.
    #[must_use]
    pub fn from_bundle(bundle: &ResourceBundle) -> Self {
        let mut pool = Self::empty();
        for (kind, amount) in bundle.iter() {
            pool.add(kind, amount);
        }
        pool
    }

    /// Current quantity of `kind`.
    #[must_use]
    #[inline]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        self.amounts[kind.index()]
    }

    /// Overwrite the quantity of `kind`.
    pub fn set(&mut self, kind: ResourceKind, amount: u32) {
        self.amounts[kind.index()] = amount;
    }

    /// Add to `kind`, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = &mut self.amounts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Check that at least `needed` of `kind` is available.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientResource`] if the pool holds less.
    pub fn require(&self, kind: ResourceKind, needed: u32) -> Result<(), ActionError> {
        let available = self.get(kind);
        if available < needed {
            return Err(ActionError::InsufficientResource {
                kind,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Remove `amount` of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientResource`] and leaves the pool
    /// untouched if there is not enough.
    pub fn withdraw(&mut self, kind: ResourceKind, amount: u32) -> Result<(), ActionError> {
        self.require(kind, amount)?;
        self.amounts[kind.index()] -= amount;
        Ok(())
    }

    /// Check every component of `cost` before touching anything.
    ///
    /// # Errors
    ///
    /// Reports the first unmet component in the cost's listing order.
    pub fn can_afford(&self, cost: &ResourceBundle) -> Result<(), ActionError> {
        cost.iter().try_for_each(|(kind, needed)| self.require(kind, needed))
    }

    /// Deduct a whole cost atomically: either every component is paid or
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the first unmet component without deducting anything.
    pub fn spend(&mut self, cost: &ResourceBundle) -> Result<(), ActionError> {
        self.can_afford(cost)?;
        for (kind, amount) in cost.iter() {
            self.amounts[kind.index()] -= amount;
        }
        Ok(())
    }

    /// Iterate over every kind and its quantity in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(|&kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refiner_cost() -> ResourceBundle {
        ResourceBundle::new()
            .with(ResourceKind::Scrap, 20)
            .with(ResourceKind::Fuel, 5)
            .with(ResourceKind::Circuits, 2)
    }

    #[test]
    fn test_bundle_keeps_listing_order() {
        let cost = refiner_cost();
        let kinds: Vec<_> = cost.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![ResourceKind::Scrap, ResourceKind::Fuel, ResourceKind::Circuits]
        );
        assert_eq!(cost.describe(), "20 scrap, 5 fuel, 2 circuits");
    }

    #[test]
    fn test_bundle_equality_ignores_order() {
        let reordered = ResourceBundle::new()
            .with(ResourceKind::Circuits, 2)
            .with(ResourceKind::Scrap, 20)
            .with(ResourceKind::Fuel, 5);
        assert_eq!(refiner_cost(), reordered);
        assert_ne!(refiner_cost(), reordered.with(ResourceKind::Fuel, 1));
    }

    #[test]
    fn test_first_shortfall_follows_cost_order() {
        let mut pool = ResourcePool::empty();
        pool.set(ResourceKind::Scrap, 20);
        pool.set(ResourceKind::Fuel, 3);

        assert_eq!(
            pool.can_afford(&refiner_cost()),
            Err(ActionError::InsufficientResource {
                kind: ResourceKind::Fuel,
                needed: 5,
                available: 3,
            })
        );
    }

    #[test]
    fn test_bundle_merges_duplicates() {
        let bundle = ResourceBundle::new()
            .with(ResourceKind::Food, 3)
            .with(ResourceKind::Food, 4);
        assert_eq!(bundle.get(ResourceKind::Food), 7);
        assert_eq!(bundle.iter().count(), 1);
    }

    #[test]
    fn test_withdraw_rejects_without_change() {
        let mut pool = ResourcePool::empty();
        pool.set(ResourceKind::Fuel, 2);

        let err = pool.withdraw(ResourceKind::Fuel, 3).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientResource {
                kind: ResourceKind::Fuel,
                needed: 3,
                available: 2,
            }
        );
        assert_eq!(pool.get(ResourceKind::Fuel), 2);

        pool.withdraw(ResourceKind::Fuel, 2).unwrap();
        assert_eq!(pool.get(ResourceKind::Fuel), 0);
    }

    #[test]
    fn test_spend_is_all_or_nothing() {
        let mut pool = ResourcePool::empty();
        pool.set(ResourceKind::Scrap, 25);
        pool.set(ResourceKind::Fuel, 9);
        pool.set(ResourceKind::Circuits, 0);

        let before = pool;
        let err = pool.spend(&refiner_cost()).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InsufficientResource {
                kind: ResourceKind::Circuits,
                ..
            }
        ));
        assert_eq!(pool, before);

        pool.set(ResourceKind::Circuits, 2);
        pool.spend(&refiner_cost()).unwrap();
        assert_eq!(pool.get(ResourceKind::Scrap), 5);
        assert_eq!(pool.get(ResourceKind::Fuel), 4);
        assert_eq!(pool.get(ResourceKind::Circuits), 0);
    }

    #[test]
    fn test_add_saturates() {
        let mut pool = ResourcePool::empty();
        pool.set(ResourceKind::Steel, u32::MAX - 1);
        pool.add(ResourceKind::Steel, 10);
        assert_eq!(pool.get(ResourceKind::Steel), u32::MAX);
    }

    #[test]
    fn test_metal_alias_parses_as_scrap() {
        let kind: ResourceKind = serde_json::from_str("\"metal\"").unwrap();
        assert_eq!(kind, ResourceKind::Scrap);
        let kind: ResourceKind = serde_json::from_str("\"circuits\"").unwrap();
        assert_eq!(kind, ResourceKind::Circuits);
    }

    #[test]
    fn test_bundle_from_json() {
        let bundle: ResourceBundle =
            serde_json::from_str(r#"{"fuel": 3, "food": 10, "metal": 5}"#).unwrap();
        assert_eq!(bundle.get(ResourceKind::Food), 10);
        assert_eq!(bundle.get(ResourceKind::Scrap), 5);
        assert_eq!(bundle.get(ResourceKind::Fuel), 3);
        let kinds: Vec<_> = bundle.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![ResourceKind::Fuel, ResourceKind::Food, ResourceKind::Scrap]
        );
        assert_eq!(
            serde_json::to_string(&bundle).unwrap(),
            r#"{"fuel":3,"food":10,"scrap":5}"#
        );

        let pool = ResourcePool::from_bundle(&bundle);
        assert_eq!(pool.get(ResourceKind::Circuits), 0);
    }
}
