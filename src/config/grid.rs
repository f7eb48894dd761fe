//! Per-cell resource configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::read_json;
use crate::error::ConfigError;
use crate::game::{Coord, ResourceKind, WeightedTable, calculate_fuel_cost};

/// What a single cell can yield.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellResourceConfig {
    /// Relative draw weight per resource kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<ResourceKind, f64>>,
    /// Quantity granted per resource kind when drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amounts: Option<BTreeMap<ResourceKind, u32>>,
}

impl CellResourceConfig {
    /// A cell with both maps present.
    #[must_use]
    pub fn new(weights: BTreeMap<ResourceKind, f64>, amounts: BTreeMap<ResourceKind, u32>) -> Self {
        Self {
            weights: Some(weights),
            amounts: Some(amounts),
        }
    }

    /// The weighted table for this cell.
    ///
    /// `None` if weights or amounts are missing or no weight is positive; such
    /// a cell cannot be collected from.
    #[must_use]
    pub fn table(&self) -> Option<WeightedTable> {
        let weights = self.weights.as_ref()?;
        self.amounts.as_ref()?;
        let table = WeightedTable::new(weights.iter().map(|(k, w)| (*k, *w)));
        (!table.is_empty()).then_some(table)
    }

    /// Quantity granted for `kind`; 1 when the cell does not say.
    #[must_use]
    pub fn amount(&self, kind: ResourceKind) -> u32 {
        self.amounts
            .as_ref()
            .and_then(|amounts| amounts.get(&kind).copied())
            .unwrap_or(1)
    }
}

/// The grid resource document.
///
/// ```json
/// {
///   "gridResources": {
///     "0,0": { "weights": { "food": 8, "scrap": 1 }, "amounts": { "food": 5, "scrap": 3 } }
///   },
///   "collectionChance": 75
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResourceConfig {
    /// Cell configurations keyed by `"x,y"`.
    pub grid_resources: BTreeMap<String, CellResourceConfig>,
    /// Percent chance (0–100) that a collection attempt yields anything.
    pub collection_chance: f64,
}

/// Built-in cell table: `(x, y, [food, scrap, fuel] weights, [food, scrap, fuel] amounts)`.
///
/// Circuits are derived from distance: they only appear three or more steps
/// from home.
const FALLBACK_CELLS: [(u8, u8, [u32; 3], [u32; 3]); 25] = [
    (0, 0, [8, 1, 1], [5, 3, 2]),
    (0, 1, [7, 2, 1], [4, 4, 2]),
    (0, 2, [6, 3, 1], [4, 5, 2]),
    (0, 3, [5, 4, 1], [3, 6, 2]),
    (0, 4, [4, 5, 1], [3, 7, 2]),
    (1, 0, [7, 2, 1], [5, 3, 1]),
    (1, 1, [6, 3, 1], [4, 4, 1]),
    (1, 2, [5, 4, 1], [4, 5, 1]),
    (1, 3, [4, 5, 1], [3, 6, 1]),
    (1, 4, [3, 6, 1], [3, 7, 1]),
    (2, 0, [7, 1, 2], [5, 2, 3]),
    (2, 1, [6, 2, 2], [4, 3, 4]),
    (2, 2, [5, 3, 2], [4, 4, 5]),
    (2, 3, [4, 4, 2], [3, 5, 6]),
    (2, 4, [3, 5, 2], [3, 6, 7]),
    (3, 0, [6, 2, 2], [5, 2, 3]),
    (3, 1, [5, 3, 2], [4, 3, 4]),
    (3, 2, [4, 4, 2], [4, 4, 5]),
    (3, 3, [3, 5, 2], [3, 5, 6]),
    (3, 4, [2, 6, 2], [3, 6, 7]),
    (4, 0, [6, 1, 3], [5, 1, 4]),
    (4, 1, [5, 2, 3], [4, 2, 5]),
    (4, 2, [4, 3, 3], [4, 3, 6]),
    (4, 3, [3, 4, 3], [3, 4, 7]),
    (4, 4, [2, 5, 3], [3, 5, 8]),
];

/// Collection chance used by the built-in configuration.
const FALLBACK_COLLECTION_CHANCE: f64 = 75.0;

impl GridResourceConfig {
    /// The built-in configuration covering all 25 cells.
    ///
    /// This is the single fallback used whenever the external document is
    /// unavailable or invalid.
    #[must_use]
    pub fn fallback() -> Self {
        let grid_resources = FALLBACK_CELLS
            .iter()
            .map(|&(x, y, [food_w, scrap_w, fuel_w], [food, scrap, fuel])| {
                let distance = calculate_fuel_cost(x, y);
                let circuits_w = distance.saturating_sub(2);
                let weights = BTreeMap::from([
                    (ResourceKind::Food, f64::from(food_w)),
                    (ResourceKind::Scrap, f64::from(scrap_w)),
                    (ResourceKind::Circuits, f64::from(circuits_w)),
                    (ResourceKind::Fuel, f64::from(fuel_w)),
                ]);
                let amounts = BTreeMap::from([
                    (ResourceKind::Food, food),
                    (ResourceKind::Scrap, scrap),
                    (ResourceKind::Circuits, circuits_w.max(1)),
                    (ResourceKind::Fuel, fuel),
                ]);
                (Coord::new(x, y).key(), CellResourceConfig::new(weights, amounts))
            })
            .collect();

        Self {
            grid_resources,
            collection_chance: FALLBACK_COLLECTION_CHANCE,
        }
    }

    /// Parse a document from JSON text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed JSON or rule violations.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a document from disk and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for `cell`, if present.
    #[must_use]
    pub fn cell(&self, cell: Coord) -> Option<&CellResourceConfig> {
        self.grid_resources.get(&cell.key())
    }

    /// Every rule the document breaks, in a stable order.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !(0.0..=100.0).contains(&self.collection_chance) {
            problems.push(format!(
                "collectionChance {} is outside 0-100",
                self.collection_chance
            ));
        }

        for (key, cell) in &self.grid_resources {
            match key.parse::<Coord>() {
                Ok(coord) if coord.in_bounds() => {}
                Ok(_) => problems.push(format!("cell {key} is outside the 5x5 grid")),
                Err(e) => problems.push(e.to_string()),
            }

            if let Some(weights) = &cell.weights {
                for (kind, weight) in weights {
                    if !weight.is_finite() || *weight < 0.0 {
                        problems.push(format!("cell {key}: {kind} weight {weight} is negative or not finite"));
                    }
                }
            }
        }

        problems
    }

    /// Check the document against its rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::HOME;

    #[test]
    fn test_fallback_covers_every_cell() {
        let config = GridResourceConfig::fallback();
        assert_eq!(config.grid_resources.len(), 25);
        for cell in Coord::all() {
            assert!(config.cell(cell).is_some(), "missing {cell}");
        }
        assert!(config.validate().is_ok());
        assert!((config.collection_chance - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fallback_circuits_only_far_from_home() {
        let config = GridResourceConfig::fallback();
        let circuits = |x, y| {
            config.cell(Coord::new(x, y)).unwrap().weights.as_ref().unwrap()[&ResourceKind::Circuits]
        };
        assert!(circuits(1, 1).abs() < f64::EPSILON);
        assert!((circuits(0, 1) - 1.0).abs() < f64::EPSILON);
        assert!((circuits(4, 4) - 2.0).abs() < f64::EPSILON);
        assert!(config.cell(HOME).is_some());
    }

    #[test]
    fn test_parse_document() {
        let config = GridResourceConfig::from_json_str(
            r#"{
                "gridResources": {
                    "0,0": {"weights": {"food": 8, "metal": 1, "fuel": 1},
                            "amounts": {"food": 5, "metal": 3, "fuel": 2}}
                },
                "collectionChance": 60
            }"#,
        )
        .unwrap();

        let cell = config.cell(Coord::new(0, 0)).unwrap();
        assert_eq!(cell.amount(ResourceKind::Scrap), 3);
        assert_eq!(cell.amount(ResourceKind::Steel), 1);
        let table = cell.table().unwrap();
        assert!((table.total() - 10.0).abs() < 1e-9);
        assert!(config.cell(Coord::new(1, 0)).is_none());
    }

    #[test]
    fn test_malformed_cell_has_no_table() {
        let config = GridResourceConfig::from_json_str(
            r#"{
                "gridResources": {
                    "1,0": {"weights": {"food": 1}},
                    "2,0": {"amounts": {"food": 1}},
                    "3,0": {"weights": {"food": 0}, "amounts": {"food": 1}}
                },
                "collectionChance": 100
            }"#,
        )
        .unwrap();

        for x in 1..=3 {
            assert!(config.cell(Coord::new(x, 0)).unwrap().table().is_none());
        }
    }

    #[test]
    fn test_validation_problems() {
        let mut config = GridResourceConfig::fallback();
        config.collection_chance = 120.0;
        config
            .grid_resources
            .insert("7,1".to_string(), CellResourceConfig::default());
        config.grid_resources.insert(
            "0,0".to_string(),
            CellResourceConfig::new(
                BTreeMap::from([(ResourceKind::Food, -2.0)]),
                BTreeMap::from([(ResourceKind::Food, 1)]),
            ),
        );
        config
            .grid_resources
            .insert("oops".to_string(), CellResourceConfig::default());

        let problems = config.problems();
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems[0].contains("collectionChance"));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GridResourceConfig::load(Path::new("/nonexistent/grid.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
