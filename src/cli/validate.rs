//! Grid configuration validation command implementation.

use super::{CliError, ValidateFormat};
use outpost::config::{CellResourceConfig, GridResourceConfig, read_json};
use outpost::game::{Coord, ResourceKind, calculate_fuel_cost};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// JSON report for one cell.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CellReport {
    cell: String,
    fuel_cost: u32,
    collectable: bool,
    probabilities: BTreeMap<ResourceKind, f64>,
    amounts: BTreeMap<ResourceKind, u32>,
}

/// JSON report for the whole document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    path: String,
    collection_chance: f64,
    valid: bool,
    problems: Vec<String>,
    cells: Vec<CellReport>,
}

fn build_report(path: &Path, config: &GridResourceConfig) -> ValidationReport {
    let cells = Coord::all()
        .filter(|cell| !cell.is_home())
        .map(|cell| {
            let cell_config = config.cell(cell);
            let table = cell_config.and_then(CellResourceConfig::table);
            let probabilities: BTreeMap<_, _> = table
                .as_ref()
                .map(|t| t.probabilities().into_iter().collect())
                .unwrap_or_default();
            let amounts = probabilities
                .keys()
                .filter_map(|kind| cell_config.map(|c| (*kind, c.amount(*kind))))
                .collect();
            CellReport {
                cell: cell.key(),
                fuel_cost: calculate_fuel_cost(cell.x, cell.y),
                collectable: table.is_some(),
                probabilities,
                amounts,
            }
        })
        .collect();

    let problems = config.problems();
    ValidationReport {
        path: path.display().to_string(),
        collection_chance: config.collection_chance,
        valid: problems.is_empty(),
        problems,
        cells,
    }
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the document cannot be read or breaks any rule.
pub(crate) fn execute(path: &Path, format: ValidateFormat) -> Result<(), CliError> {
    let config: GridResourceConfig = read_json(path)?;
    let report = build_report(path, &config);

    match format {
        ValidateFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        ValidateFormat::Text => print_text(&report),
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} problem(s) found in {}",
            report.problems.len(),
            report.path
        )))
    }
}

fn print_text(report: &ValidationReport) {
    println!("Validating: {}", report.path);
    println!("Collection chance: {}%", report.collection_chance);
    println!();

    for cell in &report.cells {
        let odds = if cell.collectable {
            cell.probabilities
                .iter()
                .map(|(kind, p)| {
                    let amount = cell.amounts.get(kind).copied().unwrap_or(1);
                    format!("{kind} {:.0}% (x{amount})", p * 100.0)
                })
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            "not collectable".to_string()
        };
        println!("  {}  fuel {}  {odds}", cell.cell, cell.fuel_cost);
    }

    println!();
    if report.valid {
        println!("  ✓ Document is valid");
    } else {
        for problem in &report.problems {
            println!("  ✗ {problem}");
        }
    }
}
