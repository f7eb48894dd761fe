#![no_main]

//! Grid document fuzzer.
//!
//! Any text must either be rejected or yield a configuration whose cells can
//! be rolled against without panicking.

use libfuzzer_sys::fuzz_target;
use outpost::config::GridResourceConfig;
use outpost::game::{Coord, ResourceKind};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = GridResourceConfig::from_json_str(text) else {
        return;
    };

    assert!((0.0..=100.0).contains(&config.collection_chance));
    for cell in Coord::all() {
        let Some(cell_config) = config.cell(cell) else {
            continue;
        };
        if let Some(table) = cell_config.table() {
            assert!(table.total() > 0.0);
            for roll in [0.0, table.total() / 2.0, table.total(), table.total() * 2.0] {
                assert!(table.pick(roll).is_some());
            }
        }
        for kind in ResourceKind::ALL {
            let _ = cell_config.amount(kind);
        }
    }
});
