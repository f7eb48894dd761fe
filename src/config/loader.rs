//! Startup configuration loading on a background thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{info, warn};

use crate::config::{GridResourceConfig, LayoutConfig, read_json};

/// Where the grid configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// The built-in default.
    Fallback,
}

/// Everything the front-end needs before the first action.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Grid resources for the engine.
    pub grid: GridResourceConfig,
    /// Where `grid` came from.
    pub grid_source: ConfigSource,
    /// Terminal layout.
    pub layout: LayoutConfig,
}

/// Load the grid document, substituting the built-in default on any failure.
#[must_use]
pub fn load_grid_or_fallback(path: &Path) -> (GridResourceConfig, ConfigSource) {
    match GridResourceConfig::load(path) {
        Ok(config) => {
            info!(path = %path.display(), cells = config.grid_resources.len(), "grid resources loaded");
            (config, ConfigSource::File(path.to_path_buf()))
        }
        Err(e) => {
            warn!(error = %e, "using built-in grid resources");
            (GridResourceConfig::fallback(), ConfigSource::Fallback)
        }
    }
}

fn load_layout_or_default(path: &Path) -> LayoutConfig {
    read_json(path).unwrap_or_else(|e| {
        warn!(error = %e, "using default layout");
        LayoutConfig::default()
    })
}

/// Loads configuration off the UI thread and hands it over once ready.
#[derive(Debug)]
pub struct ConfigLoader {
    rx: Option<Receiver<LoadedConfig>>,
}

impl ConfigLoader {
    /// Start loading both documents in the background.
    #[must_use]
    pub fn spawn(grid_path: PathBuf, layout_path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (grid, grid_source) = load_grid_or_fallback(&grid_path);
            let layout = load_layout_or_default(&layout_path);
            // The receiver may already be gone if the player quit early.
            let _ = tx.send(LoadedConfig {
                grid,
                grid_source,
                layout,
            });
        });
        Self { rx: Some(rx) }
    }

    /// Take the result if it has arrived. Returns `Some` exactly once.
    ///
    /// If the loader thread died without answering, the built-in defaults
    /// are delivered instead.
    pub fn poll(&mut self) -> Option<LoadedConfig> {
        let rx = self.rx.as_ref()?;
        let loaded = match rx.try_recv() {
            Ok(loaded) => loaded,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                warn!("configuration loader stopped, using built-in defaults");
                LoadedConfig {
                    grid: GridResourceConfig::fallback(),
                    grid_source: ConfigSource::Fallback,
                    layout: LayoutConfig::default(),
                }
            }
        };
        self.rx = None;
        Some(loaded)
    }

    /// True once the result has been taken.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.rx.is_none()
    }
}
