//! GW2TP overlay addon core.
//!
//! Fetches trading-post price data from the GW2TP backend and lays it out
//! as tables for an in-game overlay. The overlay host drives everything:
//! it calls [`Addon`] lifecycle methods and hands over a [`Ui`] each frame.
//! Requests run on a background runtime and are polled once per frame, so
//! the render tick never blocks on the network.
//!
//! # Quick start
//!
//! ```no_run
//! use gw2tp_addon::{Addon, Gw2tpAddon};
//!
//! let mut addon = Gw2tpAddon::builder().build().unwrap();
//! addon.on_load();
//! addon.toggle_window().unwrap();
//!
//! // Every frame, from the host's render callback:
//! // addon.on_render(&mut host_ui);
//! ```

pub mod addon;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod flatten;
pub mod format;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod rows;
pub mod settings;

pub use addon::{columns_for_width, Addon, TableRow, Ui};
pub use catalog::{Catalog, CommandSpec};
pub use error::{Gw2tpError, Result};
pub use fetch::{Fetcher, HttpFetcher, ResponseHandle};
pub use flatten::{flatten, FlatResult};
pub use format::{display_label, display_label_trimmed};
pub use models::{copper_to_gsc, gsc_to_copper, Price};
pub use pipeline::Pipeline;
pub use rows::{build_rows, Row, RowValue};
pub use settings::Settings;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Gw2tpAddonBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Gw2tpAddon`].
///
/// Use [`Gw2tpAddon::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](Gw2tpAddonBuilder::build).
pub struct Gw2tpAddonBuilder {
    base_url: Option<String>,
    timeout: Duration,
    max_completions_per_poll: usize,
    catalog: Option<Catalog>,
    settings_path: Option<PathBuf>,
    fetcher: Option<Box<dyn Fetcher>>,
}

impl Default for Gw2tpAddonBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            max_completions_per_poll: config::DEFAULT_MAX_COMPLETIONS_PER_POLL,
            catalog: None,
            settings_path: None,
            fetcher: None,
        }
    }
}

impl Gw2tpAddonBuilder {
    /// Set the backend base URL.
    ///
    /// Takes precedence over a `BaseUrl` stored in the settings file.
    /// Defaults to [`config::PRODUCTION_API_URL`].
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    ///
    /// Ignored when a custom fetcher is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many completed requests are consumed per frame. Defaults to 1.
    pub fn max_completions_per_poll(mut self, max: usize) -> Self {
        self.max_completions_per_poll = max;
        self
    }

    /// Replace the built-in command catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the settings file location.
    ///
    /// If not set, `settings.json` in the platform config directory is used
    /// (e.g. `~/.config/gw2tp` on Linux, `%APPDATA%\gw2tp` on Windows).
    pub fn settings_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a custom transport instead of the default [`HttpFetcher`].
    pub fn fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the addon.
    ///
    /// Reads the settings file (for a backend override) and starts the HTTP
    /// runtime, but issues no requests until the window is first shown.
    pub fn build(self) -> Result<Gw2tpAddon> {
        let settings_path = self
            .settings_path
            .unwrap_or_else(config::default_settings_path);
        let settings = Settings::load(&settings_path);

        let base_url = self
            .base_url
            .or_else(|| settings.base_url.clone())
            .unwrap_or_else(|| config::PRODUCTION_API_URL.to_string());

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpFetcher::new(self.timeout)?),
        };

        let pipeline = Pipeline::new(&base_url, self.catalog.unwrap_or_default(), fetcher)
            .with_max_completions_per_poll(self.max_completions_per_poll);

        Ok(Gw2tpAddon {
            settings,
            settings_path,
            pipeline,
        })
    }
}

// ---------------------------------------------------------------------------
// Gw2tpAddon
// ---------------------------------------------------------------------------

/// The addon session: settings plus the refresh pipeline.
///
/// Created via [`Gw2tpAddon::builder()`] and driven by the host through the
/// [`Addon`] trait.
pub struct Gw2tpAddon {
    settings: Settings,
    settings_path: PathBuf,
    pipeline: Pipeline,
}

impl Gw2tpAddon {
    pub fn builder() -> Gw2tpAddonBuilder {
        Gw2tpAddonBuilder::default()
    }

    /// Show or hide the price window and persist the choice.
    pub fn toggle_window(&mut self) -> Result<()> {
        self.settings.toggle_show_window(&self.settings_path)
    }

    /// Drop the current cycle and immediately start a new one.
    pub fn refresh(&mut self) {
        self.pipeline.reset();
        self.pipeline.start_refresh();
    }

    /// Table rows for a command, or `None` while it has no data.
    pub fn table_for(&self, command: &str) -> Result<Option<Vec<TableRow>>> {
        match self.pipeline.result(command) {
            None => return Ok(None),
            Some(flat) if flat.is_empty() => return Ok(None),
            Some(_) => {}
        }
        let rows = self.pipeline.rows(command)?;
        Ok(rows.map(|rows| rows.iter().map(TableRow::from).collect()))
    }

    fn render_tables(&self, ui: &mut dyn Ui) {
        let columns = columns_for_width(ui.window_width());

        for (idx, spec) in self.pipeline.catalog().iter().enumerate() {
            let command = spec.name.as_str();
            match self.table_for(command) {
                Ok(Some(rows)) => ui.table(command, &display_label(command), &rows),
                Ok(None) => ui.text(&format!("No data yet for {command}")),
                Err(err) => {
                    tracing::error!(command, err = ?err, "Cannot lay out table");
                    ui.text(&format!("Invalid data for {command}"));
                }
            }
            if columns > 1 && idx % columns != columns - 1 {
                ui.same_line();
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }
}

impl Addon for Gw2tpAddon {
    fn on_load(&mut self) {
        self.settings = Settings::load(&self.settings_path);
        self.settings.show_window = false;
        tracing::info!(
            addon = config::ADDON_NAME,
            backend = self.pipeline.base_url(),
            "Addon loaded"
        );
    }

    fn on_unload(&mut self) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            tracing::warn!(
                path = %self.settings_path.display(),
                err = ?err,
                "Failed to save settings"
            );
        }
        tracing::info!(addon = config::ADDON_NAME, "Addon unloaded");
    }

    fn on_render(&mut self, ui: &mut dyn Ui) {
        if !self.settings.show_window {
            return;
        }

        self.pipeline.start_refresh();
        self.pipeline.poll();

        if ui.button("Refresh Data") {
            self.refresh();
        }
        if !self.pipeline.is_loaded() {
            ui.text("Loading...");
        }

        self.render_tables(ui);
    }

    fn on_options_render(&mut self, ui: &mut dyn Ui) {
        ui.text(&format!("Backend: {}", self.pipeline.base_url()));
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Gw2tpAddon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gw2tpAddon(backend={}, commands={}, pending={}, loaded={})",
            self.pipeline.base_url(),
            self.pipeline.catalog().len(),
            self.pipeline.pending_count(),
            self.pipeline.is_loaded()
        )
    }
}
