//! Persisted addon settings.
//!
//! Settings live in a small JSON file in the addon directory. They are
//! owned by the session object and loaded/saved explicitly at addon
//! load/unload; nothing here is global.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Gw2tpError, Result};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether the price window is open.
    #[serde(rename = "ShowWindow", default)]
    pub show_window: bool,
    /// Whether the quick-access widget is shown.
    #[serde(rename = "IsVisible", default = "default_true")]
    pub is_visible: bool,
    /// Backend override, e.g. a local development server.
    #[serde(rename = "BaseUrl", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_window: false,
            is_visible: true,
            base_url: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is logged and also yields the defaults, so a corrupt settings
    /// file never keeps the addon from loading.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(Gw2tpError::from)
            .and_then(|contents| {
                serde_json::from_str::<Settings>(&contents).map_err(Gw2tpError::from)
            });

        match parsed {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    err = ?err,
                    "Settings file could not be parsed, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Write settings to `path` as tab-indented JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        fs::write(path, buf)?;
        Ok(())
    }

    /// Flip `show_window` and persist the change.
    pub fn toggle_show_window(&mut self, path: &Path) -> Result<()> {
        self.show_window = !self.show_window;
        self.save(path)
    }
}
