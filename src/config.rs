//! Config model and persistence helpers.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Top-level configuration stored in `main_page.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Page that is active when the screen opens.
    #[serde(default)]
    pub initial_page: usize,
    /// Side menu and divider geometry.
    pub layout: LayoutCfg,
    /// Log output settings.
    pub logging: LoggingCfg,
    /// Pages shown in the content area, in menu order.
    #[serde(default, rename = "page")]
    pub pages: Vec<PageCfg>,
}

/// Geometry of the fixed-width side menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCfg {
    /// Width of the side menu in terminal columns.
    pub menu_width: u16,
    /// Symbol repeated vertically to draw the divider.
    pub divider_symbol: String,
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingCfg {
    /// File written in the working directory.
    pub file: String,
}

/// One selectable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCfg {
    /// Label shown in the side menu.
    pub title: String,
    /// Text shown in the content area.
    #[serde(default)]
    pub body: String,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&s).with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            tracing::info!("wrote default config to {}", path.display());
            cfg
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Reject values the main page cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            bail!("config: at least one [[page]] is required");
        }
        if self.layout.menu_width == 0 {
            bail!("config: layout.menu_width must be greater than 0");
        }
        if self.layout.divider_symbol.trim().is_empty() {
            bail!("config: layout.divider_symbol must not be blank");
        }
        if self.initial_page >= self.pages.len() {
            bail!(
                "config: initial_page {} is out of range ({} pages)",
                self.initial_page,
                self.pages.len()
            );
        }
        Ok(())
    }
}

impl Default for Config {
    /// Connect, LAN, Files and Settings, the sections of the remote desktop menu.
    fn default() -> Self {
        let page = |title: &str, body: &str| PageCfg {
            title: title.into(),
            body: body.into(),
        };
        Self {
            initial_page: 0,
            layout: LayoutCfg {
                menu_width: 24,
                divider_symbol: "│".into(),
            },
            logging: LoggingCfg {
                file: "main_page_tui.log".into(),
            },
            pages: vec![
                page("Connect", "Enter a remote device ID to start a session."),
                page("LAN", "No LAN peers discovered yet."),
                page("Files", "No file transfer sessions."),
                page("Settings", "Edit main_page.toml to change pages and layout."),
            ],
        }
    }
}
