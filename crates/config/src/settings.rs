// Application settings
// Loaded from ~/.config/squares/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Main grid
    #[serde(rename = "grid.rows")]
    pub rows: usize,

    #[serde(rename = "grid.cols")]
    pub cols: usize,

    /// Pager cells under the main grid. 0 = main grid is not paged.
    #[serde(rename = "grid.pages")]
    pub pages: usize,

    // Navigation strips
    #[serde(rename = "navigation.strips")]
    pub strips: Vec<usize>,

    #[serde(rename = "navigation.linkStrips")]
    pub link_strips: bool,

    // Auto color
    #[serde(rename = "color.hueStep")]
    pub hue_step: f64,

    #[serde(rename = "color.autoSaturation")]
    pub auto_saturation: f64,

    #[serde(rename = "color.autoValue")]
    pub auto_value: f64,

    // Storage
    #[serde(rename = "storage.path")]
    pub storage_path: Option<PathBuf>,  // None = data dir
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Main grid
            rows: 30,
            cols: 22,
            pages: 0,
            // Navigation strips
            strips: vec![2, 3],
            link_strips: true,
            // Auto color
            hue_step: 47.0,
            auto_saturation: 40.0,
            auto_value: 93.0,
            // Storage
            storage_path: None,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Main grid size
    "grid.rows": 30,
    "grid.cols": 22,

    // Pager cells under the main grid (0 = single page)
    "grid.pages": 0,

    // Row counts of the navigation strips, each as wide as the main grid
    "navigation.strips": [2, 3],
    // Tab and arrows continue from one strip into the next
    "navigation.linkStrips": true,

    // Colors given to squares when code is first written
    "color.hueStep": 47,
    "color.autoSaturation": 40,
    "color.autoValue": 93,

    // Square database (null = default location in the data directory)
    "storage.path": null
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("squares");
        config_dir.join("settings.json")
    }

    /// Directory for the square database and the log file
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("squares")
    }

    /// Square database path, honoring `storage.path`
    pub fn db_path(&self) -> PathBuf {
        match &self.storage_path {
            Some(path) => path.clone(),
            None => Self::data_dir().join("squares.db"),
        }
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file is created with the
    /// commented defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(path);
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {}", path.display(), e);
                    log::warn!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
