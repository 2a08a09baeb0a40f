use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::collections::HashMap;
use crate::layout_engine::{Align, LayoutCommand, MasterOrientation, NewClientPosition};

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".monadtile.toml") }

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
    /// Host keybinding names mapped to layout commands. The engine never
    /// reads these; host adapters resolve their own key events against them.
    #[serde(default)]
    keys: HashMap<String, LayoutCommand>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keys: Vec<(String, LayoutCommand)>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Fraction of the split axis the master band occupies.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f64,
    #[serde(default = "default_max_ratio")]
    pub max_ratio: f64,
    /// Ratio step for master band resizes.
    #[serde(default = "default_change_ratio")]
    pub change_ratio: f64,
    /// Pixel step for slave pane resizes.
    #[serde(default = "default_change_size")]
    pub change_size: f64,
    /// Hard floor for a slave pane's stacking-axis size, in pixels.
    #[serde(default = "default_min_slave_size")]
    pub min_slave_size: f64,
    /// How many windows the master band holds.
    #[serde(default = "default_master_count")]
    pub master_count: usize,
    #[serde(default)]
    pub new_client_position: NewClientPosition,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    /// Border width for a lone window; falls back to `border_width`.
    #[serde(default)]
    pub single_border_width: Option<f64>,
    #[serde(default)]
    pub margin: f64,
    /// Margin for a lone window; falls back to `margin`.
    #[serde(default)]
    pub single_margin: Option<f64>,
    #[serde(default = "default_border_focus")]
    pub border_focus: String,
    #[serde(default = "default_border_normal")]
    pub border_normal: String,
    /// Which side of the split axis the master band sits on.
    #[serde(default)]
    pub align: Align,
    /// How master windows divide their band. `None` picks the variant
    /// default (stacked across the split axis).
    #[serde(default)]
    pub orientation: Option<MasterOrientation>,
    /// Start with the maximize toggle set.
    #[serde(default)]
    pub maximized: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            ratio: default_ratio(),
            min_ratio: default_min_ratio(),
            max_ratio: default_max_ratio(),
            change_ratio: default_change_ratio(),
            change_size: default_change_size(),
            min_slave_size: default_min_slave_size(),
            master_count: default_master_count(),
            new_client_position: NewClientPosition::default(),
            border_width: default_border_width(),
            single_border_width: None,
            margin: 0.0,
            single_margin: None,
            border_focus: default_border_focus(),
            border_normal: default_border_normal(),
            align: Align::default(),
            orientation: None,
            maximized: false,
        }
    }
}

impl LayoutSettings {
    pub fn single_border(&self) -> f64 { self.single_border_width.unwrap_or(self.border_width) }

    pub fn single_window_margin(&self) -> f64 { self.single_margin.unwrap_or(self.margin) }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.min_ratio <= 0.0 || self.min_ratio >= 1.0 {
            issues.push(format!("min_ratio must be within (0, 1), got {}", self.min_ratio));
        }
        if self.max_ratio <= 0.0 || self.max_ratio >= 1.0 {
            issues.push(format!("max_ratio must be within (0, 1), got {}", self.max_ratio));
        }
        if self.min_ratio >= self.max_ratio {
            issues.push(format!(
                "min_ratio {} must be below max_ratio {}",
                self.min_ratio, self.max_ratio
            ));
        } else if self.ratio < self.min_ratio || self.ratio > self.max_ratio {
            issues.push(format!(
                "ratio {} must lie within [{}, {}]",
                self.ratio, self.min_ratio, self.max_ratio
            ));
        }
        if self.change_ratio <= 0.0 {
            issues.push(format!("change_ratio must be positive, got {}", self.change_ratio));
        }
        if self.change_size <= 0.0 {
            issues.push(format!("change_size must be positive, got {}", self.change_size));
        }
        if self.min_slave_size <= 0.0 {
            issues.push(format!(
                "min_slave_size must be positive, got {}",
                self.min_slave_size
            ));
        }
        if self.master_count == 0 {
            issues.push("master_count must be at least 1".to_string());
        }
        if self.border_width < 0.0 {
            issues.push(format!("border_width must be non-negative, got {}", self.border_width));
        }
        if self.margin < 0.0 {
            issues.push(format!("margin must be non-negative, got {}", self.margin));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.min_ratio <= 0.0 || self.min_ratio >= 1.0 {
            self.min_ratio = default_min_ratio();
            fixes += 1;
        }
        if self.max_ratio <= 0.0 || self.max_ratio >= 1.0 {
            self.max_ratio = default_max_ratio();
            fixes += 1;
        }
        if self.min_ratio >= self.max_ratio {
            self.min_ratio = default_min_ratio();
            self.max_ratio = default_max_ratio();
            fixes += 1;
        }
        if self.ratio < self.min_ratio || self.ratio > self.max_ratio {
            self.ratio = self.ratio.clamp(self.min_ratio, self.max_ratio);
            fixes += 1;
        }
        if self.change_ratio <= 0.0 {
            self.change_ratio = default_change_ratio();
            fixes += 1;
        }
        if self.change_size <= 0.0 {
            self.change_size = default_change_size();
            fixes += 1;
        }
        if self.min_slave_size <= 0.0 {
            self.min_slave_size = default_min_slave_size();
            fixes += 1;
        }
        if self.master_count == 0 {
            self.master_count = default_master_count();
            fixes += 1;
        }
        if self.border_width < 0.0 {
            self.border_width = default_border_width();
            fixes += 1;
        }
        if self.margin < 0.0 {
            self.margin = 0.0;
            fixes += 1;
        }

        fixes
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> { self.layout.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.layout.auto_fix_values() }
}

fn default_ratio() -> f64 { 0.5 }

fn default_min_ratio() -> f64 { 0.25 }

fn default_max_ratio() -> f64 { 0.75 }

fn default_change_ratio() -> f64 { 0.05 }

fn default_change_size() -> f64 { 20.0 }

fn default_min_slave_size() -> f64 { 85.0 }

fn default_master_count() -> usize { 1 }

fn default_border_width() -> f64 { 2.0 }

fn default_border_focus() -> String { "#ff0000".to_string() }

fn default_border_normal() -> String { "#000000".to_string() }

impl Config {
    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn default() -> Config {
        Self::parse(include_str!("../../monadtile.default.toml")).unwrap()
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config_file = ConfigFile {
            settings: self.settings.clone(),
            keys: self.keys.iter().cloned().collect(),
        };

        let toml_string = toml::to_string_pretty(&config_file)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }

    fn parse(buf: &str) -> Result<Config, ConfigError> {
        let c: ConfigFile = toml::from_str(buf)?;
        let mut keys: Vec<(String, LayoutCommand)> = c.keys.into_iter().collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Config { settings: c.settings, keys })
    }
}
