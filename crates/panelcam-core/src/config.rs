use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (history token and log file live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Where cell geometry is fetched from: a file path or an http(s) URL
    #[serde(default = "default_source_location")]
    pub location: String,
    /// Request timeout in seconds for remote sources
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_source_location(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Easing curve applied to camera tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump to the target on the final tick
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Animate between keyframes instead of cutting
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one keyframe-to-keyframe tween
    #[serde(default = "default_tween_duration")]
    pub tween_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            tween_duration_ms: default_tween_duration(),
            easing: EasingType::default(),
        }
    }
}

impl CameraConfig {
    pub fn tween_duration(&self) -> Duration {
        Duration::from_millis(self.tween_duration_ms)
    }

    /// Smooth motion is effectively on only with a non-zero duration
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.tween_duration_ms > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Wheel deltas must exceed this magnitude to navigate
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    /// Delta reported for one terminal scroll event (terminals carry no magnitude)
    #[serde(default = "default_scroll_event_delta")]
    pub scroll_event_delta: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: default_wheel_threshold(),
            scroll_event_delta: default_scroll_event_delta(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a tween is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Canvas pixels covered by one terminal column
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: f64,
    /// Canvas pixels covered by one terminal row
    #[serde(default = "default_cell_height_px")]
    pub cell_height_px: f64,
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            cell_width_px: default_cell_width_px(),
            cell_height_px: default_cell_height_px(),
            show_status_bar: default_true(),
        }
    }
}

impl UiConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            // Never poll with a zero timeout
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-n>" (Ctrl+n), "G" (Shift+g), "<Space>", "<Right>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Advance to the next frame
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Go back to the previous frame
    #[serde(default = "default_key_previous")]
    pub previous: String,
    /// Jump to the first frame
    #[serde(default = "default_key_first")]
    pub first: String,
    /// Jump to the last frame
    #[serde(default = "default_key_last")]
    pub last: String,
    /// Snap to the keyframe closest to the current path position
    #[serde(default = "default_key_snap")]
    pub snap: String,
    /// Quit the viewer
    #[serde(default = "default_key_quit")]
    pub quit: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            next: default_key_next(),
            previous: default_key_previous(),
            first: default_key_first(),
            last: default_key_last(),
            snap: default_key_snap(),
            quit: default_key_quit(),
        }
    }
}

fn default_key_next() -> String { "l".to_string() }
fn default_key_previous() -> String { "h".to_string() }
fn default_key_first() -> String { "g".to_string() }
fn default_key_last() -> String { "G".to_string() }
fn default_key_snap() -> String { "s".to_string() }
fn default_key_quit() -> String { "q".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("panelcam")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_location() -> String {
    "cells.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_tween_duration() -> u64 {
    500
}

fn default_wheel_threshold() -> f64 {
    120.0
}

fn default_scroll_event_delta() -> f64 {
    240.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_width_px() -> f64 {
    8.0
}

fn default_cell_height_px() -> f64 {
    16.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/panelcam/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("panelcam")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// File holding the last visited history fragment
    pub fn history_path(&self) -> PathBuf {
        self.data_dir().join("history")
    }

    /// Log file used while the terminal viewer owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("panelcam.log")
    }
}
