use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String { "Phi".to_string() }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: default_title(), width: default_width(), height: default_height() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default = "default_target_hz")]
    pub target_hz: u32,
    #[serde(default = "default_log_fps")]
    pub log_fps: bool,
    #[serde(default = "default_fps_period_ms")]
    pub fps_log_period_ms: u32,
}

fn default_target_hz() -> u32 { 60 }
fn default_log_fps() -> bool { true }
fn default_fps_period_ms() -> u32 { 1000 }

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_hz: default_target_hz(),
            log_fps: default_log_fps(),
            fps_log_period_ms: default_fps_period_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory that resource ids are resolved against.
    #[serde(default = "default_asset_root")]
    pub root: PathBuf,
}

fn default_asset_root() -> PathBuf { PathBuf::from("assets") }

impl Default for AssetConfig {
    fn default() -> Self {
        Self { root: default_asset_root() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.window.title, "Phi");
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.frame.target_hz, 60);
        assert!(cfg.frame.log_fps);
        assert_eq!(cfg.assets.root, PathBuf::from("assets"));
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [window]
            title = "ArcadeRS Shooter"

            [frame]
            target_hz = 30
            "#,
        )
        .unwrap();

        assert_eq!(cfg.window.title, "ArcadeRS Shooter");
        assert_eq!(cfg.window.height, 600);
        assert_eq!(cfg.frame.target_hz, 30);
        assert_eq!(cfg.frame.fps_log_period_ms, 1000);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(EngineConfig::from_toml_str("[frame]\ntarget_hz = \"fast\"").is_err());
    }
}
