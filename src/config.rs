//! UI preference configuration.
//!
//! Contains user preferences that affect editor-wide behavior:
//! - First-run hints (crop tool hint dismissal)
//! - Last-used aspect preset and canvas background mode
//!
//! Uses `parking_lot::RwLock` for thread-safe access. Preferences are
//! persisted as JSON in the platform config directory so they survive
//! restarts; a missing or unreadable file just means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ClipnoteResult;
use crate::framing::types::{AspectPreset, CanvasBgMode};

lazy_static! {
    /// Global UI preferences.
    pub static ref UI_PREFS: RwLock<UiPrefs> = RwLock::new(UiPrefs::default());
}

/// Editor-wide user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct UiPrefs {
    /// Whether the crop tool hint overlay has been dismissed.
    #[serde(default)]
    pub crop_hint_dismissed: bool,

    /// Aspect preset selected last time the crop tool was used.
    #[serde(default)]
    pub last_aspect_preset: AspectPreset,

    /// Canvas background mode selected last time padding was configured.
    #[serde(default)]
    pub last_bg_mode: CanvasBgMode,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            crop_hint_dismissed: false,
            last_aspect_preset: AspectPreset::Free,
            last_bg_mode: CanvasBgMode::Solid,
        }
    }
}

// ============================================================================
// Getters (for internal Rust use)
// ============================================================================

/// Check if the crop tool hint has been dismissed.
pub fn is_crop_hint_dismissed() -> bool {
    UI_PREFS.read().crop_hint_dismissed
}

/// Get the current UI preferences.
pub fn get_ui_prefs() -> UiPrefs {
    UI_PREFS.read().clone()
}

// ============================================================================
// Setters
// ============================================================================

/// Dismiss the crop tool hint permanently.
pub fn dismiss_crop_hint() {
    log::debug!("[CONFIG] dismiss_crop_hint()");
    UI_PREFS.write().crop_hint_dismissed = true;
}

/// Remember the aspect preset the user picked.
pub fn remember_aspect_preset(preset: AspectPreset) {
    log::debug!("[CONFIG] remember_aspect_preset({})", preset);
    UI_PREFS.write().last_aspect_preset = preset;
}

/// Remember the canvas background mode the user picked.
pub fn remember_bg_mode(mode: CanvasBgMode) {
    log::debug!("[CONFIG] remember_bg_mode({:?})", mode);
    UI_PREFS.write().last_bg_mode = mode;
}

/// Set all preferences at once (for frontend sync).
pub fn set_ui_prefs(prefs: UiPrefs) {
    log::debug!("[CONFIG] set_ui_prefs({:?})", prefs);
    *UI_PREFS.write() = prefs;
}

// ============================================================================
// Persistence
// ============================================================================

/// Where preferences live on disk.
pub fn prefs_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("clipnote")
        .join("ui_prefs.json")
}

/// Load preferences from the default location into the global. A missing
/// file is fine; it leaves defaults in place.
pub fn load_ui_prefs() -> ClipnoteResult<()> {
    let path = prefs_path();
    if !path.exists() {
        log::debug!("[CONFIG] no prefs file at {:?}, using defaults", path);
        return Ok(());
    }
    let prefs = read_prefs(&path)?;
    *UI_PREFS.write() = prefs;
    log::info!("[CONFIG] loaded UI prefs from {:?}", path);
    Ok(())
}

/// Persist the current global preferences to the default location.
pub fn save_ui_prefs() -> ClipnoteResult<()> {
    let path = prefs_path();
    write_prefs(&path, &UI_PREFS.read())?;
    log::debug!("[CONFIG] saved UI prefs to {:?}", path);
    Ok(())
}

fn read_prefs(path: &Path) -> ClipnoteResult<UiPrefs> {
    let content = fs::read_to_string(path)?;
    let prefs = serde_json::from_str(&content)?;
    Ok(prefs)
}

fn write_prefs(path: &Path, prefs: &UiPrefs) -> ClipnoteResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}
