//! Project persistence.
//!
//! A project ties one source video to its editing state: the crop/transform
//! settings plus enough source metadata to restore a session without
//! re-probing the file. Projects serialize to a `project.json` inside their
//! own folder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ClipnoteResult, ResultExt};
use crate::framing::types::{CropSettings, SourceDims};

/// Source video metadata captured at import time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct SourceMeta {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Duration in milliseconds.
    #[ts(type = "number")]
    pub duration_ms: u64,
    /// Frames per second.
    pub fps: u32,
    /// Absolute path to the source file, if it still resolves.
    pub path: Option<String>,
}

impl SourceMeta {
    pub fn dims(&self) -> SourceDims {
        SourceDims::new(self.width, self.height)
    }
}

/// Complete project with crop/transform editing state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last modified timestamp (ISO 8601).
    pub updated_at: String,
    /// Project name (usually derived from filename).
    pub name: String,
    /// Source video this project edits.
    pub source: SourceMeta,
    /// Confirmed crop/transform settings.
    #[serde(default)]
    pub crop: CropSettings,
    /// True when the source frames already have the crop baked in, so
    /// playback must not apply it again.
    #[serde(default)]
    pub frames_pre_cropped: bool,
}

impl Project {
    /// Create a new project for a freshly imported video.
    pub fn new(video_path: &str, width: u32, height: u32, duration_ms: u64, fps: u32) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        // Generate a simple unique ID using timestamp + random number
        let id = format!(
            "proj_{}_{:08x}",
            chrono::Utc::now().timestamp_millis(),
            rand::random::<u32>()
        );

        Self {
            id,
            created_at: now.clone(),
            updated_at: now,
            name: PathBuf::from(video_path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string()),
            source: SourceMeta {
                width,
                height,
                duration_ms,
                fps,
                path: Some(video_path.to_string()),
            },
            crop: CropSettings::default(),
            frames_pre_cropped: false,
        }
    }

    /// Attach crop settings, e.g. when duplicating a project.
    ///
    /// Values are sanitized rather than rejected, same as `load_from`.
    pub fn with_crop(mut self, settings: CropSettings) -> Self {
        self.crop = settings.sanitized();
        self
    }

    /// Mark the source frames as already cropped so playback and export
    /// skip applying the crop again.
    pub fn with_frames_pre_cropped(mut self) -> Self {
        self.frames_pre_cropped = true;
        self
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// Store confirmed crop settings. Rejects non-finite values rather
    /// than letting them reach a file.
    pub fn set_crop(&mut self, settings: CropSettings) -> ClipnoteResult<()> {
        settings.validate()?;
        self.crop = settings;
        self.touch();
        Ok(())
    }

    /// Persist this project as `project.json` inside `folder`.
    pub fn save_to(&self, folder: &Path) -> ClipnoteResult<PathBuf> {
        fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create project folder {:?}", folder))?;
        let path = folder.join("project.json");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("[PROJECT] Saved project {} to {:?}", self.id, path);
        Ok(path)
    }

    /// Load a project from a folder containing `project.json`.
    ///
    /// Crop settings from disk are sanitized rather than rejected: a
    /// corrupt field should not make the whole project unopenable.
    pub fn load_from(folder: &Path) -> ClipnoteResult<Project> {
        let path = folder.join("project.json");
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let mut project: Project =
            serde_json::from_str(&content).context("Failed to parse project.json")?;

        let clean = project.crop.sanitized();
        if clean != project.crop {
            log::warn!(
                "[PROJECT] Project {} has unusable crop settings, sanitizing",
                project.id
            );
            project.crop = clean;
        }

        log::info!("[PROJECT] Loaded project {} from {:?}", project.id, path);
        Ok(project)
    }
}

/// Where project folders live by default.
pub fn default_projects_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::config_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("clipnote")
        .join("projects")
}
