//! Wire types for the crop/transform model.
//!
//! `CropSettings` is the single value the whole engine revolves around:
//! - the crop rectangle, in percent of the source video (flip-independent)
//! - the flip flags (applied at display time, after cropping)
//! - the optional aspect lock for interactive resizing
//! - the canvas background used when the rectangle pads beyond the source
//!
//! These structs are the Rust <-> TypeScript contract: the studio frontend
//! consumes the ts-rs exports, so field names and shapes here are load-bearing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::space::{FlipState, LogicalSpace, Rect, FULL_SPAN_PCT};
use crate::error::{ClipnoteError, ClipnoteResult};

/// Smallest crop dimension the engine will produce, in percent.
/// Anything below this is impossible to grab again with a pointer.
pub const MIN_CROP_PCT: f64 = 10.0;

// ============================================================================
// Crop Settings
// ============================================================================

/// Background fill for the padded region when the crop rectangle extends
/// beyond the source bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub enum CanvasBgMode {
    /// Flat color fill.
    #[default]
    Solid,
    /// The source video itself, cover-scaled behind the frame and blurred.
    Blur,
}

/// Complete crop/transform state for one video.
///
/// The rectangle is logical (source-relative): flips never change `x`/`y`
/// here. `x`/`y` may be negative and `x + width` may exceed 100; that is the
/// deliberate padding case, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct CropSettings {
    /// Left edge, percent of source width.
    pub x: f64,
    /// Top edge, percent of source height.
    pub y: f64,
    /// Width, percent of source width. Never below [`MIN_CROP_PCT`].
    pub width: f64,
    /// Height, percent of source height. Never below [`MIN_CROP_PCT`].
    pub height: f64,
    /// Locked visual aspect ratio (width/height as seen on screen), or
    /// `None` for free-form resizing.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    /// Mirror horizontally at display time.
    #[serde(default)]
    pub flip_x: bool,
    /// Mirror vertically at display time.
    #[serde(default)]
    pub flip_y: bool,
    /// Background fill mode for padded regions.
    #[serde(default)]
    pub canvas_bg_mode: CanvasBgMode,
    /// Solid fill color (hex format, e.g. "#000000").
    #[serde(default = "CropSettings::default_bg_color")]
    pub canvas_bg_color: String,
    /// Blur radius for the blur backdrop, in source pixels.
    #[serde(default)]
    pub canvas_bg_blur: f64,
}

impl CropSettings {
    fn default_bg_color() -> String {
        "#000000".to_string()
    }
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: FULL_SPAN_PCT,
            height: FULL_SPAN_PCT,
            aspect_ratio: None,
            flip_x: false,
            flip_y: false,
            canvas_bg_mode: CanvasBgMode::Solid,
            canvas_bg_color: Self::default_bg_color(),
            canvas_bg_blur: 0.0,
        }
    }
}

impl CropSettings {
    /// The crop rectangle as typed logical-space geometry.
    pub fn rect(&self) -> Rect<LogicalSpace> {
        Rect::from_coords(self.x, self.y, self.width, self.height)
    }

    /// Replace the crop rectangle, leaving everything else untouched.
    pub fn set_rect(&mut self, rect: Rect<LogicalSpace>) {
        self.x = rect.origin.x;
        self.y = rect.origin.y;
        self.width = rect.size.width;
        self.height = rect.size.height;
    }

    /// The flip flags bundled for space conversions.
    pub fn flip(&self) -> FlipState {
        FlipState::new(self.flip_x, self.flip_y)
    }

    /// True when the rectangle covers exactly the full source frame.
    pub fn is_full_frame(&self) -> bool {
        self.x.abs() < 1e-6
            && self.y.abs() < 1e-6
            && (self.width - FULL_SPAN_PCT).abs() < 1e-6
            && (self.height - FULL_SPAN_PCT).abs() < 1e-6
    }

    /// True when applying these settings changes nothing: full frame, no
    /// mirroring.
    pub fn is_identity(&self) -> bool {
        self.is_full_frame() && !self.flip_x && !self.flip_y
    }

    /// True when any part of the rectangle lies outside the source frame,
    /// i.e. the output needs a background fill behind the video.
    pub fn implies_padding(&self) -> bool {
        self.x < 0.0
            || self.y < 0.0
            || self.width > FULL_SPAN_PCT
            || self.height > FULL_SPAN_PCT
            || self.x + self.width > FULL_SPAN_PCT
            || self.y + self.height > FULL_SPAN_PCT
    }

    /// Reject settings whose numbers cannot be reasoned about at all.
    ///
    /// Used at ingest boundaries (project load, frontend updates) so that
    /// everything past them can rely on finite math.
    pub fn validate(&self) -> ClipnoteResult<()> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.canvas_bg_blur.is_finite()
            && self.aspect_ratio.map_or(true, |r| r.is_finite());
        if !finite {
            return Err(ClipnoteError::InvalidSettings(
                "crop settings contain non-finite values".to_string(),
            ));
        }
        Ok(())
    }

    /// Return a copy with every field forced back into usable range.
    ///
    /// Non-finite coordinates fall back to the identity values, dimensions
    /// are raised to the minimum, and a meaningless aspect lock is dropped.
    /// Lossy by design; callers that want to surface bad input as an error
    /// use [`CropSettings::validate`] first.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if !out.x.is_finite() {
            out.x = 0.0;
        }
        if !out.y.is_finite() {
            out.y = 0.0;
        }
        out.width = if out.width.is_finite() {
            out.width.max(MIN_CROP_PCT)
        } else {
            FULL_SPAN_PCT
        };
        out.height = if out.height.is_finite() {
            out.height.max(MIN_CROP_PCT)
        } else {
            FULL_SPAN_PCT
        };
        if let Some(ratio) = out.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                out.aspect_ratio = None;
            }
        }
        if !out.canvas_bg_blur.is_finite() || out.canvas_bg_blur < 0.0 {
            out.canvas_bg_blur = 0.0;
        }
        out
    }
}

// ============================================================================
// Aspect Presets
// ============================================================================

/// Preset aspect ratios offered by the crop toolbar.
///
/// Purely a convenience layer: selecting a preset just resolves to the
/// `aspect_ratio` lock value, `Free` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub enum AspectPreset {
    /// No lock, free-form resizing.
    #[default]
    Free,
    /// 1:1 square.
    Square1x1,
    /// 4:3 standard/classic.
    Standard4x3,
    /// 16:9 widescreen landscape.
    Landscape16x9,
    /// 9:16 portrait (social media vertical).
    Portrait9x16,
}

impl AspectPreset {
    /// The lock value this preset resolves to.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Square1x1 => Some(1.0),
            Self::Standard4x3 => Some(4.0 / 3.0),
            Self::Landscape16x9 => Some(16.0 / 9.0),
            Self::Portrait9x16 => Some(9.0 / 16.0),
        }
    }
}

impl std::fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Free => "Free",
            Self::Square1x1 => "1:1",
            Self::Standard4x3 => "4:3",
            Self::Landscape16x9 => "16:9",
            Self::Portrait9x16 => "9:16",
        };
        write!(f, "{}", label)
    }
}

// ============================================================================
// Source Metadata
// ============================================================================

/// Intrinsic pixel dimensions of the loaded source video.
///
/// Arrives from metadata probing some time after the video is selected;
/// until then the engine runs without it and aspect locking degrades to
/// free-form resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct SourceDims {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
}

impl SourceDims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` when either dimension is zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }
}
