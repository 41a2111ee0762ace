//! Placement derivation shared by the live preview and the encoder.
//!
//! A crop is realized without touching source pixels: the video surface is
//! scaled up and offset inside its viewport so that exactly the crop
//! rectangle shows. `PlacementSpec` is that statement in CSS-friendly
//! percent units. The preview applies it to a DOM surface, the encode
//! backend derives the equivalent pixel region; both must describe the same
//! framing or exports stop matching the preview.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::space::{mirrored_origin, FULL_SPAN_PCT};
use super::types::{CropSettings, SourceDims};

/// Scale and offset positioning a video surface inside its viewport.
///
/// All percent values are relative to the viewport. `width_pct: 200` means
/// the surface is twice as wide as the viewport; `left_pct: -50` shifts it
/// half a viewport to the left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct PlacementSpec {
    /// Surface width, percent of viewport width.
    pub width_pct: f64,
    /// Surface height, percent of viewport height.
    pub height_pct: f64,
    /// Horizontal surface offset, percent of viewport width.
    pub left_pct: f64,
    /// Vertical surface offset, percent of viewport height.
    pub top_pct: f64,
    /// Mirror the surface horizontally.
    pub mirror_x: bool,
    /// Mirror the surface vertically.
    pub mirror_y: bool,
}

impl PlacementSpec {
    /// The do-nothing placement: surface fills the viewport exactly.
    pub const IDENTITY: PlacementSpec = PlacementSpec {
        width_pct: FULL_SPAN_PCT,
        height_pct: FULL_SPAN_PCT,
        left_pct: 0.0,
        top_pct: 0.0,
        mirror_x: false,
        mirror_y: false,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Derive the placement for the given settings.
///
/// `frames_pre_cropped` reports that the upstream pipeline already cropped
/// the frames physically. In that case the stored rectangle has been
/// consumed once and applying it again would crop twice, so the identity
/// placement is returned regardless of the settings. The mirror flags are
/// zeroed too: a pipeline that bakes the crop bakes the flips with it.
///
/// The horizontal offset is computed from the crop origin as the user sees
/// it, which under `flip_x` is the distance to the opposite source edge.
/// Getting this wrong shifts every mirrored crop sideways, so the exact
/// numbers are pinned by regression tests.
pub fn place(settings: &CropSettings, frames_pre_cropped: bool) -> PlacementSpec {
    if frames_pre_cropped {
        if !settings.is_identity() {
            log::debug!(
                "[PLACE] frames arrive pre-cropped, ignoring stored rect {}x{} at ({}, {})",
                settings.width,
                settings.height,
                settings.x,
                settings.y
            );
        }
        return PlacementSpec::IDENTITY;
    }

    let s = settings.sanitized();
    if s.is_identity() {
        return PlacementSpec::IDENTITY;
    }

    let effective_x = if s.flip_x {
        mirrored_origin(s.x, s.width)
    } else {
        s.x
    };
    let effective_y = if s.flip_y {
        mirrored_origin(s.y, s.height)
    } else {
        s.y
    };

    PlacementSpec {
        width_pct: FULL_SPAN_PCT / s.width * FULL_SPAN_PCT,
        height_pct: FULL_SPAN_PCT / s.height * FULL_SPAN_PCT,
        left_pct: -(effective_x / s.width) * FULL_SPAN_PCT,
        top_pct: -(effective_y / s.height) * FULL_SPAN_PCT,
        mirror_x: s.flip_x,
        mirror_y: s.flip_y,
    }
}

// ============================================================================
// Pixel form for the encoder
// ============================================================================

/// Concrete pixel region of the source selected by a crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolve the crop rectangle to source pixels for the encode backend.
///
/// Only the in-frame part of the rectangle selects pixels; padding beyond
/// the source bounds is the background's job, not the encoder's. Dimensions
/// are snapped down to even values because yuv420 encoders reject odd ones.
/// A region that collapses to nothing falls back to the full frame, matching
/// how the render path treats an unusable crop.
pub fn pixel_rect(settings: &CropSettings, dims: SourceDims) -> PixelRect {
    let full = PixelRect {
        x: 0,
        y: 0,
        width: (dims.width / 2) * 2,
        height: (dims.height / 2) * 2,
    };
    if dims.width == 0 || dims.height == 0 {
        log::warn!("[CROP] source dims are {}x{}", dims.width, dims.height);
        return full;
    }

    let s = settings.sanitized();

    // Intersect with the source frame in percent space first
    let left = s.x.max(0.0);
    let top = s.y.max(0.0);
    let right = (s.x + s.width).min(FULL_SPAN_PCT);
    let bottom = (s.y + s.height).min(FULL_SPAN_PCT);
    if right <= left || bottom <= top {
        log::warn!(
            "[CROP] rect {}x{} at ({}, {}) selects no source pixels, using full frame",
            s.width,
            s.height,
            s.x,
            s.y
        );
        return full;
    }

    let to_px_x = |pct: f64| (pct / FULL_SPAN_PCT * dims.width as f64).round() as u32;
    let to_px_y = |pct: f64| (pct / FULL_SPAN_PCT * dims.height as f64).round() as u32;

    // Clamp to frame bounds, then snap to even dimensions
    let x = to_px_x(left).min(dims.width.saturating_sub(1));
    let y = to_px_y(top).min(dims.height.saturating_sub(1));
    let width = (to_px_x(right) - x).min(dims.width.saturating_sub(x));
    let height = (to_px_y(bottom) - y).min(dims.height.saturating_sub(y));

    let width = (width / 2) * 2;
    let height = (height / 2) * 2;

    if width == 0 || height == 0 {
        log::warn!(
            "[CROP] rect {}x{} at ({}, {}) rounds to an empty pixel region, using full frame",
            s.width,
            s.height,
            s.x,
            s.y
        );
        return full;
    }

    PixelRect {
        x,
        y,
        width,
        height,
    }
}
