//! Canvas background policy for padded crops.
//!
//! A crop rectangle may extend beyond the source bounds on purpose; whatever
//! the video does not cover needs a fill behind it. This module decides what
//! that fill is. It is purely additive: the video's own placement is never
//! altered, a backdrop layer is planned underneath it or nothing happens
//! at all.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::placement::PlacementSpec;
use super::space::FULL_SPAN_PCT;
use super::types::{CanvasBgMode, CropSettings};

/// What to draw behind the video, if anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub enum BackdropPlan {
    /// The video covers the whole viewport, nothing to fill.
    None,
    /// Flat color fill (hex format, as stored in the settings).
    Solid { color: String },
    /// The source video drawn again behind the frame, cover-scaled so no
    /// gap remains, and blurred.
    Blur { placement: PlacementSpec, radius: f64 },
}

/// Decide the backdrop for the given settings.
///
/// Returns [`BackdropPlan::None`] unless the rectangle actually implies
/// padding; switching the background mode while the crop is in-bounds is a
/// stored preference with no visible effect.
pub fn plan(settings: &CropSettings) -> BackdropPlan {
    let s = settings.sanitized();
    if !s.implies_padding() {
        return BackdropPlan::None;
    }

    match s.canvas_bg_mode {
        CanvasBgMode::Solid => BackdropPlan::Solid {
            color: s.canvas_bg_color.clone(),
        },
        CanvasBgMode::Blur => BackdropPlan::Blur {
            placement: cover_placement(&s),
            radius: s.canvas_bg_blur,
        },
    }
}

/// Cover-scale the full source into the padded viewport.
///
/// The viewport's on-screen aspect is the crop rect's percent aspect times
/// the source aspect, and the backdrop content is the source itself, so the
/// source aspect cancels: the cover scale depends only on the percent
/// dimensions. Whichever percent dimension is larger dictates how much the
/// other axis overflows; the overflow is split evenly so the backdrop stays
/// centered.
fn cover_placement(s: &CropSettings) -> PlacementSpec {
    let (width_pct, height_pct) = if s.height >= s.width {
        // Viewport taller than the source: match height, overflow width
        (FULL_SPAN_PCT * s.height / s.width, FULL_SPAN_PCT)
    } else {
        // Viewport wider than the source: match width, overflow height
        (FULL_SPAN_PCT, FULL_SPAN_PCT * s.width / s.height)
    };

    PlacementSpec {
        width_pct,
        height_pct,
        left_pct: -(width_pct - FULL_SPAN_PCT) / 2.0,
        top_pct: -(height_pct - FULL_SPAN_PCT) / 2.0,
        // The backdrop is the same footage; it mirrors with the video so
        // the ambience matches at the seams.
        mirror_x: s.flip_x,
        mirror_y: s.flip_y,
    }
}

// ============================================================================
// Color helpers
// ============================================================================

/// Convert sRGB (0-255) to linear color space (0.0-1.0).
pub fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Parse a hex color string to linear RGBA.
///
/// Accepts `#RRGGBB` and `#RRGGBBAA`, with or without the leading `#`.
/// Anything unparseable becomes opaque black, because the encode path must
/// never fail over a stored color string.
pub fn hex_to_linear_rgba(hex: &str) -> [f32; 4] {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    let (r, g, b) = match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => (r, g, b),
        _ => {
            log::warn!("[BACKDROP] unparseable color '{}', using black", hex);
            (0, 0, 0)
        }
    };
    let a = channel(6..8).unwrap_or(255);

    [
        srgb_to_linear(r),
        srgb_to_linear(g),
        srgb_to_linear(b),
        a as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_settings() -> CropSettings {
        CropSettings {
            x: -10.0,
            y: 0.0,
            width: 120.0,
            height: 100.0,
            ..CropSettings::default()
        }
    }

    #[test]
    fn test_in_bounds_rect_needs_no_backdrop() {
        let mut s = CropSettings::default();
        s.x = 25.0;
        s.width = 50.0;
        s.canvas_bg_mode = CanvasBgMode::Blur;
        assert_eq!(plan(&s), BackdropPlan::None);
    }

    #[test]
    fn test_solid_plan_carries_stored_color() {
        let mut s = padded_settings();
        s.canvas_bg_color = "#1a2b3c".to_string();
        match plan(&s) {
            BackdropPlan::Solid { color } => assert_eq!(color, "#1a2b3c"),
            other => panic!("expected solid plan, got {:?}", other),
        }
    }

    #[test]
    fn test_blur_plan_covers_wide_viewport() {
        let mut s = padded_settings(); // 120 x 100: viewport wider than source
        s.canvas_bg_mode = CanvasBgMode::Blur;
        s.canvas_bg_blur = 24.0;

        match plan(&s) {
            BackdropPlan::Blur { placement, radius } => {
                assert!((radius - 24.0).abs() < 1e-9);
                assert!((placement.width_pct - 100.0).abs() < 1e-9);
                assert!((placement.height_pct - 120.0).abs() < 1e-9);
                assert!((placement.left_pct - 0.0).abs() < 1e-9);
                // Vertical overflow split evenly
                assert!((placement.top_pct - -10.0).abs() < 1e-9);
            }
            other => panic!("expected blur plan, got {:?}", other),
        }
    }

    #[test]
    fn test_blur_plan_covers_tall_viewport() {
        let s = CropSettings {
            x: 30.0,
            y: -20.0,
            width: 40.0,
            height: 140.0,
            canvas_bg_mode: CanvasBgMode::Blur,
            ..CropSettings::default()
        };

        match plan(&s) {
            BackdropPlan::Blur { placement, .. } => {
                assert!((placement.height_pct - 100.0).abs() < 1e-9);
                assert!((placement.width_pct - 350.0).abs() < 1e-9);
                assert!((placement.left_pct - -125.0).abs() < 1e-9);
                assert!((placement.top_pct - 0.0).abs() < 1e-9);
            }
            other => panic!("expected blur plan, got {:?}", other),
        }
    }

    #[test]
    fn test_square_padded_viewport_fits_exactly() {
        // Equal percent dimensions mean the viewport already has the source
        // aspect, so cover scaling is a no-op.
        let s = CropSettings {
            x: -5.0,
            y: -5.0,
            width: 110.0,
            height: 110.0,
            canvas_bg_mode: CanvasBgMode::Blur,
            ..CropSettings::default()
        };
        match plan(&s) {
            BackdropPlan::Blur { placement, .. } => {
                assert!((placement.width_pct - 100.0).abs() < 1e-9);
                assert!((placement.height_pct - 100.0).abs() < 1e-9);
            }
            other => panic!("expected blur plan, got {:?}", other),
        }
    }

    #[test]
    fn test_backdrop_inherits_flips() {
        let mut s = padded_settings();
        s.canvas_bg_mode = CanvasBgMode::Blur;
        s.flip_x = true;
        match plan(&s) {
            BackdropPlan::Blur { placement, .. } => {
                assert!(placement.mirror_x);
                assert!(!placement.mirror_y);
            }
            other => panic!("expected blur plan, got {:?}", other),
        }
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 1e-6);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        // Low values use the linear segment
        assert!((srgb_to_linear(10) - (10.0 / 255.0) / 12.92).abs() < 1e-6);
    }

    #[test]
    fn test_hex_parsing() {
        let black = hex_to_linear_rgba("#000000");
        assert_eq!(black, [0.0, 0.0, 0.0, 1.0]);

        let white = hex_to_linear_rgba("#ffffff");
        assert!((white[0] - 1.0).abs() < 1e-6);
        assert!((white[3] - 1.0).abs() < 1e-6);

        let red = hex_to_linear_rgba("FF0000");
        assert!((red[0] - 1.0).abs() < 1e-6);
        assert!((red[1] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_with_alpha() {
        let translucent = hex_to_linear_rgba("#00000080");
        assert!((translucent[3] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_hex_falls_back_to_black() {
        assert_eq!(hex_to_linear_rgba("nope"), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex_to_linear_rgba("#12"), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex_to_linear_rgba(""), [0.0, 0.0, 0.0, 1.0]);
    }
}
