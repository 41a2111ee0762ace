//! Resize math for the eight crop handles.
//!
//! Everything here is pure: a base rectangle (captured at pointer-down), a
//! handle, and a drag delta go in, a new rectangle comes out. All geometry
//! is display space, because handles are what the user grabs on screen; the
//! session converts back to logical space when the gesture ends.
//!
//! Ordering matters: the drag is applied first, the aspect lock second, and
//! the minimum-size clamp always last, anchored so the stationary corner or
//! edge never moves.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::space::{Coord, DisplaySpace, Rect};
use super::types::MIN_CROP_PCT;

/// The eight grab points of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    fn moves_left(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    fn moves_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    fn moves_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }
}

/// Apply a handle drag to the base rectangle.
///
/// `delta` is the pointer travel since the drag began, in percent units.
/// `lock` is the visual aspect ratio to preserve (width/height as seen on
/// screen) and `source_aspect` the intrinsic width/height of the source
/// video; the lock needs both, because percent units are relative to each
/// axis of the source separately. When either is missing or meaningless the
/// resize silently degrades to free-form.
///
/// The result always satisfies the minimum-size invariant. It may extend
/// beyond `[0, 100]`; that is the padding case and deliberately allowed.
pub fn resize(
    base: Rect<DisplaySpace>,
    handle: ResizeHandle,
    delta: Coord<DisplaySpace>,
    lock: Option<f64>,
    source_aspect: Option<f64>,
) -> Rect<DisplaySpace> {
    let pct_ratio = match (lock, source_aspect) {
        (Some(ratio), Some(aspect))
            if ratio.is_finite() && aspect.is_finite() && ratio > 0.0 && aspect > 0.0 =>
        {
            // width/height in percent units that yields `ratio` on screen
            Some(ratio / aspect)
        }
        _ => None,
    };

    match pct_ratio {
        Some(ratio) => resize_locked(base, handle, delta, ratio),
        None => resize_free(base, handle, delta),
    }
}

/// Free-form resize: each handle moves only its own edge or corner, the
/// opposite side stays put.
fn resize_free(
    base: Rect<DisplaySpace>,
    handle: ResizeHandle,
    delta: Coord<DisplaySpace>,
) -> Rect<DisplaySpace> {
    let mut left = base.left();
    let mut top = base.top();
    let mut right = base.right();
    let mut bottom = base.bottom();

    if handle.moves_left() {
        left += delta.x;
    }
    if handle.moves_right() {
        right += delta.x;
    }
    if handle.moves_top() {
        top += delta.y;
    }
    if handle.moves_bottom() {
        bottom += delta.y;
    }

    // Clamp last, anchored at the edge the handle did not move. A drag
    // pulled past the opposite edge lands here too: the span goes negative
    // and gets raised back to the floor instead of flipping the rect.
    if right - left < MIN_CROP_PCT {
        if handle.moves_left() {
            left = right - MIN_CROP_PCT;
        } else if handle.moves_right() {
            right = left + MIN_CROP_PCT;
        }
    }
    if bottom - top < MIN_CROP_PCT {
        if handle.moves_top() {
            top = bottom - MIN_CROP_PCT;
        } else if handle.moves_bottom() {
            bottom = top + MIN_CROP_PCT;
        }
    }

    Rect::from_edges(left, top, right, bottom)
}

/// Aspect-locked resize.
///
/// One axis drives, the other follows from the ratio. Corner drags pick the
/// driving axis from the dominant pointer direction (`|dx| > |dy|` means X
/// drives, exact ties go to Y); edge drags always drive their own axis and
/// re-center the perpendicular one. The minimum floor preserves the ratio:
/// whichever dimension would dip below the floor raises both.
fn resize_locked(
    base: Rect<DisplaySpace>,
    handle: ResizeHandle,
    delta: Coord<DisplaySpace>,
    pct_ratio: f64,
) -> Rect<DisplaySpace> {
    let (min_w, min_h) = if pct_ratio >= 1.0 {
        (MIN_CROP_PCT * pct_ratio, MIN_CROP_PCT)
    } else {
        (MIN_CROP_PCT, MIN_CROP_PCT / pct_ratio)
    };

    let dims_from_width = |w: f64| {
        let w = w.max(min_w);
        (w, w / pct_ratio)
    };
    let dims_from_height = |h: f64| {
        let h = h.max(min_h);
        (h * pct_ratio, h)
    };

    // Pointer travel toward "bigger" for the dragged side
    let dw = if handle.moves_left() {
        -delta.x
    } else {
        delta.x
    };
    let dh = if handle.moves_top() { -delta.y } else { delta.y };

    let (w, h) = match handle {
        ResizeHandle::Left | ResizeHandle::Right => dims_from_width(base.size.width + dw),
        ResizeHandle::Top | ResizeHandle::Bottom => dims_from_height(base.size.height + dh),
        _ if delta.x.abs() > delta.y.abs() => dims_from_width(base.size.width + dw),
        _ => dims_from_height(base.size.height + dh),
    };

    let left = if handle.moves_left() {
        base.right() - w
    } else if handle.moves_right() {
        base.left()
    } else {
        base.center().x - w / 2.0
    };
    let top = if handle.moves_top() {
        base.bottom() - h
    } else if handle.moves_bottom() {
        base.top()
    } else {
        base.center().y - h / 2.0
    };

    Rect::from_coords(left, top, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Rect<DisplaySpace> {
        Rect::from_coords(20.0, 20.0, 40.0, 30.0)
    }

    fn delta(x: f64, y: f64) -> Coord<DisplaySpace> {
        Coord::new(x, y)
    }

    #[test]
    fn test_free_right_edge_moves_only_width() {
        let out = resize(base(), ResizeHandle::Right, delta(15.0, 7.0), None, None);
        assert!((out.left() - 20.0).abs() < 1e-9);
        assert!((out.top() - 20.0).abs() < 1e-9);
        assert!((out.size.width - 55.0).abs() < 1e-9);
        assert!((out.size.height - 30.0).abs() < 1e-9, "vertical delta must be ignored");
    }

    #[test]
    fn test_free_bottom_right_keeps_origin_anchored() {
        let out = resize(
            base(),
            ResizeHandle::BottomRight,
            delta(12.0, -5.0),
            None,
            None,
        );
        assert!((out.left() - 20.0).abs() < 1e-9, "x must not move");
        assert!((out.top() - 20.0).abs() < 1e-9, "y must not move");
        assert!((out.size.width - 52.0).abs() < 1e-9);
        assert!((out.size.height - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_top_left_keeps_bottom_right_anchored() {
        let out = resize(base(), ResizeHandle::TopLeft, delta(-8.0, 4.0), None, None);
        assert!((out.right() - 60.0).abs() < 1e-9);
        assert!((out.bottom() - 50.0).abs() < 1e-9);
        assert!((out.left() - 12.0).abs() < 1e-9);
        assert!((out.top() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_size_clamp_anchored_at_opposite_edge() {
        // Drag the right edge far past the minimum
        let out = resize(base(), ResizeHandle::Right, delta(-38.0, 0.0), None, None);
        assert!((out.size.width - MIN_CROP_PCT).abs() < 1e-9);
        assert!((out.left() - 20.0).abs() < 1e-9, "left edge is the anchor");
    }

    #[test]
    fn test_crossed_drag_does_not_flip_rect() {
        // Pull the right edge 30% past the left edge
        let out = resize(base(), ResizeHandle::Right, delta(-70.0, 0.0), None, None);
        assert!(out.size.width >= MIN_CROP_PCT);
        assert!((out.left() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_handle_upholds_min_size() {
        for handle in ResizeHandle::ALL {
            let out = resize(base(), handle, delta(-500.0, -500.0), None, None);
            assert!(
                out.size.width >= MIN_CROP_PCT - 1e-9,
                "{:?} produced width {}",
                handle,
                out.size.width
            );
            assert!(
                out.size.height >= MIN_CROP_PCT - 1e-9,
                "{:?} produced height {}",
                handle,
                out.size.height
            );
        }
    }

    #[test]
    fn test_out_of_bounds_growth_is_allowed() {
        let out = resize(base(), ResizeHandle::Right, delta(60.0, 0.0), None, None);
        assert!(out.right() > 100.0, "padding drags may leave the frame");
    }

    // On a square source (aspect 1.0) a 1:1 visual lock means equal percent
    // dimensions, which keeps the locked expectations easy to read.

    #[test]
    fn test_locked_corner_dominant_x_drives_width() {
        let sq = Rect::from_coords(10.0, 10.0, 30.0, 30.0);
        let out = resize(
            sq,
            ResizeHandle::BottomRight,
            delta(20.0, 5.0),
            Some(1.0),
            Some(1.0),
        );
        assert!((out.size.width - 50.0).abs() < 1e-9);
        assert!((out.size.height - 50.0).abs() < 1e-9, "height follows the lock");
        assert!((out.left() - 10.0).abs() < 1e-9, "anchor corner stays");
        assert!((out.top() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_corner_dominant_y_drives_height() {
        let sq = Rect::from_coords(10.0, 10.0, 30.0, 30.0);
        let out = resize(
            sq,
            ResizeHandle::BottomRight,
            delta(3.0, -12.0),
            Some(1.0),
            Some(1.0),
        );
        assert!((out.size.height - 18.0).abs() < 1e-9);
        assert!((out.size.width - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_corner_tie_goes_to_vertical_axis() {
        let sq = Rect::from_coords(10.0, 10.0, 30.0, 30.0);
        let out = resize(
            sq,
            ResizeHandle::BottomRight,
            delta(8.0, 8.0),
            Some(1.0),
            Some(1.0),
        );
        // Y drives on an exact tie: height = 30 + 8
        assert!((out.size.height - 38.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_top_left_anchors_bottom_right() {
        let sq = Rect::from_coords(30.0, 30.0, 20.0, 20.0);
        let out = resize(
            sq,
            ResizeHandle::TopLeft,
            delta(-10.0, -2.0),
            Some(1.0),
            Some(1.0),
        );
        assert!((out.right() - 50.0).abs() < 1e-9);
        assert!((out.bottom() - 50.0).abs() < 1e-9);
        assert!((out.size.width - 30.0).abs() < 1e-9);
        assert!((out.size.height - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_edge_recenters_perpendicular_axis() {
        let sq = Rect::from_coords(20.0, 20.0, 40.0, 40.0);
        let out = resize(sq, ResizeHandle::Right, delta(10.0, 0.0), Some(1.0), Some(1.0));
        assert!((out.size.width - 50.0).abs() < 1e-9);
        assert!((out.size.height - 50.0).abs() < 1e-9);
        assert!((out.left() - 20.0).abs() < 1e-9, "dragged axis anchors left");
        // Vertical center stays at 40
        assert!((out.center().y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_resize_holds_visual_ratio_on_widescreen_source() {
        // 16:9 lock on a 1920x1080 source: percent dims come out equal
        let source_aspect = 1920.0 / 1080.0;
        let lock = 16.0 / 9.0;
        let start = Rect::from_coords(10.0, 10.0, 40.0, 40.0);

        for handle in ResizeHandle::ALL {
            let out = resize(start, handle, delta(13.0, -7.0), Some(lock), Some(source_aspect));
            let visual = (out.size.width / out.size.height) * source_aspect;
            assert!(
                (visual - lock).abs() < 1e-3,
                "{:?}: visual ratio {} drifted from lock {}",
                handle,
                visual,
                lock
            );
        }
    }

    #[test]
    fn test_locked_portrait_ratio_on_widescreen_source() {
        // 9:16 visual lock on 1920x1080: width must be ~0.316 of height
        let source_aspect = 1920.0 / 1080.0;
        let lock = 9.0 / 16.0;
        let start = Rect::from_coords(30.0, 5.0, 28.0, 88.0);

        let out = resize(
            start,
            ResizeHandle::Bottom,
            delta(0.0, -20.0),
            Some(lock),
            Some(source_aspect),
        );
        let visual = (out.size.width / out.size.height) * source_aspect;
        assert!((visual - lock).abs() < 1e-3);
        assert!((out.size.height - 68.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_min_floor_preserves_ratio() {
        // Wide lock: the width floor must rise so height can stay at 10
        let source_aspect = 1.0;
        let lock = 2.0;
        let sq = Rect::from_coords(20.0, 20.0, 40.0, 20.0);

        let out = resize(
            sq,
            ResizeHandle::BottomRight,
            delta(-200.0, -10.0),
            Some(lock),
            Some(source_aspect),
        );
        assert!(out.size.width >= MIN_CROP_PCT - 1e-9);
        assert!(out.size.height >= MIN_CROP_PCT - 1e-9);
        let visual = (out.size.width / out.size.height) * source_aspect;
        assert!(
            (visual - lock).abs() < 1e-3,
            "floor must not break the lock, got ratio {}",
            visual
        );
    }

    fn assert_same_rect(a: Rect<DisplaySpace>, b: Rect<DisplaySpace>, what: &str) {
        assert!((a.left() - b.left()).abs() < 1e-9, "{}: left differs", what);
        assert!((a.top() - b.top()).abs() < 1e-9, "{}: top differs", what);
        assert!(
            (a.size.width - b.size.width).abs() < 1e-9,
            "{}: width differs",
            what
        );
        assert!(
            (a.size.height - b.size.height).abs() < 1e-9,
            "{}: height differs",
            what
        );
    }

    #[test]
    fn test_lock_without_source_aspect_degrades_to_free_form() {
        let out = resize(base(), ResizeHandle::Right, delta(15.0, 7.0), Some(1.0), None);
        let free = resize(base(), ResizeHandle::Right, delta(15.0, 7.0), None, None);
        assert_same_rect(out, free, "missing source aspect");
    }

    #[test]
    fn test_nonsense_lock_degrades_to_free_form() {
        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let out = resize(base(), ResizeHandle::Top, delta(0.0, -5.0), Some(bad), Some(1.0));
            let free = resize(base(), ResizeHandle::Top, delta(0.0, -5.0), None, None);
            assert_same_rect(out, free, &format!("lock {}", bad));
        }
    }

    #[test]
    fn test_corner_and_edge_classification() {
        let corners = ResizeHandle::ALL.iter().filter(|h| h.is_corner()).count();
        assert_eq!(corners, 4);
    }
}
