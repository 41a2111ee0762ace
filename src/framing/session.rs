//! Interactive editing session for one video's crop state.
//!
//! The session owns two copies of the settings:
//! - `applied` is the last confirmed state, the one render/export consumers
//!   see and the one a project file persists
//! - `tentative` is what the user is currently shaping in the preview
//!
//! Pointer gestures mutate `tentative` only; an explicit apply promotes it,
//! a cancel throws it away. Every gesture captures its base rectangle and
//! start position at pointer-down, so each move recomputes from a stable
//! origin instead of accumulating per-event deltas (which drift).

use super::handles::{resize, ResizeHandle};
use super::space::{Coord, DisplaySpace, Rect};
use super::types::{AspectPreset, CanvasBgMode, CropSettings, SourceDims};
use crate::error::ClipnoteResult;

/// Which part of the rectangle the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Resize(ResizeHandle),
    Move,
}

/// Everything a gesture captured at pointer-down.
#[derive(Debug, Clone, Copy)]
struct DragState {
    gesture: Gesture,
    /// Display-space rect at pointer-down; all deltas apply to this.
    base: Rect<DisplaySpace>,
    /// Pointer position at pointer-down, in percent units.
    start: Coord<DisplaySpace>,
}

/// Editing session managing a video's crop/transform state.
#[derive(Debug)]
pub struct EditSession {
    /// Unique session ID.
    pub id: String,
    /// Last confirmed settings.
    applied: CropSettings,
    /// Settings currently being edited.
    tentative: CropSettings,
    /// Source dimensions, once metadata probing delivers them.
    source: Option<SourceDims>,
    /// Active pointer gesture, if any.
    drag: Option<DragState>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            applied: CropSettings::default(),
            tentative: CropSettings::default(),
            source: None,
            drag: None,
        }
    }

    // ========================================================================
    // State access
    // ========================================================================

    /// The last confirmed settings.
    pub fn applied(&self) -> &CropSettings {
        &self.applied
    }

    /// The live settings shown in the preview.
    pub fn tentative(&self) -> &CropSettings {
        &self.tentative
    }

    pub fn source_dims(&self) -> Option<SourceDims> {
        self.source
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn source_aspect(&self) -> Option<f64> {
        self.source.and_then(|d| d.aspect_ratio())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start over for a newly loaded video. Both settings copies return to
    /// identity; dimensions may already be known or arrive later via
    /// [`EditSession::set_source_dims`].
    pub fn load_video(&mut self, dims: Option<SourceDims>) {
        self.applied = CropSettings::default();
        self.tentative = CropSettings::default();
        self.source = dims;
        self.drag = None;
        match dims {
            Some(d) => log::info!("[SESSION] {} loaded video {}x{}", self.id, d.width, d.height),
            None => log::info!("[SESSION] {} loaded video, dimensions pending", self.id),
        }
    }

    /// Record the source dimensions once metadata probing completes.
    /// Settings are left alone; only lock-dependent behavior improves.
    pub fn set_source_dims(&mut self, dims: SourceDims) {
        log::debug!("[SESSION] {} source dims {}x{}", self.id, dims.width, dims.height);
        self.source = Some(dims);
    }

    /// Adopt previously persisted settings (e.g. from a project file) as
    /// both the applied and tentative state.
    pub fn restore(&mut self, settings: CropSettings) -> ClipnoteResult<()> {
        settings.validate()?;
        self.applied = settings.clone();
        self.tentative = settings;
        self.drag = None;
        Ok(())
    }

    /// Clear the crop back to identity. Source dimensions are kept; they
    /// belong to the video, not the crop.
    pub fn reset(&mut self) {
        log::info!("[SESSION] {} crop reset", self.id);
        self.applied = CropSettings::default();
        self.tentative = CropSettings::default();
        self.drag = None;
    }

    // ========================================================================
    // Non-gesture edits
    // ========================================================================

    /// Toggle display mirroring. The logical rectangle is untouched; only
    /// how it is presented changes.
    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        if self.drag.is_some() {
            log::warn!("[SESSION] {} flip changed mid-drag, cancelling gesture", self.id);
            self.cancel_drag();
        }
        self.tentative.flip_x = flip_x;
        self.tentative.flip_y = flip_y;
    }

    /// Set or clear the aspect lock for future resizes. The current
    /// rectangle is not re-snapped; the lock only constrains gestures.
    pub fn set_aspect_lock(&mut self, ratio: Option<f64>) {
        let ratio = match ratio {
            Some(r) if r.is_finite() && r > 0.0 => Some(r),
            Some(r) => {
                log::warn!("[SESSION] {} ignoring unusable aspect lock {}", self.id, r);
                None
            }
            None => None,
        };
        self.tentative.aspect_ratio = ratio;
    }

    pub fn set_aspect_preset(&mut self, preset: AspectPreset) {
        log::debug!("[SESSION] {} aspect preset {}", self.id, preset);
        self.set_aspect_lock(preset.ratio());
    }

    /// Configure the canvas background used when the rect pads out of
    /// bounds.
    pub fn set_background(&mut self, mode: CanvasBgMode, color: String, blur: f64) {
        self.tentative.canvas_bg_mode = mode;
        self.tentative.canvas_bg_color = color;
        self.tentative.canvas_bg_blur = if blur.is_finite() { blur.max(0.0) } else { 0.0 };
    }

    // ========================================================================
    // Pointer gestures
    // ========================================================================

    /// Begin a handle resize at the given pointer position (display-space
    /// percent). Returns false if another gesture already owns the pointer.
    pub fn begin_resize(&mut self, handle: ResizeHandle, pointer: Coord<DisplaySpace>) -> bool {
        self.begin(Gesture::Resize(handle), pointer)
    }

    /// Begin dragging the rectangle body to translate it.
    pub fn begin_move(&mut self, pointer: Coord<DisplaySpace>) -> bool {
        self.begin(Gesture::Move, pointer)
    }

    fn begin(&mut self, gesture: Gesture, pointer: Coord<DisplaySpace>) -> bool {
        if self.drag.is_some() {
            log::warn!("[SESSION] {} gesture begun while another is active, ignoring", self.id);
            return false;
        }
        if self.tentative.aspect_ratio.is_some() && self.source_aspect().is_none() {
            log::debug!(
                "[SESSION] {} aspect lock set but source dims unknown, resizing free-form",
                self.id
            );
        }
        let base = self.tentative.rect().to_display(self.tentative.flip());
        log::debug!(
            "[SESSION] {} begin {:?} at ({:.2}, {:.2})",
            self.id,
            gesture,
            pointer.x,
            pointer.y
        );
        self.drag = Some(DragState {
            gesture,
            base,
            start: pointer,
        });
        true
    }

    /// Recompute the tentative rectangle for the current pointer position.
    /// Does nothing when no gesture is active.
    pub fn update_drag(&mut self, pointer: Coord<DisplaySpace>) {
        let drag = match self.drag {
            Some(d) => d,
            None => {
                log::debug!("[SESSION] {} drag update with no active gesture", self.id);
                return;
            }
        };

        let delta = pointer - drag.start;
        let display = match drag.gesture {
            Gesture::Resize(handle) => resize(
                drag.base,
                handle,
                delta,
                self.tentative.aspect_ratio,
                self.source_aspect(),
            ),
            Gesture::Move => drag.base.translated(delta),
        };
        self.tentative.set_rect(display.to_logical(self.tentative.flip()));
    }

    /// Finish the gesture, keeping the rectangle where the last update put
    /// it.
    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!(
                "[SESSION] {} end {:?}: rect {:.2}x{:.2} at ({:.2}, {:.2})",
                self.id,
                drag.gesture,
                self.tentative.width,
                self.tentative.height,
                self.tentative.x,
                self.tentative.y
            );
        }
    }

    /// Abort the gesture and put the rectangle back where it was at
    /// pointer-down.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            let restored = drag.base.to_logical(self.tentative.flip());
            self.tentative.set_rect(restored);
            log::debug!("[SESSION] {} gesture cancelled", self.id);
        }
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Confirm the tentative settings. Returns a copy for the caller to
    /// hand to render/export consumers; the session keeps its own.
    pub fn apply(&mut self) -> CropSettings {
        if self.drag.is_some() {
            self.end_drag();
        }
        self.applied = self.tentative.clone();
        log::info!(
            "[SESSION] {} applied crop {:.2}x{:.2} at ({:.2}, {:.2}), flip ({}, {})",
            self.id,
            self.applied.width,
            self.applied.height,
            self.applied.x,
            self.applied.y,
            self.applied.flip_x,
            self.applied.flip_y
        );
        self.applied.clone()
    }

    /// Throw the tentative edits away and return to the applied state.
    pub fn cancel(&mut self) {
        self.drag = None;
        self.tentative = self.applied.clone();
        log::debug!("[SESSION] {} edits cancelled", self.id);
    }
}
