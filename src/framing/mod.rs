//! Crop/transform coordinate engine for the video editor.
//!
//! Everything here works in percent of the source frame, so no module needs
//! pixel dimensions until export time. The flip flags live alongside the
//! crop rectangle but never change it; mirroring happens in the conversion
//! between logical and display space.
//!
//! ## Components
//! - `space`: Typed logical/display coordinate spaces and flip conversions
//! - `types`: Wire types (CropSettings, presets, source metadata)
//! - `handles`: The eight-handle resize solver with aspect locking
//! - `session`: Per-video editing session and gesture state
//! - `placement`: Preview/export placement and pixel crop computation
//! - `background`: Canvas background planning for padded output

pub mod background;
pub mod handles;
pub mod placement;
pub mod session;
pub mod space;
pub mod types;

pub use background::{hex_to_linear_rgba, plan, srgb_to_linear, BackdropPlan};
pub use handles::{resize, ResizeHandle};
pub use placement::{pixel_rect, place, PixelRect, PlacementSpec};
pub use session::EditSession;
pub use space::{Coord, DisplaySpace, FlipState, LogicalSpace, Rect, Size, FULL_SPAN_PCT};
pub use types::{AspectPreset, CanvasBgMode, CropSettings, SourceDims, MIN_CROP_PCT};
