//! Crop/transform coordinate engine and project state for the Clipnote
//! subtitle studio.
//!
//! The studio frontend drives everything through [`framing::EditSession`]
//! and persists confirmed state with [`project::Project`]. Wire types
//! export TypeScript definitions via ts-rs, so this crate is the single
//! source of truth for the crop model on both sides of the IPC boundary.
//!
//! ## Components
//! - `framing`: Coordinate spaces, resize solver, sessions, placement
//! - `project`: Project files binding a source video to its edit state
//! - `config`: Persisted UI preferences
//! - `error`: Crate-wide error type and context helpers

pub mod config;
pub mod error;
pub mod framing;
pub mod project;

pub use error::{ClipnoteError, ClipnoteResult};
pub use framing::{
    pixel_rect, place, plan, AspectPreset, BackdropPlan, CanvasBgMode, Coord, CropSettings,
    DisplaySpace, EditSession, FlipState, LogicalSpace, PixelRect, PlacementSpec, Rect,
    ResizeHandle, Size, SourceDims,
};
pub use project::{Project, SourceMeta};
