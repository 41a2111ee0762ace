//! Type-safe percent coordinate spaces for the framing pipeline.
//!
//! Two spaces exist:
//!
//! ```text
//! LogicalSpace (source video) <-> DisplaySpace (on screen, after mirroring)
//! ```
//!
//! All values are percentages of the source video's dimensions, so they are
//! independent of on-screen scaling. Interactive gestures run in display
//! space (what the pointer actually touches); persisted crop settings are
//! always logical, so downstream consumers never have to reason about flips
//! separately. The phantom type parameter prevents mixing coordinates from
//! the two spaces at compile time.

use std::ops::{Add, Sub};

/// The full extent of a normalized axis, in percent.
pub const FULL_SPAN_PCT: f64 = 100.0;

/// Coordinates relative to the untransformed source video.
/// `(0, 0)` is the top-left of the source frame; flips never affect these.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogicalSpace;

/// Coordinates as perceived on screen, after flip mirroring.
/// `(0, 0)` is the top-left of what the user sees.
#[derive(Default, Clone, Copy, Debug)]
pub struct DisplaySpace;

/// Active mirroring, the parameter of every space conversion.
///
/// Not a wire type: the flags travel flat inside the crop settings and are
/// bundled here only for passing through the conversion routines.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipState {
    pub x: bool,
    pub y: bool,
}

impl FlipState {
    pub fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        !self.x && !self.y
    }
}

/// A 2D percent coordinate with an associated coordinate space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: std::marker::PhantomData<TSpace>,
}

impl<TSpace: Default> Coord<TSpace> {
    /// Create a new coordinate in the specified space.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: std::marker::PhantomData,
        }
    }
}

// Arithmetic operations that preserve the coordinate space

impl<T: Default> Add for Coord<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Default> Sub for Coord<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size in a specific coordinate space, in percent of the source video.
#[derive(Clone, Copy, Debug, Default)]
pub struct Size<TSpace> {
    pub width: f64,
    pub height: f64,
    _space: std::marker::PhantomData<TSpace>,
}

impl<TSpace: Default> Size<TSpace> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            _space: std::marker::PhantomData,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// A rectangular region in a specific coordinate space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rect<TSpace> {
    pub origin: Coord<TSpace>,
    pub size: Size<TSpace>,
    _space: std::marker::PhantomData<TSpace>,
}

impl<TSpace: Default + Copy> Rect<TSpace> {
    pub fn new(origin: Coord<TSpace>, size: Size<TSpace>) -> Self {
        Self {
            origin,
            size,
            _space: std::marker::PhantomData,
        }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Coord::new(x, y), Size::new(width, height))
    }

    /// Build a rect from its four edges. Callers are responsible for
    /// passing edges in the right order; a crossed drag is normalized by
    /// the handle engine before it gets here.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_coords(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Coord<TSpace> {
        Coord::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Coord<TSpace>) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Translate the rect by a delta in the same space.
    pub fn translated(&self, delta: Coord<TSpace>) -> Self {
        Self::new(self.origin + delta, self.size)
    }
}

// ============================================================================
// Space Conversions
// ============================================================================

/// Mirror a span's origin within the full 0-100 extent.
///
/// This is the single flip rule of the whole engine: a span starting at
/// `origin` with length `len` starts at `100 - origin - len` when the axis
/// is mirrored. Applying it twice returns the input, which is what makes
/// the logical <-> display conversions exact inverses of each other.
pub fn mirrored_origin(origin: f64, len: f64) -> f64 {
    FULL_SPAN_PCT - origin - len
}

fn mirror_rect_coords(x: f64, y: f64, w: f64, h: f64, flip: FlipState) -> (f64, f64) {
    let mx = if flip.x { mirrored_origin(x, w) } else { x };
    let my = if flip.y { mirrored_origin(y, h) } else { y };
    (mx, my)
}

impl Rect<LogicalSpace> {
    /// Convert to display space under the given flip state.
    ///
    /// With both flags false this is the identity mapping.
    pub fn to_display(&self, flip: FlipState) -> Rect<DisplaySpace> {
        let (x, y) = mirror_rect_coords(
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
            flip,
        );
        Rect::from_coords(x, y, self.size.width, self.size.height)
    }
}

impl Rect<DisplaySpace> {
    /// Convert back to logical space under the given flip state.
    ///
    /// Exact inverse of [`Rect::<LogicalSpace>::to_display`] for the same
    /// flip state, because mirroring is an involution.
    pub fn to_logical(&self, flip: FlipState) -> Rect<LogicalSpace> {
        let (x, y) = mirror_rect_coords(
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
            flip,
        );
        Rect::from_coords(x, y, self.size.width, self.size.height)
    }
}
