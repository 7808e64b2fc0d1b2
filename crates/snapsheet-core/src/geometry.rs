#![forbid(unsafe_code)]

//! Viewport geometry and snap-target resolution.
//!
//! Offsets are screen-space pixels measured downward from the top edge, so
//! the fully expanded target is the *smallest* offset and the collapsed
//! target the largest.
//!
//! # Invariants
//!
//! 1. [`SnapTargets`] always holds 2 or 3 finite, non-decreasing offsets.
//!    Index 0 is fully expanded, the last index fully collapsed.
//! 2. [`compute_targets`] never fails: a viewport too short for the layout
//!    collapses to zero travel instead of inverting the order.
//! 3. [`SnapTargets::progress_at`] is always in `[0, 1]` and equals 1 when
//!    there is no travel.

use crate::error::{Result, SheetError};

/// Smallest supported target list (two-point sheet).
pub const MIN_TARGETS: usize = 2;

/// Largest supported target list (three-point sheet).
pub const MAX_TARGETS: usize = 3;

/// Screen orientation, used to pick the collapsed peek height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orientation implied by a viewport extent. Square viewports are portrait.
    #[must_use]
    pub fn from_extent(width: f64, height: f64) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Safe-area insets in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Insets with only top and bottom set (the common notch + home bar case).
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }

    /// Copy with negative or non-finite sides replaced by zero.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self::new(
            non_negative(self.top),
            non_negative(self.right),
            non_negative(self.bottom),
            non_negative(self.left),
        )
    }
}

/// The layout collaborator's view of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    pub insets: Insets,
}

impl Viewport {
    /// Viewport with orientation derived from its extent and no insets.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::from_extent(width, height),
            insets: Insets::ZERO,
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Layout constants that turn a viewport into snap targets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetLayout {
    /// Visible peek height while collapsed in portrait.
    pub collapsed_height_portrait: f64,
    /// Visible peek height while collapsed in landscape (smaller).
    pub collapsed_height_landscape: f64,
    /// Bottom edge of the fixed header region, below the top inset.
    pub header_bottom: f64,
    /// Gap between the header and the expanded sheet.
    pub margin: f64,
    /// Half target as a fraction of viewport height. `None` for a two-point sheet.
    pub half_fraction: Option<f64>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::two_point()
    }
}

impl SheetLayout {
    /// Floating title/tab sheet: collapsed and expanded only.
    #[must_use]
    pub const fn two_point() -> Self {
        Self {
            collapsed_height_portrait: 96.0,
            collapsed_height_landscape: 64.0,
            header_bottom: 56.0,
            margin: 8.0,
            half_fraction: None,
        }
    }

    /// Detail-page sheet with a half target at 45% of the viewport height,
    /// above the midpoint so more content shows.
    #[must_use]
    pub const fn three_point() -> Self {
        Self {
            half_fraction: Some(0.45),
            ..Self::two_point()
        }
    }

    /// Collapsed peek height for an orientation.
    #[inline]
    #[must_use]
    pub fn collapsed_height(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Portrait => self.collapsed_height_portrait,
            Orientation::Landscape => self.collapsed_height_landscape,
        }
    }

    /// Number of snap targets this layout produces.
    #[inline]
    #[must_use]
    pub fn target_count(&self) -> usize {
        if self.half_fraction.is_some() {
            MAX_TARGETS
        } else {
            MIN_TARGETS
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("layout.collapsed_height_portrait", self.collapsed_height_portrait),
            ("layout.collapsed_height_landscape", self.collapsed_height_landscape),
            ("layout.header_bottom", self.header_bottom),
            ("layout.margin", self.margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SheetError::invalid(field, "must be finite and non-negative"));
            }
        }
        if let Some(fraction) = self.half_fraction
            && !(fraction > 0.0 && fraction < 1.0)
        {
            return Err(SheetError::invalid("layout.half_fraction", "must be in (0, 1)"));
        }
        Ok(())
    }
}

/// Ordered resting offsets for a sheet.
#[derive(Debug, Clone, Copy)]
pub struct SnapTargets {
    offsets: [f64; MAX_TARGETS],
    len: usize,
}

// Slots past `len` are padding and take no part in equality.
impl PartialEq for SnapTargets {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl SnapTargets {
    /// Validate and build a target list.
    ///
    /// Offsets must be finite and non-decreasing (expanded first). Equal
    /// neighbours are accepted so that zero-travel geometry stays valid.
    pub fn new(offsets: &[f64]) -> Result<Self> {
        let len = offsets.len();
        if !(MIN_TARGETS..=MAX_TARGETS).contains(&len) {
            return Err(SheetError::TargetCount { count: len });
        }
        let mut buf = [0.0; MAX_TARGETS];
        for (index, &offset) in offsets.iter().enumerate() {
            if !offset.is_finite() {
                return Err(SheetError::NonFiniteTarget { index });
            }
            if index > 0 && offset < buf[index - 1] {
                return Err(SheetError::Unordered { index });
            }
            buf[index] = offset;
        }
        Ok(Self { offsets: buf, len })
    }

    /// Build a target list that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `offsets` would be rejected by [`SnapTargets::new`]. A bad
    /// target list is a programming error, not a runtime condition.
    #[track_caller]
    #[must_use]
    pub fn from_offsets(offsets: &[f64]) -> Self {
        match Self::new(offsets) {
            Ok(targets) => targets,
            Err(err) => panic!("invalid snap targets {offsets:?}: {err}"),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.offsets[..self.len]
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.as_slice().get(index).copied()
    }

    /// Fully expanded offset (index 0, the minimum).
    #[inline]
    #[must_use]
    pub fn expanded(&self) -> f64 {
        self.offsets[0]
    }

    /// Fully collapsed offset (last index, the maximum).
    #[inline]
    #[must_use]
    pub fn collapsed(&self) -> f64 {
        self.offsets[self.len - 1]
    }

    #[inline]
    #[must_use]
    pub fn collapsed_index(&self) -> usize {
        self.len - 1
    }

    /// Distance between the expanded and collapsed targets.
    #[inline]
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.collapsed() - self.expanded()
    }

    /// Clamp an offset into `[expanded, collapsed]`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.max(self.expanded()).min(self.collapsed())
    }

    /// Normalized expansion at `offset`: 1 when fully expanded, 0 when
    /// collapsed, clamped. A zero-travel sheet reports 1.
    #[must_use]
    pub fn progress_at(&self, offset: f64) -> f64 {
        let travel = self.travel();
        if travel <= 0.0 || offset.is_nan() {
            return 1.0;
        }
        (1.0 - (offset - self.expanded()) / travel).clamp(0.0, 1.0)
    }
}

/// Resolve snap targets for a viewport.
///
/// - collapsed = `height - collapsed_height(orientation) - insets.bottom`
/// - expanded = `insets.top + header_bottom + margin`
/// - half = `height * half_fraction`, kept between the two
///
/// Short viewports clamp instead of inverting: collapsed never goes above
/// the top edge, and expanded never goes below collapsed.
#[must_use]
pub fn compute_targets(viewport: &Viewport, layout: &SheetLayout) -> SnapTargets {
    let height = non_negative(viewport.height);
    let insets = viewport.insets.sanitized();

    let collapsed = non_negative(
        height - non_negative(layout.collapsed_height(viewport.orientation)) - insets.bottom,
    );
    let expanded = non_negative(insets.top + layout.header_bottom + layout.margin).min(collapsed);

    let mut offsets = [expanded, collapsed, collapsed];
    let len = match layout.half_fraction {
        Some(fraction) => {
            // `max`/`min` rather than `clamp`: a NaN fraction lands on `expanded`.
            offsets[1] = (height * fraction).max(expanded).min(collapsed);
            MAX_TARGETS
        }
        None => MIN_TARGETS,
    };
    SnapTargets { offsets, len }
}

#[inline]
fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
