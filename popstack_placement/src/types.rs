// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: symbolic anchor points, constrained edges, and boundary settings.

use kurbo::{Insets, Point, Rect, Size, Vec2};

/// One of the nine symbolic points on a rectangle.
///
/// Used twice per placement: once on the anchor rectangle (the *origin* anchor)
/// and once on the popup's own bounds (the *popup* anchor). The popup is placed
/// so that its popup-anchor point coincides with the anchor's origin-anchor point.
///
/// Coordinates follow Kurbo's convention: `y` grows downward, so `Top` is at
/// `min_y` and `Bottom` at `max_y`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AnchorPoint {
    /// `(min_x, min_y)`.
    TopLeft,
    /// `(mid_x, min_y)`.
    Top,
    /// `(max_x, min_y)`.
    TopRight,
    /// `(min_x, mid_y)`.
    Left,
    /// `(mid_x, mid_y)`.
    #[default]
    Center,
    /// `(max_x, mid_y)`.
    Right,
    /// `(min_x, max_y)`.
    BottomLeft,
    /// `(mid_x, max_y)`.
    Bottom,
    /// `(max_x, max_y)`.
    BottomRight,
}

impl AnchorPoint {
    /// All nine points, row by row from the top-left.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Unit fractions `(fx, fy)` of this point across a rectangle, each in `{0, 0.5, 1}`.
    pub const fn unit(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// The point on `rect` named by this anchor.
    ///
    /// ```
    /// use kurbo::{Point, Rect};
    /// use popstack_placement::AnchorPoint;
    ///
    /// let r = Rect::new(100.0, 200.0, 150.0, 220.0);
    /// assert_eq!(AnchorPoint::Bottom.point_in(r), Point::new(125.0, 220.0));
    /// assert_eq!(AnchorPoint::TopRight.point_in(r), Point::new(150.0, 200.0));
    /// ```
    pub fn point_in(self, rect: Rect) -> Point {
        let (fx, fy) = self.unit();
        Point::new(
            rect.x0 + (rect.x1 - rect.x0) * fx,
            rect.y0 + (rect.y1 - rect.y0) * fy,
        )
    }

    /// The offset of this anchor inside a `size`-sized box whose origin is `(0, 0)`.
    pub fn offset_in(self, size: Size) -> Vec2 {
        let (fx, fy) = self.unit();
        Vec2::new(size.width * fx, size.height * fy)
    }
}

bitflags::bitflags! {
    /// Axes on which a placed popup is kept inside its container.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ConstrainedEdges: u8 {
        /// Keep the popup between the leading and trailing edges.
        const HORIZONTAL = 0b0000_0001;
        /// Keep the popup between the top and bottom edges.
        const VERTICAL   = 0b0000_0010;
    }
}

impl Default for ConstrainedEdges {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

/// Settings for [`avoid_boundaries`](crate::avoid_boundaries).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConstraints {
    /// Axes that are clamped. Empty disables boundary avoidance.
    pub edges: ConstrainedEdges,
    /// Extra distance kept from each constrained container edge, on top of the safe area.
    pub edge_padding: f64,
    /// Safe-area insets of the container (`x0` leading, `y0` top, `x1` trailing, `y1` bottom).
    pub safe_area: Insets,
}

impl Default for BoundaryConstraints {
    fn default() -> Self {
        Self {
            edges: ConstrainedEdges::default(),
            edge_padding: 16.0,
            safe_area: Insets::ZERO,
        }
    }
}
