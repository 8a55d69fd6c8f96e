// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement math: align a popup to an anchor, then keep it inside its container.
//!
//! Both steps are pure and total. Degenerate inputs (a zero anchor, an unknown
//! container size, a popup larger than the container) produce a deterministic
//! position instead of an error.

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::types::{AnchorPoint, BoundaryConstraints, ConstrainedEdges};

/// Align the popup's `popup_anchor` point to the anchor's `origin_anchor` point,
/// then nudge by `offset`.
///
/// Returns the popup's top-left corner.
///
/// ```
/// use kurbo::{Point, Rect, Size, Vec2};
/// use popstack_placement::{AnchorPoint, raw_position};
///
/// let anchor = Rect::from_origin_size((100.0, 200.0), (50.0, 20.0));
/// let p = raw_position(
///     anchor,
///     AnchorPoint::Bottom,
///     AnchorPoint::Top,
///     Vec2::new(0.0, 8.0),
///     Size::new(120.0, 40.0),
/// );
/// assert_eq!(p, Point::new(65.0, 228.0));
/// ```
pub fn raw_position(
    anchor: Rect,
    origin_anchor: AnchorPoint,
    popup_anchor: AnchorPoint,
    offset: Vec2,
    popup_size: Size,
) -> Point {
    origin_anchor.point_in(anchor) - popup_anchor.offset_in(popup_size) + offset
}

/// Shift `frame` so it stays inside `container` on every constrained axis.
///
/// The permitted range on an axis is `[inset + padding, extent - opposite_inset - padding]`.
/// A leading edge below the minimum is first moved onto the minimum. Then a
/// trailing edge beyond the maximum is moved onto the maximum, so a frame
/// wider than the range ends up flush with the maximum. Axes are handled
/// independently and the size never changes.
///
/// If `constraints.edges` is empty, or either container dimension is not positive
/// (not measured yet), `frame` is returned unchanged.
pub fn avoid_boundaries(frame: Rect, container: Size, constraints: &BoundaryConstraints) -> Rect {
    if constraints.edges.is_empty() || container.width <= 0.0 || container.height <= 0.0 {
        return frame;
    }
    let pad = constraints.edge_padding;
    let inset = constraints.safe_area;
    let mut origin = frame.origin();
    let size = frame.size();

    if constraints.edges.contains(ConstrainedEdges::HORIZONTAL) {
        origin.x = clamp_axis(
            origin.x,
            size.width,
            inset.x0 + pad,
            container.width - inset.x1 - pad,
        );
    }
    if constraints.edges.contains(ConstrainedEdges::VERTICAL) {
        origin.y = clamp_axis(
            origin.y,
            size.height,
            inset.y0 + pad,
            container.height - inset.y1 - pad,
        );
    }
    Rect::from_origin_size(origin, size)
}

fn clamp_axis(start: f64, len: f64, min: f64, max: f64) -> f64 {
    let start = start.max(min);
    if start + len > max { max - len } else { start }
}

/// Anchored placement settings for one popup.
///
/// This bundles the inputs of [`raw_position`] and [`avoid_boundaries`] that do
/// not change from frame to frame. The anchor rectangle, the measured popup size,
/// and the container size are supplied per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Point on the anchor rectangle the popup attaches to.
    pub origin_anchor: AnchorPoint,
    /// Point on the popup that is aligned to `origin_anchor`.
    pub popup_anchor: AnchorPoint,
    /// Extra translation applied after alignment.
    pub offset: Vec2,
    /// Constrained axes and padding. The safe area here is the default;
    /// [`Placement::position`] takes the current one.
    pub constraints: BoundaryConstraints,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin_anchor: AnchorPoint::Bottom,
            popup_anchor: AnchorPoint::Top,
            offset: Vec2::ZERO,
            constraints: BoundaryConstraints::default(),
        }
    }
}

impl Placement {
    /// Popup top-left for the given anchor, popup size, container size, and safe area.
    pub fn position(
        &self,
        anchor: Rect,
        popup_size: Size,
        container: Size,
        safe_area: Insets,
    ) -> Point {
        let origin = raw_position(
            anchor,
            self.origin_anchor,
            self.popup_anchor,
            self.offset,
            popup_size,
        );
        let constraints = BoundaryConstraints {
            safe_area,
            ..self.constraints
        };
        avoid_boundaries(
            Rect::from_origin_size(origin, popup_size),
            container,
            &constraints,
        )
        .origin()
    }
}
