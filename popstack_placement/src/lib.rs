// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=popstack_placement --heading-base-level=0

//! Popstack Placement: anchor frames and placement math for anchored popups.
//!
//! This crate answers one question for the rendering layer: given the rectangle a popup is
//! anchored to and the popup's measured size, where does the popup's top-left corner go?
//!
//! - [`AnchorRegistry`] stores anchor rectangles by string key, last write wins.
//! - [`AnchorSource`] names an anchor: a static rectangle, a provider callback, or a registry key.
//! - [`raw_position`] aligns a popup's [`AnchorPoint`] to the anchor's [`AnchorPoint`]
//!   and applies an offset.
//! - [`avoid_boundaries`] clamps a frame into its container on the [`ConstrainedEdges`] axes.
//! - [`Placement`] bundles the per-popup settings of both steps.
//!
//! ## Not a layout engine
//!
//! Nothing here measures content or arranges views. Sizes come from the caller,
//! and the result is a point in the container's coordinate space.
//! All functions are total: degenerate input yields a deterministic position.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Insets, Point, Rect, Size, Vec2};
//! use popstack_placement::{AnchorRegistry, AnchorSource, Placement};
//!
//! let mut anchors = AnchorRegistry::new();
//! anchors.set_frame("share-button", Rect::from_origin_size((100.0, 200.0), (50.0, 20.0)));
//!
//! let source = AnchorSource::key("share-button");
//! let placement = Placement { offset: Vec2::new(0.0, 8.0), ..Placement::default() };
//!
//! let p = placement.position(
//!     source.resolve(&anchors),
//!     Size::new(120.0, 40.0),
//!     Size::new(200.0, 300.0),
//!     Insets::ZERO,
//! );
//! // Bottom-center of the button, nudged down, then kept 16pt inside the right edge.
//! assert_eq!(p, Point::new(64.0, 228.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchor;
mod place;
mod types;

pub use anchor::{AnchorRegistry, AnchorSource};
pub use place::{Placement, avoid_boundaries, raw_position};
pub use types::{AnchorPoint, BoundaryConstraints, ConstrainedEdges};
