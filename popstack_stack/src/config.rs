// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup kinds and configuration resolution.
//!
//! Every popup is configured by one [`PopupConfig`] value. The kind
//! discriminant selects which defaults apply and whether the anchored-only
//! fields are consulted at all. Resolution runs once, when the popup is
//! inserted, and the resulting snapshot never changes afterwards:
//!
//! 1. Start from the kind's defaults in [`GlobalConfig`].
//! 2. Apply every field that is set in the popup's [`ConfigOverrides`].

use core::time::Duration;

use kurbo::{Insets, Vec2};
use peniko::Color;
use popstack_placement::{
    AnchorPoint, AnchorSource, BoundaryConstraints, ConstrainedEdges, Placement,
};

/// Placement family of a popup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PopupKind {
    /// Slides in from the top edge. One active at a time.
    Top,
    /// Centered in the container. One active at a time.
    Center,
    /// Slides in from the bottom edge. One active at a time.
    Bottom,
    /// Positioned relative to an anchor rectangle. Several may coexist.
    Anchored,
}

impl PopupKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Center, Self::Bottom, Self::Anchored];

    /// Returns true for kinds attached to a vertical screen edge.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Position of this kind in [`PopupKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Center => 1,
            Self::Bottom => 2,
            Self::Anchored => 3,
        }
    }
}

/// What a tap on the dimmed area outside the frontmost popup does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TapOutsideBehavior {
    /// Swallow the tap.
    #[default]
    Block,
    /// Dismiss the frontmost popup.
    Dismiss,
    /// Let the tap reach the content underneath.
    PassThrough,
}

bitflags::bitflags! {
    /// Safe-area edges a popup lays out into instead of respecting.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SafeAreaEdges: u8 {
        /// Top inset.
        const TOP      = 0b0000_0001;
        /// Bottom inset.
        const BOTTOM   = 0b0000_0010;
        /// Leading inset.
        const LEADING  = 0b0000_0100;
        /// Trailing inset.
        const TRAILING = 0b0000_1000;
    }
}

/// Resolved, immutable configuration of one popup.
#[derive(Clone, Debug)]
pub struct PopupConfig {
    /// Placement family. Selects the defaults and which fields below apply.
    pub kind: PopupKind,
    /// Space between the popup and the container edges.
    pub padding: Insets,
    /// Corner radius of the popup background.
    pub corner_radius: f64,
    /// Popup background fill.
    pub background: Color,
    /// Dimming overlay drawn below the stack while this popup is frontmost.
    pub overlay: Color,
    /// Safe-area edges that are ignored for this popup.
    pub ignored_safe_area: SafeAreaEdges,
    /// Tap-outside policy while this popup is frontmost.
    pub tap_outside: TapOutsideBehavior,
    /// Whether the renderer should track drag gestures on this popup.
    pub drag_gesture_enabled: bool,
    /// Anchored only: attachment point on the anchor rectangle.
    pub origin_anchor: AnchorPoint,
    /// Anchored only: point on the popup aligned to `origin_anchor`.
    pub popup_anchor: AnchorPoint,
    /// Anchored only: translation applied after alignment.
    pub offset: Vec2,
    /// Anchored only: distance kept from constrained container edges.
    pub edge_padding: f64,
    /// Anchored only: axes kept inside the container.
    pub constrained_edges: ConstrainedEdges,
    /// Anchored only: where the anchor rectangle comes from.
    pub anchor: AnchorSource,
}

impl PopupConfig {
    /// Built-in defaults for `kind`.
    pub fn default_for(kind: PopupKind) -> Self {
        let constraints = BoundaryConstraints::default();
        let corner_radius = match kind {
            PopupKind::Top | PopupKind::Bottom => 40.0,
            PopupKind::Center => 24.0,
            PopupKind::Anchored => 12.0,
        };
        let padding = match kind {
            PopupKind::Top | PopupKind::Bottom => Insets::ZERO,
            PopupKind::Center => Insets::uniform_xy(16.0, 0.0),
            PopupKind::Anchored => Insets::ZERO,
        };
        Self {
            kind,
            padding,
            corner_radius,
            background: Color::from_rgba8(255, 255, 255, 255),
            overlay: Color::from_rgba8(0, 0, 0, 112),
            ignored_safe_area: SafeAreaEdges::empty(),
            tap_outside: if kind == PopupKind::Anchored {
                TapOutsideBehavior::Dismiss
            } else {
                TapOutsideBehavior::Block
            },
            drag_gesture_enabled: kind.is_vertical(),
            origin_anchor: AnchorPoint::Bottom,
            popup_anchor: AnchorPoint::Top,
            offset: Vec2::ZERO,
            edge_padding: constraints.edge_padding,
            constrained_edges: constraints.edges,
            anchor: AnchorSource::default(),
        }
    }

    /// Merge the defaults for `kind` from `global` with `overrides`.
    ///
    /// An anchor source on a non-anchored popup is logged and dropped.
    pub fn resolve(kind: PopupKind, global: &GlobalConfig, overrides: &ConfigOverrides) -> Self {
        let mut config = global.defaults(kind).clone();
        config.kind = kind;
        let o = overrides;
        if let Some(v) = o.padding {
            config.padding = v;
        }
        if let Some(v) = o.corner_radius {
            config.corner_radius = v;
        }
        if let Some(v) = o.background {
            config.background = v;
        }
        if let Some(v) = o.overlay {
            config.overlay = v;
        }
        if let Some(v) = o.ignored_safe_area {
            config.ignored_safe_area = v;
        }
        if let Some(v) = o.tap_outside {
            config.tap_outside = v;
        }
        if let Some(v) = o.drag_gesture_enabled {
            config.drag_gesture_enabled = v;
        }
        if let Some(v) = o.origin_anchor {
            config.origin_anchor = v;
        }
        if let Some(v) = o.popup_anchor {
            config.popup_anchor = v;
        }
        if let Some(v) = o.offset {
            config.offset = v;
        }
        if let Some(v) = o.edge_padding {
            config.edge_padding = v;
        }
        if let Some(v) = o.constrained_edges {
            config.constrained_edges = v;
        }
        match (&o.anchor, kind) {
            (Some(anchor), PopupKind::Anchored) => config.anchor = anchor.clone(),
            (Some(_), _) => {
                log::warn!("anchor source given for a {kind:?} popup; only anchored popups use it");
            }
            (None, _) => {}
        }
        config
    }

    /// Applies `ignored_safe_area` to the container's safe-area insets.
    ///
    /// ```
    /// use kurbo::Insets;
    /// use popstack_stack::{PopupConfig, PopupKind, SafeAreaEdges};
    ///
    /// let mut config = PopupConfig::default_for(PopupKind::Bottom);
    /// config.ignored_safe_area = SafeAreaEdges::BOTTOM;
    /// let insets = Insets::new(0.0, 47.0, 0.0, 34.0);
    /// assert_eq!(config.effective_safe_area(insets), Insets::new(0.0, 47.0, 0.0, 0.0));
    /// ```
    pub fn effective_safe_area(&self, insets: Insets) -> Insets {
        let ignored = self.ignored_safe_area;
        let pick = |edge, v| if ignored.contains(edge) { 0.0 } else { v };
        Insets {
            x0: pick(SafeAreaEdges::LEADING, insets.x0),
            y0: pick(SafeAreaEdges::TOP, insets.y0),
            x1: pick(SafeAreaEdges::TRAILING, insets.x1),
            y1: pick(SafeAreaEdges::BOTTOM, insets.y1),
        }
    }

    /// Placement settings derived from the anchored fields.
    pub fn placement(&self) -> Placement {
        Placement {
            origin_anchor: self.origin_anchor,
            popup_anchor: self.popup_anchor,
            offset: self.offset,
            constraints: BoundaryConstraints {
                edges: self.constrained_edges,
                edge_padding: self.edge_padding,
                safe_area: Insets::ZERO,
            },
        }
    }
}

/// Per-instance overrides. Unset fields fall back to the kind's defaults.
///
/// ```
/// use kurbo::Vec2;
/// use popstack_stack::{ConfigOverrides, GlobalConfig, PopupConfig, PopupKind, TapOutsideBehavior};
///
/// let overrides = ConfigOverrides::default()
///     .offset(Vec2::new(0.0, 8.0))
///     .tap_outside(TapOutsideBehavior::Block);
/// let config = PopupConfig::resolve(PopupKind::Anchored, &GlobalConfig::default(), &overrides);
/// assert_eq!(config.offset, Vec2::new(0.0, 8.0));
/// assert_eq!(config.tap_outside, TapOutsideBehavior::Block);
/// assert_eq!(config.edge_padding, 16.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    padding: Option<Insets>,
    corner_radius: Option<f64>,
    background: Option<Color>,
    overlay: Option<Color>,
    ignored_safe_area: Option<SafeAreaEdges>,
    tap_outside: Option<TapOutsideBehavior>,
    drag_gesture_enabled: Option<bool>,
    origin_anchor: Option<AnchorPoint>,
    popup_anchor: Option<AnchorPoint>,
    offset: Option<Vec2>,
    edge_padding: Option<f64>,
    constrained_edges: Option<ConstrainedEdges>,
    anchor: Option<AnchorSource>,
}

macro_rules! override_setters {
    ($($(#[$meta:meta])* $name:ident: $ty:ty;)*) => {
        impl ConfigOverrides {
            $(
                $(#[$meta])*
                #[must_use]
                pub fn $name(mut self, value: $ty) -> Self {
                    self.$name = Some(value);
                    self
                }
            )*
        }
    };
}

override_setters! {
    /// Override [`PopupConfig::padding`].
    padding: Insets;
    /// Override [`PopupConfig::corner_radius`].
    corner_radius: f64;
    /// Override [`PopupConfig::background`].
    background: Color;
    /// Override [`PopupConfig::overlay`].
    overlay: Color;
    /// Override [`PopupConfig::ignored_safe_area`].
    ignored_safe_area: SafeAreaEdges;
    /// Override [`PopupConfig::tap_outside`].
    tap_outside: TapOutsideBehavior;
    /// Override [`PopupConfig::drag_gesture_enabled`].
    drag_gesture_enabled: bool;
    /// Override [`PopupConfig::origin_anchor`].
    origin_anchor: AnchorPoint;
    /// Override [`PopupConfig::popup_anchor`].
    popup_anchor: AnchorPoint;
    /// Override [`PopupConfig::offset`].
    offset: Vec2;
    /// Override [`PopupConfig::edge_padding`].
    edge_padding: f64;
    /// Override [`PopupConfig::constrained_edges`].
    constrained_edges: ConstrainedEdges;
    /// Override [`PopupConfig::anchor`]. Ignored unless the popup is anchored.
    anchor: AnchorSource;
}

/// Process-wide defaults, shared by every stack.
#[derive(Clone, Debug)]
pub struct GlobalConfig {
    /// Defaults for [`PopupKind::Top`].
    pub top: PopupConfig,
    /// Defaults for [`PopupKind::Center`].
    pub center: PopupConfig,
    /// Defaults for [`PopupKind::Bottom`].
    pub bottom: PopupConfig,
    /// Defaults for [`PopupKind::Anchored`].
    pub anchored: PopupConfig,
    /// How long a shrinking stack holds back its new priority record.
    /// Matches the exit transition length.
    pub exit_delay: Duration,
}

impl GlobalConfig {
    /// Default exit transition length.
    pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(280);

    /// Defaults for `kind`.
    pub fn defaults(&self, kind: PopupKind) -> &PopupConfig {
        match kind {
            PopupKind::Top => &self.top,
            PopupKind::Center => &self.center,
            PopupKind::Bottom => &self.bottom,
            PopupKind::Anchored => &self.anchored,
        }
    }

    /// Mutable defaults for `kind`.
    pub fn defaults_mut(&mut self, kind: PopupKind) -> &mut PopupConfig {
        match kind {
            PopupKind::Top => &mut self.top,
            PopupKind::Center => &mut self.center,
            PopupKind::Bottom => &mut self.bottom,
            PopupKind::Anchored => &mut self.anchored,
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            top: PopupConfig::default_for(PopupKind::Top),
            center: PopupConfig::default_for(PopupKind::Center),
            bottom: PopupConfig::default_for(PopupKind::Bottom),
            anchored: PopupConfig::default_for(PopupKind::Anchored),
            exit_delay: Self::DEFAULT_EXIT_DELAY,
        }
    }
}
