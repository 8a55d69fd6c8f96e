// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor frames: a keyed registry and the three ways a popup names its anchor.
//!
//! ## Registry
//!
//! [`AnchorRegistry`] maps string keys to rectangles in the container's coordinate space.
//! The rendering layer writes into it on every layout pass of a tracked view
//! and removes the key when that view goes away. Writes always win; no history is kept.
//! Looking up a key that is not present yields [`Rect::ZERO`].
//!
//! ## Sources
//!
//! [`AnchorSource`] is resolved to a concrete rectangle each time a position is
//! computed. Nothing is cached between calls, so providers and registry keys
//! may change from frame to frame.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Rect;

/// Keyed anchor rectangles, last write wins.
///
/// ```
/// use kurbo::Rect;
/// use popstack_placement::AnchorRegistry;
///
/// let mut anchors = AnchorRegistry::new();
/// assert_eq!(anchors.frame("menu"), Rect::ZERO);
///
/// anchors.set_frame("menu", Rect::new(10.0, 10.0, 60.0, 30.0));
/// assert_eq!(anchors.frame("menu"), Rect::new(10.0, 10.0, 60.0, 30.0));
///
/// anchors.remove_frame("menu");
/// assert_eq!(anchors.frame("menu"), Rect::ZERO);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    frames: HashMap<String, Rect>,
}

impl AnchorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            frames: HashMap::new(),
        }
    }

    /// Insert or overwrite the frame for `key`.
    pub fn set_frame(&mut self, key: impl Into<String>, frame: Rect) {
        let key = key.into();
        if let Some(slot) = self.frames.get_mut(key.as_str()) {
            *slot = frame;
        } else {
            self.frames.insert(key, frame);
        }
    }

    /// Frame stored for `key`, or [`Rect::ZERO`] if none.
    pub fn frame(&self, key: &str) -> Rect {
        match self.frames.get(key) {
            Some(frame) => *frame,
            None => {
                log::trace!("anchor `{key}` is not registered; resolving to a zero rect");
                Rect::ZERO
            }
        }
    }

    /// Remove the frame for `key`. Removing an absent key is a no-op.
    pub fn remove_frame(&mut self, key: &str) {
        self.frames.remove(key);
    }

    /// Returns true if a frame is stored for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.frames.contains_key(key)
    }

    /// Number of stored frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames are stored.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Where an anchored popup reads its anchor rectangle from.
#[derive(Clone)]
pub enum AnchorSource {
    /// A fixed rectangle captured when the popup was presented.
    Static(Rect),
    /// A callback polled on every position computation.
    Provider(Rc<dyn Fn() -> Rect>),
    /// A key into an [`AnchorRegistry`].
    Key(String),
}

impl AnchorSource {
    /// Wrap a closure as a [`AnchorSource::Provider`].
    pub fn provider(f: impl Fn() -> Rect + 'static) -> Self {
        Self::Provider(Rc::new(f))
    }

    /// Build a [`AnchorSource::Key`].
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Resolve to a rectangle right now.
    ///
    /// Unregistered keys resolve to [`Rect::ZERO`].
    pub fn resolve(&self, anchors: &AnchorRegistry) -> Rect {
        match self {
            Self::Static(rect) => *rect,
            Self::Provider(f) => f(),
            Self::Key(key) => anchors.frame(key),
        }
    }
}

impl Default for AnchorSource {
    fn default() -> Self {
        Self::Static(Rect::ZERO)
    }
}

impl fmt::Debug for AnchorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(rect) => f.debug_tuple("Static").field(rect).finish(),
            Self::Provider(_) => f.debug_tuple("Provider").finish_non_exhaustive(),
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
        }
    }
}

impl From<Rect> for AnchorSource {
    fn from(rect: Rect) -> Self {
        Self::Static(rect)
    }
}
