// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for stacks and popups.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

/// Name of one independently addressable popup stack, typically one per window.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackId(Cow<'static, str>);

impl StackId {
    /// The default stack used when callers do not name one.
    pub const SHARED: Self = Self(Cow::Borrowed("shared"));

    /// Create a stack id from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a stack id from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StackId {
    fn default() -> Self {
        Self::SHARED
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for StackId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Identity of one presented popup.
///
/// A `PopupId` has two parts:
///
/// - The *identity key*: the popup's type tag, or its custom id when one was set.
///   Two popups with the same identity key are "the same kind of popup"; a stack
///   holds at most one of each.
/// - The *instance* number, unique per presentation. It tells two presentations
///   of the same kind apart, for example when a dismissed popup is shown again.
///
/// Equality compares both parts. Use [`PopupId::same_identity`] to compare keys only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PopupId {
    key: Cow<'static, str>,
    type_tag: &'static str,
    instance: u64,
}

impl PopupId {
    pub(crate) fn new(type_tag: &'static str, custom_id: Option<String>, instance: u64) -> Self {
        let key = match custom_id {
            Some(id) => Cow::Owned(id),
            None => Cow::Borrowed(type_tag),
        };
        Self {
            key,
            type_tag,
            instance,
        }
    }

    /// The identity key: the custom id if set, otherwise the type tag.
    pub fn identity(&self) -> &str {
        &self.key
    }

    /// The popup's content type tag, regardless of any custom id.
    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    /// Returns true if a custom id replaced the type tag as identity key.
    pub fn has_custom_id(&self) -> bool {
        matches!(self.key, Cow::Owned(_))
    }

    /// Per-presentation instance number.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Returns true if both ids share an identity key.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.key == other.key
    }

    /// Returns true if this id's identity key equals `key`.
    pub fn has_identity(&self, key: &str) -> bool {
        self.key == key
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.instance)
    }
}
