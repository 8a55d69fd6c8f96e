// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural operations on a stack's entry list.

use alloc::string::String;
use alloc::vec::Vec;

use crate::entry::PopupEntry;
use crate::id::PopupId;

/// One structural change, applied in submission order by [`Stack`](crate::Stack).
#[derive(Clone, Debug)]
pub enum StackOperation<P> {
    /// Append an entry. Ignored if an entry with the same identity key is present.
    Insert(PopupEntry<P>),
    /// Remove the frontmost entry.
    RemoveLast,
    /// Remove exactly this presented instance.
    Remove(PopupId),
    /// Remove every entry whose identity key equals the type tag.
    RemoveAllOfType(String),
    /// Remove every entry whose identity key equals the custom id.
    RemoveAllWithId(String),
    /// Remove every entry.
    RemoveAll,
    /// Keep only entries whose identity key is in the set, preserving order.
    RemoveAllExcluding(Vec<String>),
}

impl<P> StackOperation<P> {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::RemoveLast => "remove_last",
            Self::Remove(_) => "remove",
            Self::RemoveAllOfType(_) => "remove_all_of_type",
            Self::RemoveAllWithId(_) => "remove_all_with_id",
            Self::RemoveAll => "remove_all",
            Self::RemoveAllExcluding(_) => "remove_all_excluding",
        }
    }

    /// Split `entries` into the list after this operation and the removed entries.
    ///
    /// Returns `None` when an insert is rejected as a duplicate; the list is
    /// then left as it was.
    pub(crate) fn apply(self, entries: &mut Vec<PopupEntry<P>>) -> Option<Vec<PopupEntry<P>>> {
        let removed = match self {
            Self::Insert(entry) => {
                if entries.iter().any(|e| e.id().same_identity(entry.id())) {
                    return None;
                }
                entries.push(entry);
                Vec::new()
            }
            Self::RemoveLast => entries.pop().into_iter().collect(),
            Self::Remove(id) => extract(entries, |e| *e.id() == id),
            Self::RemoveAllOfType(key) | Self::RemoveAllWithId(key) => {
                extract(entries, |e| e.id().has_identity(&key))
            }
            Self::RemoveAll => core::mem::take(entries),
            Self::RemoveAllExcluding(keep) => {
                extract(entries, |e| !keep.iter().any(|k| e.id().has_identity(k)))
            }
        };
        Some(removed)
    }
}

fn extract<P>(
    entries: &mut Vec<PopupEntry<P>>,
    mut remove: impl FnMut(&PopupEntry<P>) -> bool,
) -> Vec<PopupEntry<P>> {
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries.drain(..) {
        if remove(&entry) {
            removed.push(entry);
        } else {
            kept.push(entry);
        }
    }
    *entries = kept;
    removed
}
