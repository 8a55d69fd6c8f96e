// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative z-order of a stack's layers.
//!
//! The dimming overlay always holds rank `0`. Every present kind forms one
//! layer above it, and layers are ordered by the position of their most
//! recently presented entry, so the kind that was touched last is frontmost.
//!
//! Inside the anchored layer each entry gets its own rank, increasing with
//! presentation order. Top, center and bottom layers show one active popup at
//! a time, so all their entries share the layer's rank.

use alloc::vec::Vec;

use crate::config::PopupKind;
use crate::entry::PopupEntry;
use crate::id::PopupId;

/// Priority record for one stack, a pure function of its entry list.
///
/// ```
/// use popstack_stack::{GlobalConfig, Popup, PopupEntry, PopupKind, StackPriority};
///
/// let global = GlobalConfig::default();
/// let entries = [
///     PopupEntry::new(Popup::new("Sheet", PopupKind::Bottom, ()), 1, &global),
///     PopupEntry::new(Popup::new("Menu", PopupKind::Anchored, ()), 2, &global),
/// ];
/// let priority = StackPriority::for_entries(&entries);
/// assert_eq!(priority.overlay(), 0);
/// assert_eq!(priority.kind(PopupKind::Bottom), Some(1));
/// assert_eq!(priority.kind(PopupKind::Anchored), Some(2));
/// assert_eq!(priority.kind(PopupKind::Top), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackPriority {
    kinds: [Option<i32>; 4],
    ranks: Vec<(PopupId, i32)>,
}

impl StackPriority {
    const OVERLAY: i32 = 0;

    /// Compute the record for `entries`, in presentation order.
    pub fn for_entries<P>(entries: &[PopupEntry<P>]) -> Self {
        let mut latest: [Option<usize>; 4] = [None; 4];
        for (index, entry) in entries.iter().enumerate() {
            latest[entry.kind().index()] = Some(index);
        }
        let mut order: Vec<PopupKind> = PopupKind::ALL
            .into_iter()
            .filter(|k| latest[k.index()].is_some())
            .collect();
        order.sort_by_key(|k| latest[k.index()]);

        let mut kinds = [None; 4];
        let mut base = [Self::OVERLAY; 4];
        let mut next = Self::OVERLAY + 1;
        for kind in order {
            base[kind.index()] = next;
            if kind == PopupKind::Anchored {
                for _ in entries.iter().filter(|e| e.kind() == kind) {
                    kinds[kind.index()] = Some(next);
                    next += 1;
                }
            } else {
                kinds[kind.index()] = Some(next);
                next += 1;
            }
        }

        let mut anchored_seen = 0;
        let ranks = entries
            .iter()
            .map(|e| {
                let mut rank = base[e.kind().index()];
                if e.kind() == PopupKind::Anchored {
                    rank += anchored_seen;
                    anchored_seen += 1;
                }
                (e.id().clone(), rank)
            })
            .collect();
        Self { kinds, ranks }
    }

    /// Rank of the dimming overlay. Always below every popup.
    pub fn overlay(&self) -> i32 {
        Self::OVERLAY
    }

    /// Rank of `kind`'s layer, or `None` if no entry of that kind is present.
    ///
    /// For the anchored layer this is the rank of its frontmost entry.
    pub fn kind(&self, kind: PopupKind) -> Option<i32> {
        self.kinds[kind.index()]
    }

    /// Rank of one entry, or `None` if it is not in the list this record was computed for.
    pub fn rank(&self, id: &PopupId) -> Option<i32> {
        self.ranks.iter().find(|(i, _)| i == id).map(|(_, r)| *r)
    }

    /// Every entry's rank, in presentation order.
    pub fn ranks(&self) -> impl Iterator<Item = (&PopupId, i32)> + '_ {
        self.ranks.iter().map(|(id, r)| (id, *r))
    }

    /// Returns true if computed for an empty list.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobalConfig;
    use crate::entry::Popup;
    use alloc::format;

    fn entries(kinds: &[PopupKind]) -> Vec<PopupEntry<()>> {
        let global = GlobalConfig::default();
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let popup = Popup::new("P", kind, ()).custom_id(format!("p{i}"));
                PopupEntry::new(popup, i as u64, &global)
            })
            .collect()
    }

    #[test]
    fn empty_list_has_only_overlay() {
        let p = StackPriority::for_entries::<()>(&[]);
        assert_eq!(p.overlay(), 0);
        assert!(p.is_empty());
        for kind in PopupKind::ALL {
            assert_eq!(p.kind(kind), None);
        }
    }

    #[test]
    fn overlay_is_below_every_entry() {
        use PopupKind::*;
        let lists: [&[PopupKind]; 4] = [
            &[Top],
            &[Anchored, Anchored, Bottom],
            &[Center, Top, Anchored, Center],
            &[Bottom, Bottom, Bottom],
        ];
        for list in lists {
            let e = entries(list);
            let p = StackPriority::for_entries(&e);
            for entry in &e {
                let rank = p.rank(entry.id());
                assert!(rank.is_some_and(|r| r > p.overlay()), "{list:?}");
            }
        }
    }

    #[test]
    fn anchored_ranks_increase_with_presentation() {
        let e = entries(&[PopupKind::Anchored; 3]);
        let p = StackPriority::for_entries(&e);
        let ranks: Vec<i32> = e.iter().filter_map(|x| p.rank(x.id())).collect();
        assert_eq!(ranks, [1, 2, 3]);
        assert_eq!(p.kind(PopupKind::Anchored), Some(3));

        let in_order: Vec<(&PopupId, i32)> = p.ranks().collect();
        assert_eq!(in_order.len(), 3);
        assert!(in_order.iter().zip(&e).all(|((id, _), x)| *id == x.id()));
        assert_eq!(in_order.iter().map(|(_, r)| *r).collect::<Vec<_>>(), ranks);
    }

    #[test]
    fn single_active_kinds_share_layer_rank() {
        let e = entries(&[PopupKind::Bottom, PopupKind::Bottom]);
        let p = StackPriority::for_entries(&e);
        assert_eq!(p.rank(e[0].id()), p.rank(e[1].id()));
        assert_eq!(p.kind(PopupKind::Bottom), Some(1));
    }

    #[test]
    fn most_recent_kind_is_frontmost() {
        use PopupKind::*;
        let e = entries(&[Top, Center, Top]);
        let p = StackPriority::for_entries(&e);
        assert!(p.kind(Top) > p.kind(Center), "top was presented last");

        let e = entries(&[Anchored, Bottom]);
        let p = StackPriority::for_entries(&e);
        assert!(p.kind(Bottom) > p.kind(Anchored));
    }
}
