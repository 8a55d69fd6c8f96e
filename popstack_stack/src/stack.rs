// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One popup stack and its mutation queue.
//!
//! ## Applying operations
//!
//! Operations are queued in submission order and applied one at a time from
//! [`Stack::submit`] and [`Stack::advance`]. Applying one operation:
//!
//! 1. Signals keyboard dismissal if the inserted popup, or the frontmost popup
//!    for removals, asks for it.
//! 2. Mutates the entry list and cancels the dismiss timers of removed entries.
//! 3. Publishes the new list right away.
//! 4. Publishes the new priority record right away if the list did not shrink.
//!    Otherwise the record is staged until `exit_delay` has passed, and the
//!    queue holds every later operation until it is published.
//!
//! Callers observe all of this through [`StackEvent`]s drained with
//! [`Stack::drain_events`].
//!
//! ## Time
//!
//! The stack never reads a clock. Pass the current [`HostTime`] to `submit` and
//! `advance`, and use [`Stack::next_deadline`] to schedule the next `advance`.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Insets, Point, Size};
use peniko::Color;
use popstack_placement::AnchorRegistry;

use crate::config::{PopupKind, TapOutsideBehavior};
use crate::entry::PopupEntry;
use crate::id::{PopupId, StackId};
use crate::operation::StackOperation;
use crate::priority::StackPriority;
use crate::time::HostTime;

/// Size and safe-area insets of the container a stack is shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Screen {
    /// Container size. Zero until the renderer has measured it.
    pub size: Size,
    /// Safe-area insets (`x0` leading, `y0` top, `x1` trailing, `y1` bottom).
    pub safe_area: Insets,
}

/// Something observers of a stack should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackEvent {
    /// The host should hide the on-screen keyboard. Precedes the list change it belongs to.
    KeyboardDismissRequested,
    /// The entry list changed.
    EntriesChanged,
    /// An entry left the stack.
    Dismissed(PopupId),
    /// A different entry became frontmost.
    Focused(PopupId),
    /// An entry's dismiss timer expired; its removal is queued.
    TimerFired(PopupId),
    /// A new priority record was published.
    PriorityChanged,
}

/// Whether the stack is ready to apply the next operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackPhase {
    /// Operations are applied as soon as they are submitted.
    Idle,
    /// A priority record is staged; operations wait until it is published.
    AwaitingPriority {
        /// When the staged record will be published.
        ready_at: HostTime,
    },
}

/// One named stack of popups with payload type `P`.
#[derive(Debug)]
pub struct Stack<P> {
    id: StackId,
    entries: Vec<PopupEntry<P>>,
    priority: StackPriority,
    staged: Option<(StackPriority, HostTime)>,
    pending: VecDeque<StackOperation<P>>,
    events: Vec<StackEvent>,
    screen: Screen,
    exit_delay: Duration,
}

impl<P> Stack<P> {
    /// An empty stack that stages shrinking priority changes for `exit_delay`.
    pub fn new(id: StackId, exit_delay: Duration) -> Self {
        Self {
            id,
            entries: Vec::new(),
            priority: StackPriority::default(),
            staged: None,
            pending: VecDeque::new(),
            events: Vec::new(),
            screen: Screen::default(),
            exit_delay,
        }
    }

    /// This stack's id.
    pub fn id(&self) -> &StackId {
        &self.id
    }

    /// Queue `op` and apply everything that is ready at `now`.
    pub fn submit(&mut self, op: StackOperation<P>, now: HostTime) {
        self.pending.push_back(op);
        self.pump(now);
    }

    /// Publish a staged priority, fire due timers, and apply queued operations.
    pub fn advance(&mut self, now: HostTime) {
        self.pump(now);
    }

    fn pump(&mut self, now: HostTime) {
        loop {
            self.poll_timers(now);
            if let Some(ready_at) = self.staged.as_ref().map(|(_, t)| *t) {
                if now < ready_at {
                    break;
                }
                if let Some((priority, _)) = self.staged.take() {
                    log::debug!("stack `{}`: publishing staged priority", self.id);
                    self.publish(priority);
                }
            }
            let Some(op) = self.pending.pop_front() else {
                break;
            };
            self.apply(op, now);
        }
    }

    fn poll_timers(&mut self, now: HostTime) {
        for entry in &mut self.entries {
            if entry.poll_timer(now) {
                log::trace!("stack `{}`: dismiss timer fired for {}", self.id, entry.id());
                self.events.push(StackEvent::TimerFired(entry.id().clone()));
                self.pending.push_back(StackOperation::Remove(entry.id().clone()));
            }
        }
    }

    fn apply(&mut self, mut op: StackOperation<P>, now: HostTime) {
        let name = op.name();
        let dismiss_keyboard = match &op {
            StackOperation::Insert(entry) => entry.dismiss_keyboard(),
            _ => self.entries.last().is_none_or(PopupEntry::dismiss_keyboard),
        };
        if dismiss_keyboard {
            self.events.push(StackEvent::KeyboardDismissRequested);
        }
        if let StackOperation::Insert(entry) = &mut op {
            entry.arm_timer(now);
        }

        let before_len = self.entries.len();
        let before_last = self.entries.last().map(|e| e.id().clone());
        let Some(removed) = op.apply(&mut self.entries) else {
            log::debug!(
                "stack `{}`: ignoring duplicate insert of an identity already shown",
                self.id
            );
            return;
        };
        log::trace!(
            "stack `{}`: applied {name}, {} -> {} entries",
            self.id,
            before_len,
            self.entries.len()
        );

        let changed = !removed.is_empty() || self.entries.len() != before_len;
        for mut entry in removed {
            entry.cancel_timer();
            self.events.push(StackEvent::Dismissed(entry.id().clone()));
        }
        if !changed {
            return;
        }
        self.events.push(StackEvent::EntriesChanged);

        let priority = StackPriority::for_entries(&self.entries);
        if self.entries.len() < before_len {
            self.staged = Some((priority, now + self.exit_delay));
        } else {
            self.publish(priority);
        }

        let after_last = self.entries.last().map(|e| e.id());
        if let Some(last) = after_last.filter(|id| Some(*id) != before_last.as_ref()) {
            self.events.push(StackEvent::Focused(last.clone()));
        }
    }

    fn publish(&mut self, priority: StackPriority) {
        if priority != self.priority {
            self.priority = priority;
            self.events.push(StackEvent::PriorityChanged);
        }
    }

    /// Take every event recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<StackEvent> {
        core::mem::take(&mut self.events)
    }

    /// Entries in presentation order; the last one is frontmost.
    pub fn entries(&self) -> &[PopupEntry<P>] {
        &self.entries
    }

    /// The entry with exactly this id.
    pub fn entry(&self, id: &PopupId) -> Option<&PopupEntry<P>> {
        self.entries.iter().find(|e| e.id() == id)
    }

    fn entry_mut(&mut self, id: &PopupId) -> Option<&mut PopupEntry<P>> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// The frontmost entry.
    pub fn last(&self) -> Option<&PopupEntry<P>> {
        self.entries.last()
    }

    /// Returns true if no entries are shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The published priority record. Lags the entry list while a record is staged.
    pub fn priority(&self) -> &StackPriority {
        &self.priority
    }

    /// Current queue phase.
    pub fn phase(&self) -> StackPhase {
        match &self.staged {
            Some((_, ready_at)) => StackPhase::AwaitingPriority {
                ready_at: *ready_at,
            },
            None => StackPhase::Idle,
        }
    }

    /// Number of operations waiting behind a staged priority record.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Earliest time at which [`Stack::advance`] has work to do.
    pub fn next_deadline(&self) -> Option<HostTime> {
        let staged = self.staged.as_ref().map(|(_, t)| *t);
        self.entries
            .iter()
            .filter_map(PopupEntry::dismiss_deadline)
            .chain(staged)
            .min()
    }

    /// Container metrics used for placement and height clamping.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Update container metrics.
    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Record the measured height of an entry.
    ///
    /// Anchored entries are limited to the screen height inside the safe area
    /// once the screen has been measured. Returns false if the entry is not shown.
    pub fn set_measured_height(&mut self, id: &PopupId, height: f64) -> bool {
        let screen = self.screen;
        let Some(entry) = self.entry_mut(id) else {
            return false;
        };
        let height = if entry.kind() == PopupKind::Anchored && screen.size.height > 0.0 {
            let available = screen.size.height - screen.safe_area.y0 - screen.safe_area.y1;
            height.min(available.max(0.0))
        } else {
            height
        };
        entry.set_measured_height(height);
        true
    }

    /// Record the drag translation of an entry. Returns false if the entry is not shown.
    pub fn set_drag_offset(&mut self, id: &PopupId, offset: f64) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.set_drag_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Tap-outside policy of the frontmost entry, [`TapOutsideBehavior::Block`] when empty.
    pub fn tap_outside_behavior(&self) -> TapOutsideBehavior {
        self.last()
            .map_or(TapOutsideBehavior::Block, |e| e.config().tap_outside)
    }

    /// Handle a tap on the overlay. Returns true if it queued a dismissal.
    pub fn tap_outside(&mut self, now: HostTime) -> bool {
        if self.tap_outside_behavior() == TapOutsideBehavior::Dismiss {
            self.submit(StackOperation::RemoveLast, now);
            true
        } else {
            false
        }
    }

    /// Overlay color of the frontmost entry, transparent when empty.
    pub fn overlay_color(&self) -> Color {
        self.last()
            .map_or(Color::from_rgba8(0, 0, 0, 0), |e| e.config().overlay)
    }

    /// Where to draw an anchored entry of `popup_size` inside a `container`.
    ///
    /// The anchor is resolved against `anchors` on every call. Returns `None`
    /// if the entry is not shown or is not anchored.
    pub fn compute_position(
        &self,
        id: &PopupId,
        popup_size: Size,
        container: Size,
        anchors: &AnchorRegistry,
    ) -> Option<Point> {
        let entry = self.entry(id)?;
        let config = entry.config();
        if config.kind != PopupKind::Anchored {
            log::warn!(
                "stack `{}`: position requested for {id}, which is a {:?} popup",
                self.id,
                config.kind
            );
            return None;
        }
        let anchor = config.anchor.resolve(anchors);
        let safe_area = config.effective_safe_area(self.screen.safe_area);
        Some(
            config
                .placement()
                .position(anchor, popup_size, container, safe_area),
        )
    }

    /// Drop queued operations and the staged priority, and cancel every dismiss timer.
    pub fn teardown(&mut self) {
        log::debug!(
            "stack `{}`: tearing down with {} entries and {} queued operations",
            self.id,
            self.entries.len(),
            self.pending.len()
        );
        self.staged = None;
        self.pending.clear();
        for entry in &mut self.entries {
            entry.cancel_timer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobalConfig;
    use crate::entry::Popup;
    use alloc::vec;
    use kurbo::Rect;

    const DELAY: Duration = Duration::from_millis(280);

    fn stack() -> Stack<()> {
        Stack::new(StackId::SHARED, DELAY)
    }

    fn entry(popup: Popup<()>, instance: u64) -> PopupEntry<()> {
        PopupEntry::new(popup, instance, &GlobalConfig::default())
    }

    fn insert(tag: &'static str, kind: PopupKind, instance: u64) -> StackOperation<()> {
        StackOperation::Insert(entry(Popup::new(tag, kind, ()), instance))
    }

    #[test]
    fn insert_publishes_list_and_priority() {
        let mut s = stack();
        s.submit(insert("A", PopupKind::Bottom, 1), HostTime::ZERO);
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.priority().kind(PopupKind::Bottom), Some(1));
        assert_eq!(s.phase(), StackPhase::Idle);
        let id = s.entries()[0].id().clone();
        assert_eq!(
            s.drain_events(),
            vec![
                StackEvent::KeyboardDismissRequested,
                StackEvent::EntriesChanged,
                StackEvent::PriorityChanged,
                StackEvent::Focused(id),
            ]
        );
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn keyboard_signal_follows_popup_flag() {
        let mut s = stack();
        let quiet = Popup::new("Q", PopupKind::Center, ()).dismiss_keyboard(false);
        s.submit(StackOperation::Insert(entry(quiet, 1)), HostTime::ZERO);
        let events = s.drain_events();
        assert!(!events.contains(&StackEvent::KeyboardDismissRequested));

        // Removal consults the current frontmost entry.
        s.submit(StackOperation::RemoveLast, HostTime::ZERO);
        assert!(!s.drain_events().contains(&StackEvent::KeyboardDismissRequested));

        // An empty stack still signals.
        s.advance(HostTime::ZERO + DELAY);
        let _ = s.drain_events();
        s.submit(StackOperation::RemoveLast, HostTime::ZERO + DELAY);
        assert_eq!(s.drain_events(), vec![StackEvent::KeyboardDismissRequested]);
    }

    #[test]
    fn shrinking_stages_priority_and_holds_queue() {
        let mut s = stack();
        s.submit(insert("A", PopupKind::Top, 1), HostTime::ZERO);
        s.submit(insert("B", PopupKind::Anchored, 2), HostTime::ZERO);
        let before = s.priority().clone();

        let t = HostTime::from_millis(1000);
        s.submit(StackOperation::RemoveLast, t);
        assert_eq!(s.entries().len(), 1, "list is published immediately");
        assert_eq!(s.priority(), &before, "priority lags behind");
        assert_eq!(
            s.phase(),
            StackPhase::AwaitingPriority {
                ready_at: t + DELAY
            }
        );

        s.submit(insert("C", PopupKind::Center, 3), t);
        assert_eq!(s.entries().len(), 1, "insert waits for the staged record");
        assert_eq!(s.pending_len(), 1);
        assert_eq!(s.next_deadline(), Some(t + DELAY));

        s.advance(t + Duration::from_millis(279));
        assert_eq!(s.pending_len(), 1);

        s.advance(t + DELAY);
        assert_eq!(s.phase(), StackPhase::Idle);
        assert_eq!(s.entries().len(), 2);
        assert_eq!(s.pending_len(), 0);
        assert_eq!(s.priority().kind(PopupKind::Anchored), None);
        assert!(s.priority().kind(PopupKind::Center) > s.priority().kind(PopupKind::Top));
    }

    #[test]
    fn duplicate_insert_changes_nothing() {
        let mut s = stack();
        s.submit(insert("A", PopupKind::Center, 1), HostTime::ZERO);
        let _ = s.drain_events();
        s.submit(insert("A", PopupKind::Center, 2), HostTime::ZERO);
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.entries()[0].id().instance(), 1);
        assert_eq!(s.drain_events(), vec![StackEvent::KeyboardDismissRequested]);
    }

    #[test]
    fn dismiss_timer_removes_entry_once() {
        let mut s = stack();
        let timed = Popup::new("T", PopupKind::Top, ()).dismiss_after(Duration::from_millis(100));
        s.submit(StackOperation::Insert(entry(timed, 1)), HostTime::ZERO);
        let id = s.entries()[0].id().clone();
        assert_eq!(s.next_deadline(), Some(HostTime::from_millis(100)));
        let _ = s.drain_events();

        s.advance(HostTime::from_millis(100));
        assert!(s.is_empty());
        let events = s.drain_events();
        assert_eq!(events[0], StackEvent::TimerFired(id.clone()));
        assert!(events.contains(&StackEvent::Dismissed(id)));

        s.advance(HostTime::from_millis(1000));
        assert!(s.drain_events().iter().all(|e| !matches!(e, StackEvent::TimerFired(_))));
    }

    #[test]
    fn removed_entry_timer_is_cancelled() {
        let mut s = stack();
        let timed = Popup::new("T", PopupKind::Top, ()).dismiss_after(Duration::from_millis(100));
        s.submit(StackOperation::Insert(entry(timed, 1)), HostTime::ZERO);
        s.submit(StackOperation::RemoveAll, HostTime::from_millis(10));
        s.advance(HostTime::from_millis(500));
        let _ = s.drain_events();

        // A new presentation of the same type must not inherit the old deadline.
        let again = Popup::new("T", PopupKind::Top, ());
        s.submit(StackOperation::Insert(entry(again, 2)), HostTime::from_millis(500));
        s.advance(HostTime::from_millis(5000));
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn focus_moves_to_new_last() {
        let mut s = stack();
        s.submit(insert("A", PopupKind::Center, 1), HostTime::ZERO);
        s.submit(insert("B", PopupKind::Center, 2), HostTime::ZERO);
        let a = s.entries()[0].id().clone();
        let _ = s.drain_events();
        s.submit(StackOperation::RemoveLast, HostTime::ZERO);
        assert!(s.drain_events().contains(&StackEvent::Focused(a)));
    }

    #[test]
    fn anchored_height_is_clamped_to_screen() {
        let mut s = stack();
        s.set_screen(Screen {
            size: Size::new(390.0, 844.0),
            safe_area: Insets::new(0.0, 47.0, 0.0, 34.0),
        });
        s.submit(insert("M", PopupKind::Anchored, 1), HostTime::ZERO);
        s.submit(insert("S", PopupKind::Bottom, 2), HostTime::ZERO);
        let m = s.entries()[0].id().clone();
        let b = s.entries()[1].id().clone();
        assert!(s.set_measured_height(&m, 2000.0));
        assert!(s.set_measured_height(&b, 2000.0));
        assert_eq!(s.entry(&m).map(PopupEntry::measured_height), Some(763.0));
        assert_eq!(s.entry(&b).map(PopupEntry::measured_height), Some(2000.0));
        assert!(s.set_drag_offset(&b, 12.0));
        assert_eq!(s.entry(&b).map(PopupEntry::drag_offset), Some(12.0));
    }

    #[test]
    fn tap_outside_follows_frontmost_policy() {
        let mut s = stack();
        assert_eq!(s.tap_outside_behavior(), TapOutsideBehavior::Block);
        assert!(!s.tap_outside(HostTime::ZERO));
        s.submit(insert("Sheet", PopupKind::Bottom, 1), HostTime::ZERO);
        assert!(!s.tap_outside(HostTime::ZERO));
        s.submit(insert("Menu", PopupKind::Anchored, 2), HostTime::ZERO);
        assert!(s.tap_outside(HostTime::ZERO));
        assert_eq!(s.entries().len(), 1);
        assert_eq!(s.overlay_color(), s.entries()[0].config().overlay);
    }

    #[test]
    fn compute_position_uses_anchor_and_screen() {
        let mut s = stack();
        s.set_screen(Screen {
            size: Size::new(200.0, 300.0),
            safe_area: Insets::ZERO,
        });
        let popup = Popup::new("Menu", PopupKind::Anchored, ())
            .anchor(popstack_placement::AnchorSource::key("button"))
            .configure(|o| o.offset(kurbo::Vec2::new(0.0, 8.0)));
        s.submit(StackOperation::Insert(entry(popup, 1)), HostTime::ZERO);
        s.submit(insert("Sheet", PopupKind::Bottom, 2), HostTime::ZERO);
        let menu = s.entries()[0].id().clone();
        let sheet = s.entries()[1].id().clone();

        let mut anchors = AnchorRegistry::new();
        anchors.set_frame("button", Rect::from_origin_size((100.0, 200.0), (50.0, 20.0)));
        let size = Size::new(120.0, 40.0);
        let container = Size::new(200.0, 300.0);
        assert_eq!(
            s.compute_position(&menu, size, container, &anchors),
            Some(Point::new(64.0, 228.0))
        );
        assert_eq!(s.compute_position(&sheet, size, container, &anchors), None);

        anchors.remove_frame("button");
        assert_eq!(
            s.compute_position(&menu, size, Size::ZERO, &anchors),
            Some(Point::new(-60.0, 8.0))
        );
    }

    #[test]
    fn teardown_drops_staged_work() {
        let mut s = stack();
        let timed = Popup::new("T", PopupKind::Top, ()).dismiss_after(Duration::from_millis(900));
        s.submit(StackOperation::Insert(entry(timed, 1)), HostTime::ZERO);
        s.submit(insert("A", PopupKind::Center, 2), HostTime::ZERO);
        s.submit(StackOperation::RemoveLast, HostTime::ZERO);
        s.submit(insert("B", PopupKind::Center, 3), HostTime::ZERO);
        assert_eq!(s.pending_len(), 1);

        s.teardown();
        assert_eq!(s.phase(), StackPhase::Idle);
        assert_eq!(s.pending_len(), 0);
        assert_eq!(s.next_deadline(), None);
    }
}
