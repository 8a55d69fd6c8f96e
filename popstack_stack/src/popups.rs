// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The application-facing entry point.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use popstack_placement::AnchorRegistry;

use crate::config::GlobalConfig;
use crate::entry::{Popup, PopupEntry};
use crate::id::{PopupId, StackId};
use crate::operation::StackOperation;
use crate::registry::StackRegistry;
use crate::stack::Stack;
use crate::time::HostTime;

/// Owns every stack, the anchor registry, and the global defaults.
///
/// Create one per process (or per UI thread) and pass it to the code that
/// presents popups and to the renderer.
#[derive(Debug)]
pub struct Popups<P> {
    stacks: StackRegistry<P>,
    anchors: AnchorRegistry,
    config: GlobalConfig,
    next_instance: u64,
}

impl<P> Default for Popups<P> {
    fn default() -> Self {
        Self::new(GlobalConfig::default())
    }
}

impl<P> Popups<P> {
    /// Create with the given defaults. No stacks are registered.
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            stacks: StackRegistry::new(config.exit_delay),
            anchors: AnchorRegistry::new(),
            config,
            next_instance: 1,
        }
    }

    /// Global defaults used to resolve newly presented popups.
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Create the stack `id` unless it exists.
    pub fn register_stack(&mut self, id: StackId) -> &mut Stack<P> {
        self.stacks.register(id)
    }

    /// The stack `id`. Logs an error if it was never registered.
    pub fn fetch_stack(&self, id: &StackId) -> Option<&Stack<P>> {
        self.stacks.fetch(id)
    }

    /// Mutable access to the stack `id`, for renderer updates.
    pub fn fetch_stack_mut(&mut self, id: &StackId) -> Option<&mut Stack<P>> {
        self.stacks.fetch_mut(id)
    }

    /// Tear down and remove the stack `id`.
    pub fn unregister_stack(&mut self, id: &StackId) -> Option<Stack<P>> {
        self.stacks.unregister(id)
    }

    /// All stacks.
    pub fn stacks(&self) -> &StackRegistry<P> {
        &self.stacks
    }

    /// Queue `op` on stack `id`. Returns false if the stack is not registered.
    pub fn submit(&mut self, id: &StackId, op: StackOperation<P>, now: HostTime) -> bool {
        match self.stacks.fetch_mut(id) {
            Some(stack) => {
                stack.submit(op, now);
                true
            }
            None => false,
        }
    }

    /// Resolve `popup` and queue its insertion on stack `id`.
    ///
    /// Returns the id the entry will carry, or `None` if the stack is not
    /// registered. A returned id does not mean the popup is shown: a duplicate
    /// is dropped when its insert is applied.
    pub fn present(&mut self, popup: Popup<P>, id: &StackId, now: HostTime) -> Option<PopupId> {
        let stack = self.stacks.fetch_mut(id)?;
        let instance = self.next_instance;
        self.next_instance += 1;
        let entry = PopupEntry::new(popup, instance, &self.config);
        let popup_id = entry.id().clone();
        stack.submit(StackOperation::Insert(entry), now);
        Some(popup_id)
    }

    /// Dismiss the frontmost popup.
    pub fn dismiss_last(&mut self, id: &StackId, now: HostTime) -> bool {
        self.submit(id, StackOperation::RemoveLast, now)
    }

    /// Dismiss one presented instance.
    pub fn dismiss(&mut self, id: &StackId, popup: &PopupId, now: HostTime) -> bool {
        self.submit(id, StackOperation::Remove(popup.clone()), now)
    }

    /// Dismiss every popup whose identity key is the type tag.
    pub fn dismiss_type(&mut self, id: &StackId, type_tag: &str, now: HostTime) -> bool {
        self.submit(id, StackOperation::RemoveAllOfType(type_tag.into()), now)
    }

    /// Dismiss every popup presented with this custom id.
    pub fn dismiss_id(&mut self, id: &StackId, custom_id: &str, now: HostTime) -> bool {
        self.submit(id, StackOperation::RemoveAllWithId(custom_id.into()), now)
    }

    /// Dismiss everything.
    pub fn dismiss_all(&mut self, id: &StackId, now: HostTime) -> bool {
        self.submit(id, StackOperation::RemoveAll, now)
    }

    /// Keep only popups whose identity key is listed.
    pub fn dismiss_all_excluding<I, K>(&mut self, id: &StackId, keep: I, now: HostTime) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keep: Vec<String> = keep.into_iter().map(Into::into).collect();
        self.submit(id, StackOperation::RemoveAllExcluding(keep), now)
    }

    /// Handle a tap on the overlay of stack `id`.
    pub fn tap_outside(&mut self, id: &StackId, now: HostTime) -> bool {
        self.stacks
            .fetch_mut(id)
            .is_some_and(|stack| stack.tap_outside(now))
    }

    /// Record the frame of a tracked anchor view.
    pub fn set_anchor_frame(&mut self, key: impl Into<String>, frame: Rect) {
        self.anchors.set_frame(key, frame);
    }

    /// Frame of a tracked anchor view, zero if unknown.
    pub fn anchor_frame(&self, key: &str) -> Rect {
        self.anchors.frame(key)
    }

    /// Forget a tracked anchor view.
    pub fn clear_anchor_frame(&mut self, key: &str) {
        self.anchors.remove_frame(key);
    }

    /// The anchor registry.
    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    /// Placement of an anchored popup, resolving its anchor now.
    pub fn compute_position(
        &self,
        id: &StackId,
        popup: &PopupId,
        popup_size: Size,
        container: Size,
    ) -> Option<Point> {
        self.stacks
            .fetch(id)?
            .compute_position(popup, popup_size, container, &self.anchors)
    }

    /// Advance every stack to `now`.
    pub fn advance(&mut self, now: HostTime) {
        self.stacks.advance(now);
    }

    /// Earliest time at which [`Popups::advance`] has work to do.
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.stacks.next_deadline()
    }
}
