// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup from stack id to stack.

use core::time::Duration;

use hashbrown::HashMap;

use crate::config::GlobalConfig;
use crate::id::StackId;
use crate::stack::Stack;
use crate::time::HostTime;

/// Every registered stack, keyed by id.
///
/// Stacks must be registered before use. Looking up an unregistered id logs
/// an error and returns `None`.
#[derive(Debug)]
pub struct StackRegistry<P> {
    stacks: HashMap<StackId, Stack<P>>,
    exit_delay: Duration,
}

impl<P> Default for StackRegistry<P> {
    fn default() -> Self {
        Self::new(GlobalConfig::DEFAULT_EXIT_DELAY)
    }
}

impl<P> StackRegistry<P> {
    /// An empty registry whose stacks stage shrinking priority changes for `exit_delay`.
    pub fn new(exit_delay: Duration) -> Self {
        Self {
            stacks: HashMap::new(),
            exit_delay,
        }
    }

    /// Create the stack `id` if it does not exist yet, and return it.
    pub fn register(&mut self, id: StackId) -> &mut Stack<P> {
        let exit_delay = self.exit_delay;
        self.stacks.entry(id).or_insert_with_key(|id| {
            log::debug!("registering popup stack `{id}`");
            Stack::new(id.clone(), exit_delay)
        })
    }

    /// The stack `id`, logging an error if it was never registered.
    pub fn fetch(&self, id: &StackId) -> Option<&Stack<P>> {
        let stack = self.stacks.get(id);
        if stack.is_none() {
            log::error!("popup stack `{id}` must be registered before use");
        }
        stack
    }

    /// Mutable access to the stack `id`, logging an error if it was never registered.
    pub fn fetch_mut(&mut self, id: &StackId) -> Option<&mut Stack<P>> {
        let stack = self.stacks.get_mut(id);
        if stack.is_none() {
            log::error!("popup stack `{id}` must be registered before use");
        }
        stack
    }

    /// Returns true if `id` is registered. Does not log.
    pub fn contains(&self, id: &StackId) -> bool {
        self.stacks.contains_key(id)
    }

    /// Tear down and remove the stack `id`, returning it.
    pub fn unregister(&mut self, id: &StackId) -> Option<Stack<P>> {
        let mut stack = self.stacks.remove(id)?;
        stack.teardown();
        log::debug!("unregistered popup stack `{id}`");
        Some(stack)
    }

    /// Advance every stack to `now`.
    pub fn advance(&mut self, now: HostTime) {
        for stack in self.stacks.values_mut() {
            stack.advance(now);
        }
    }

    /// Earliest deadline over all stacks.
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.stacks.values().filter_map(Stack::next_deadline).min()
    }

    /// Iterate over all stacks in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&StackId, &Stack<P>)> + '_ {
        self.stacks.iter()
    }

    /// Number of registered stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns true if no stacks are registered.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
