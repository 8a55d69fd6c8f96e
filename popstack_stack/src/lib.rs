// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=popstack_stack --heading-base-level=0

//! Popstack Stack: ordered popup stacks with a deterministic mutation queue.
//!
//! A [`Stack`] holds the popups shown above one window's content, in presentation order.
//! Structural changes are [`StackOperation`]s applied strictly one at a time.
//! After each change the stack derives a [`StackPriority`] that orders the dimming
//! overlay and the popup layers. When a change removes popups, the new priority is
//! held back for the exit transition, and later operations wait behind it.
//!
//! - [`Popups`] is the application-facing facade: it registers stacks, presents and
//!   dismisses popups, tracks anchor frames, and computes anchored placements.
//! - [`StackRegistry`] maps [`StackId`]s to stacks.
//! - [`PopupConfig`] is the resolved configuration of one popup, built from
//!   [`GlobalConfig`] defaults and per-popup [`ConfigOverrides`].
//! - [`DismissTimer`] removes a popup automatically after a delay.
//!
//! ## Time and events
//!
//! Nothing here reads a clock or spawns tasks. Every call that can apply work takes
//! the current [`HostTime`], and [`Stack::next_deadline`] tells the host when to call
//! [`Popups::advance`] again. The renderer learns about changes by draining
//! [`StackEvent`]s.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use popstack_stack::{HostTime, Popup, PopupKind, Popups, StackEvent, StackId};
//!
//! let mut popups: Popups<&str> = Popups::default();
//! popups.register_stack(StackId::SHARED);
//!
//! let t0 = HostTime::ZERO;
//! let toast = Popup::new("Toast", PopupKind::Top, "Saved")
//!     .dismiss_after(Duration::from_secs(2));
//! let id = popups.present(toast, &StackId::SHARED, t0).unwrap();
//!
//! let stack = popups.fetch_stack(&StackId::SHARED).unwrap();
//! assert_eq!(stack.entries().len(), 1);
//! assert_eq!(popups.next_deadline(), Some(HostTime::from_millis(2000)));
//!
//! // The timer fires and queues the removal.
//! popups.advance(HostTime::from_millis(2000));
//! let stack = popups.fetch_stack_mut(&StackId::SHARED).unwrap();
//! assert!(stack.is_empty());
//! assert!(stack.drain_events().contains(&StackEvent::Dismissed(id)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod entry;
mod id;
mod operation;
mod popups;
mod priority;
mod registry;
mod stack;
mod time;
mod timer;

pub use config::{
    ConfigOverrides, GlobalConfig, PopupConfig, PopupKind, SafeAreaEdges, TapOutsideBehavior,
};
pub use entry::{Popup, PopupEntry};
pub use id::{PopupId, StackId};
pub use operation::StackOperation;
pub use popups::Popups;
pub use priority::StackPriority;
pub use registry::StackRegistry;
pub use stack::{Screen, Stack, StackEvent, StackPhase};
pub use time::HostTime;
pub use timer::DismissTimer;

pub use popstack_placement::{AnchorPoint, AnchorRegistry, AnchorSource, ConstrainedEdges};
