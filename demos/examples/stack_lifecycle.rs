// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack lifecycle.
//!
//! Presents a few popups, lets a dismiss timer fire, and prints the events and
//! priority record after every step. Time is simulated and advanced to each
//! deadline reported by the stack.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p popstack_demos --example stack_lifecycle`

use core::time::Duration;

use popstack_stack::{HostTime, Popup, PopupKind, Popups, StackId};

fn dump(popups: &mut Popups<&str>, label: &str) {
    let Some(stack) = popups.fetch_stack_mut(&StackId::SHARED) else {
        return;
    };
    println!("== {label} ==");
    for event in stack.drain_events() {
        println!("  event: {event:?}");
    }
    let priority = stack.priority();
    for entry in stack.entries() {
        println!("  {:<12} {:?} payload={}", entry.id().to_string(), entry.kind(), entry.payload());
    }
    // The published record lags the list while an exit animation runs.
    for (id, rank) in priority.ranks() {
        println!("  rank {rank:>2} {id}");
    }
    println!("  overlay rank={} phase={:?}", priority.overlay(), stack.phase());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut popups: Popups<&str> = Popups::default();
    let shared = StackId::SHARED;
    popups.register_stack(shared.clone());

    let mut now = HostTime::ZERO;
    popups.present(Popup::new("Sheet", PopupKind::Bottom, "Settings"), &shared, now);
    popups.present(
        Popup::new("Toast", PopupKind::Top, "Saved").dismiss_after(Duration::from_millis(1500)),
        &shared,
        now,
    );
    popups.present(Popup::new("Menu", PopupKind::Anchored, "Sort by"), &shared, now);
    // Same identity as an entry already shown: ignored.
    popups.present(Popup::new("Sheet", PopupKind::Bottom, "Again"), &shared, now);
    dump(&mut popups, "presented");

    now = now + Duration::from_millis(200);
    popups.tap_outside(&shared, now);
    dump(&mut popups, "tapped outside the menu");

    while let Some(deadline) = popups.next_deadline() {
        now = deadline;
        popups.advance(now);
        dump(&mut popups, &format!("advanced to {now:?}"));
    }

    // An unregistered stack is reported, not fatal.
    let other = StackId::new("second-window");
    if !popups.dismiss_all(&other, now) {
        log::info!("`{other}` has no stack yet; registering it");
        popups.register_stack(other);
    }
    for (id, stack) in popups.stacks().iter() {
        println!("stack `{id}`: {} entries", stack.entries().len());
    }
}
