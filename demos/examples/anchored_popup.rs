// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored placement.
//!
//! A menu is anchored to a toolbar button tracked in the anchor registry. The
//! button moves across a narrow window and the menu is kept inside the padded
//! safe area. A second popup follows a live provider instead.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p popstack_demos --example anchored_popup`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Insets, Rect, Size, Vec2};
use popstack_placement::{AnchorPoint, AnchorSource, ConstrainedEdges};
use popstack_stack::{HostTime, Popup, PopupKind, Popups, Screen, StackId};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let window = Size::new(320.0, 568.0);
    let mut popups: Popups<&str> = Popups::default();
    popups.register_stack(StackId::SHARED).set_screen(Screen {
        size: window,
        safe_area: Insets::new(0.0, 20.0, 0.0, 0.0),
    });

    let menu = Popup::new("ShareMenu", PopupKind::Anchored, "Share…")
        .anchor(AnchorSource::key("share-button"))
        .configure(|o| o.offset(Vec2::new(0.0, 6.0)));
    let Some(menu) = popups.present(menu, &StackId::SHARED, HostTime::ZERO) else {
        return;
    };

    let menu_size = Size::new(180.0, 120.0);
    println!("== Registry anchor ==");
    for x in [0.0, 60.0, 140.0, 220.0, 290.0] {
        popups.set_anchor_frame("share-button", Rect::from_origin_size((x, 30.0), (30.0, 30.0)));
        let p = popups.compute_position(&StackId::SHARED, &menu, menu_size, window);
        println!("  button at x={x:>5.1} -> menu at {p:?}");
    }
    popups.clear_anchor_frame("share-button");
    let p = popups.compute_position(&StackId::SHARED, &menu, menu_size, window);
    println!("  button gone      -> menu at {p:?}");

    println!("== Live provider ==");
    let cursor = Rc::new(Cell::new(0.0_f64));
    let source = {
        let cursor = cursor.clone();
        AnchorSource::provider(move || Rect::from_origin_size((cursor.get(), 400.0), (1.0, 1.0)))
    };
    let tip = Popup::new("Tooltip", PopupKind::Anchored, "Tip")
        .anchor(source)
        .configure(|o| {
            o.origin_anchor(AnchorPoint::TopRight)
                .popup_anchor(AnchorPoint::BottomLeft)
                .constrained_edges(ConstrainedEdges::all())
                .edge_padding(8.0)
        });
    let Some(tip) = popups.present(tip, &StackId::SHARED, HostTime::ZERO) else {
        return;
    };
    for x in [10.0, 150.0, 300.0] {
        cursor.set(x);
        let p = popups.compute_position(&StackId::SHARED, &tip, Size::new(100.0, 24.0), window);
        println!("  cursor at x={x:>5.1} -> tooltip at {p:?}");
    }
}
