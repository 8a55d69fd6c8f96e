// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup requests and presented entries.

use alloc::string::String;
use core::time::Duration;

use popstack_placement::AnchorSource;

use crate::config::{ConfigOverrides, GlobalConfig, PopupConfig, PopupKind};
use crate::id::PopupId;
use crate::time::HostTime;
use crate::timer::DismissTimer;

/// A request to present a popup, before it is assigned an id.
///
/// `P` is the opaque content payload. The stacks never look inside it.
///
/// ```
/// use core::time::Duration;
/// use popstack_stack::{Popup, PopupKind};
///
/// let toast = Popup::new("Toast", PopupKind::Top, "Saved")
///     .custom_id("toast-saved")
///     .dismiss_after(Duration::from_secs(2));
/// assert_eq!(toast.kind(), PopupKind::Top);
/// ```
#[derive(Clone, Debug)]
pub struct Popup<P> {
    type_tag: &'static str,
    kind: PopupKind,
    payload: P,
    custom_id: Option<String>,
    overrides: ConfigOverrides,
    dismiss_after: Option<Duration>,
    dismiss_keyboard: bool,
}

impl<P> Popup<P> {
    /// A popup of the given content type and placement kind.
    pub fn new(type_tag: &'static str, kind: PopupKind, payload: P) -> Self {
        Self {
            type_tag,
            kind,
            payload,
            custom_id: None,
            overrides: ConfigOverrides::default(),
            dismiss_after: None,
            dismiss_keyboard: true,
        }
    }

    /// Replace the type tag as identity key, so several popups of one type can coexist.
    #[must_use]
    pub fn custom_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = Some(id.into());
        self
    }

    /// Anchor source for an anchored popup.
    #[must_use]
    pub fn anchor(mut self, anchor: impl Into<AnchorSource>) -> Self {
        self.overrides = self.overrides.anchor(anchor.into());
        self
    }

    /// Remove the popup automatically this long after it is inserted.
    #[must_use]
    pub fn dismiss_after(mut self, after: Duration) -> Self {
        self.dismiss_after = Some(after);
        self
    }

    /// Whether inserting or removing this popup asks the host to hide the keyboard.
    /// Defaults to true.
    #[must_use]
    pub fn dismiss_keyboard(mut self, dismiss: bool) -> Self {
        self.dismiss_keyboard = dismiss;
        self
    }

    /// Replace all configuration overrides.
    #[must_use]
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Edit configuration overrides in place.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(ConfigOverrides) -> ConfigOverrides) -> Self {
        self.overrides = f(self.overrides);
        self
    }

    /// Placement kind.
    pub fn kind(&self) -> PopupKind {
        self.kind
    }

    /// Content type tag.
    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }
}

/// One presented popup inside a stack.
#[derive(Clone, Debug)]
pub struct PopupEntry<P> {
    id: PopupId,
    config: PopupConfig,
    payload: P,
    measured_height: f64,
    drag_offset: f64,
    dismiss_keyboard: bool,
    dismiss_after: Option<Duration>,
    timer: Option<DismissTimer>,
}

impl<P> PopupEntry<P> {
    /// Resolve `popup` against `global` and give it the `instance` number.
    pub fn new(popup: Popup<P>, instance: u64, global: &GlobalConfig) -> Self {
        let config = PopupConfig::resolve(popup.kind, global, &popup.overrides);
        Self {
            id: PopupId::new(popup.type_tag, popup.custom_id, instance),
            config,
            payload: popup.payload,
            measured_height: 0.0,
            drag_offset: 0.0,
            dismiss_keyboard: popup.dismiss_keyboard,
            dismiss_after: popup.dismiss_after,
            timer: None,
        }
    }

    /// Identity of this entry.
    pub fn id(&self) -> &PopupId {
        &self.id
    }

    /// Placement kind.
    pub fn kind(&self) -> PopupKind {
        self.config.kind
    }

    /// Resolved configuration snapshot.
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Content payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Last height reported by the renderer, zero until measured.
    pub fn measured_height(&self) -> f64 {
        self.measured_height
    }

    /// Current drag translation reported by the renderer.
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    /// Whether this popup asks for keyboard dismissal.
    pub fn dismiss_keyboard(&self) -> bool {
        self.dismiss_keyboard
    }

    /// When the dismiss timer fires, if one is armed.
    pub fn dismiss_deadline(&self) -> Option<HostTime> {
        self.timer.as_ref().and_then(DismissTimer::deadline)
    }

    pub(crate) fn set_measured_height(&mut self, height: f64) {
        self.measured_height = height;
    }

    pub(crate) fn set_drag_offset(&mut self, offset: f64) {
        self.drag_offset = offset;
    }

    pub(crate) fn arm_timer(&mut self, now: HostTime) {
        if let Some(after) = self.dismiss_after {
            log::trace!("arming dismiss timer for {} ({after:?})", self.id);
            self.timer = Some(DismissTimer::start(now, after));
        }
    }

    pub(crate) fn poll_timer(&mut self, now: HostTime) -> bool {
        self.timer.as_mut().is_some_and(|t| t.poll(now))
    }

    pub(crate) fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut().filter(|t| t.is_armed()) {
            log::trace!("cancelling dismiss timer for {}", self.id);
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn entry_resolves_config_and_identity() {
        let popup = Popup::new("Menu", PopupKind::Anchored, ())
            .custom_id("menu-1")
            .anchor(Rect::new(0.0, 0.0, 10.0, 10.0))
            .dismiss_keyboard(false);
        let entry = PopupEntry::new(popup, 7, &GlobalConfig::default());
        assert_eq!(entry.id().identity(), "menu-1");
        assert_eq!(entry.id().instance(), 7);
        assert_eq!(entry.kind(), PopupKind::Anchored);
        assert!(!entry.dismiss_keyboard());
        assert!(matches!(entry.config().anchor, AnchorSource::Static(_)));
    }

    #[test]
    fn timer_is_armed_only_on_request() {
        let global = GlobalConfig::default();
        let mut plain = PopupEntry::new(Popup::new("A", PopupKind::Top, ()), 1, &global);
        plain.arm_timer(HostTime::ZERO);
        assert_eq!(plain.dismiss_deadline(), None);

        let timed = Popup::new("B", PopupKind::Top, ()).dismiss_after(Duration::from_millis(50));
        let mut timed = PopupEntry::new(timed, 2, &global);
        assert_eq!(timed.dismiss_deadline(), None, "not armed before insertion");
        timed.arm_timer(HostTime::from_millis(10));
        assert_eq!(timed.dismiss_deadline(), Some(HostTime::from_millis(60)));
        timed.cancel_timer();
        assert!(!timed.poll_timer(HostTime::from_millis(100)));
    }
}
