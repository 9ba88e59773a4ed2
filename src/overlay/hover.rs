// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced show/hide state for a single overlay.
//!
//! Two regions (the diagram node and the overlay) feed the same state. Entering either shows
//! the overlay and cancels any pending hide; leaving either schedules a hide after a delay.
//!
//! # Invariants
//!
//! 1. At most one hide is pending. Scheduling replaces the previous deadline.
//! 2. A pending hide only fires if no enter happened after it was scheduled.
//!
//! Time is passed in explicitly, so the state can be driven by any clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingHide {
    deadline: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct HoverState {
    visibility: Visibility,
    pending_hide: Option<PendingHide>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Deadline of the pending hide, if any.
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.pending_hide.map(|pending| pending.deadline)
    }

    /// Pointer entered one of the regions. Returns `true` if the overlay became visible.
    pub fn enter(&mut self) -> bool {
        self.cancel_hide();
        let was_hidden = self.visibility == Visibility::Hidden;
        self.visibility = Visibility::Shown;
        was_hidden
    }

    /// Pointer left one of the regions; hide after `delay` unless re-entered.
    pub fn schedule_hide(&mut self, now: Instant, delay: Duration) {
        self.cancel_hide();
        self.pending_hide = Some(PendingHide { deadline: now + delay });
    }

    /// Returns `true` if a pending hide was dropped.
    pub fn cancel_hide(&mut self) -> bool {
        self.pending_hide.take().is_some()
    }

    /// Applies the pending hide if its deadline has passed. Returns `true` if the overlay
    /// went from shown to hidden.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.pending_hide {
            Some(pending) if pending.deadline <= now => {
                self.pending_hide = None;
                let was_shown = self.visibility == Visibility::Shown;
                self.visibility = Visibility::Hidden;
                was_shown
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{HoverState, Visibility};

    const NODE_DELAY: Duration = Duration::from_millis(50);
    const OVERLAY_DELAY: Duration = Duration::from_millis(100);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn starts_hidden_without_pending_hide() {
        let state = HoverState::new();
        assert_eq!(state.visibility(), Visibility::Hidden);
        assert_eq!(state.hide_deadline(), None);
    }

    #[test]
    fn enter_shows_once() {
        let mut state = HoverState::new();
        assert!(state.enter());
        assert!(!state.enter());
        assert!(state.is_shown());
    }

    #[test]
    fn reentry_before_deadline_prevents_hide() {
        let t0 = Instant::now();
        let mut state = HoverState::new();
        state.enter();

        state.schedule_hide(t0, NODE_DELAY);
        state.enter();

        assert!(!state.fire_due(t0 + ms(50)));
        assert!(!state.fire_due(t0 + ms(500)));
        assert!(state.is_shown());
    }

    #[test]
    fn hide_fires_at_deadline_not_before() {
        let t0 = Instant::now();
        let mut state = HoverState::new();
        state.enter();
        state.schedule_hide(t0, NODE_DELAY);

        assert!(!state.fire_due(t0 + ms(49)));
        assert!(state.is_shown());
        assert!(state.fire_due(t0 + ms(50)));
        assert_eq!(state.visibility(), Visibility::Hidden);
        assert_eq!(state.hide_deadline(), None);
    }

    #[test]
    fn leaving_node_and_overlay_use_their_own_delays() {
        let t0 = Instant::now();
        let mut state = HoverState::new();

        state.schedule_hide(t0, NODE_DELAY);
        assert_eq!(state.hide_deadline(), Some(t0 + ms(50)));

        state.schedule_hide(t0, OVERLAY_DELAY);
        assert_eq!(state.hide_deadline(), Some(t0 + ms(100)));
    }

    #[test]
    fn rescheduling_replaces_the_previous_hide() {
        let t0 = Instant::now();
        let mut state = HoverState::new();
        state.enter();

        // node left at t0 (due at 50), overlay left at t0+30 (due at 130)
        state.schedule_hide(t0, NODE_DELAY);
        state.schedule_hide(t0 + ms(30), OVERLAY_DELAY);

        assert!(!state.fire_due(t0 + ms(50)));
        assert!(state.is_shown());
        assert!(state.fire_due(t0 + ms(130)));
    }

    #[test]
    fn firing_while_hidden_only_clears_the_slot() {
        let t0 = Instant::now();
        let mut state = HoverState::new();
        state.schedule_hide(t0, NODE_DELAY);

        assert!(!state.fire_due(t0 + ms(60)));
        assert_eq!(state.hide_deadline(), None);
    }
}
