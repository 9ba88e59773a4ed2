// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Overlay lifecycle and hover/click handling for one diagram view.
//!
//! [`OverlayController`] is synchronous: callers pass the current time into every
//! time-sensitive operation and poll [`OverlayController::next_deadline`] to know when to call
//! [`OverlayController::fire_due_timers`]. [`OverlayDriver`] does that on a tokio event loop.

use std::time::Instant;

use crate::config::ControllerConfig;
use crate::discovery::discover_call_activities;
use crate::host::{Collaborators, PointerEvent, PointerKind, Region};
use crate::model::{CallActivity, DelegationMap, DelegationTarget, FlowNodeId};
use crate::navigation::navigation_url;
use crate::overlay::{
    tooltip_key, Overlay, OverlayContent, OverlayListeners, OverlayRegistry, OverlaySpec,
};

mod driver;

pub use driver::OverlayDriver;

const HOVER_EVENTS: [PointerKind; 2] = [PointerKind::Enter, PointerKind::Leave];

#[derive(Debug)]
pub struct OverlayController {
    config: ControllerConfig,
    host: Collaborators,
    call_activities: Vec<CallActivity>,
    overlays: OverlayRegistry,
    torn_down: bool,
}

impl OverlayController {
    /// Creates a controller for the diagram currently shown by the host canvas.
    pub fn new(config: ControllerConfig, host: Collaborators) -> Self {
        let call_activities = discover_call_activities(&host.canvas.elements());
        tracing::debug!(
            view_context = %config.view_context,
            call_activities = call_activities.len(),
            "overlay controller created"
        );
        Self { config, host, call_activities, overlays: OverlayRegistry::new(), torn_down: false }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn call_activities(&self) -> &[CallActivity] {
        &self.call_activities
    }

    pub fn call_activity_ids(&self) -> Vec<FlowNodeId> {
        self.call_activities.iter().map(|activity| activity.id().clone()).collect()
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn overlay(&self, node_id: &FlowNodeId) -> Option<&Overlay> {
        self.overlays.get(node_id)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Ensures an overlay for every entry of `map`. Returns the number of overlays created.
    pub fn add_overlays(&mut self, map: &DelegationMap) -> usize {
        let mut created = 0;
        for (node_id, target) in map {
            if self.ensure_overlay(node_id, target) {
                created += 1;
            }
        }
        created
    }

    /// Creates and registers the overlay for `node_id` unless it already exists.
    ///
    /// Returns `true` if a new overlay was registered with the host.
    pub fn ensure_overlay(&mut self, node_id: &FlowNodeId, target: &DelegationTarget) -> bool {
        if self.torn_down || self.overlays.contains(node_id) {
            return false;
        }

        let clickable = target.is_static();
        let content = OverlayContent {
            tooltip: self.host.translate.instant(tooltip_key(target)),
            opacity: if clickable { 1.0 } else { self.config.passive_opacity },
            clickable,
        };
        let handle = self.host.canvas.add_overlay(node_id, OverlaySpec::anchored(content));

        let canvas = &mut self.host.canvas;
        let listeners = OverlayListeners {
            node: canvas.listen(&Region::Node(node_id.clone()), &HOVER_EVENTS),
            overlay: canvas.listen(&Region::Overlay(node_id.clone()), &HOVER_EVENTS),
            click: clickable
                .then(|| canvas.listen(&Region::Overlay(node_id.clone()), &[PointerKind::Click])),
        };

        tracing::debug!(node_id = %node_id, clickable, "overlay added");
        self.overlays.insert(Overlay::new(node_id.clone(), target.clone(), handle, listeners))
    }

    /// Applies a pointer event delivered by the host. Events without a listener are ignored.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) {
        let Self { config, host, overlays, .. } = self;
        let Some(overlay) = overlays.get_mut(event.region.node_id()) else {
            return;
        };
        if !overlay.listens(&event.region, event.kind) {
            return;
        }

        match event.kind {
            PointerKind::Enter => {
                if overlay.hover_mut().enter() {
                    host.canvas.set_overlay_visible(overlay.handle(), true);
                }
            }
            PointerKind::Leave => {
                let delay = match event.region {
                    Region::Node(_) => config.node_hide_delay(),
                    Region::Overlay(_) => config.overlay_hide_delay(),
                };
                overlay.hover_mut().schedule_hide(now, delay);
            }
            PointerKind::Click => {
                host.canvas.hide_tooltip(overlay.handle());
                if let Some(url) = navigation_url(overlay.target(), &config.view_context) {
                    tracing::debug!(node_id = %overlay.node_id(), url = %url, "navigating");
                    host.navigate.navigate(&url);
                }
            }
        }
        host.commit();
    }

    /// Earliest pending hide across all overlays.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlays.next_deadline()
    }

    /// Hides every overlay whose hide deadline has passed. Returns how many were hidden.
    pub fn fire_due_timers(&mut self, now: Instant) -> usize {
        let mut hidden = 0;
        for overlay in self.overlays.iter_mut() {
            if overlay.hover_mut().fire_due(now) {
                self.host.canvas.set_overlay_visible(overlay.handle(), false);
                hidden += 1;
            }
        }
        if hidden > 0 {
            self.host.commit();
        }
        hidden
    }

    /// Cancels all pending hides and detaches every listener. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let mut detached = 0usize;
        for overlay in self.overlays.iter_mut() {
            if let Some(listeners) = overlay.dispose() {
                for listener in listeners.ids() {
                    self.host.canvas.unlisten(listener);
                    detached += 1;
                }
            }
        }
        tracing::debug!(
            overlays = self.overlays.len(),
            listeners = detached,
            "overlay controller torn down"
        );
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.teardown();
    }
}
