// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Overlay objects and the per-controller registry that owns them.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::host::{ListenerId, OverlayHandle, PointerKind, Region};
use crate::model::{DelegationTarget, FlowNodeId};

pub mod hover;

pub use hover::{HoverState, Visibility};

/// Translation key of the tooltip for statically linked targets.
pub const STATIC_LINK_TOOLTIP_KEY: &str = "PLGN_CALL_ACTIVITY_STATIC_LINK";
/// Translation key of the tooltip for targets resolved at runtime.
pub const RUNTIME_LINK_TOOLTIP_KEY: &str = "PLGN_CALL_ACTIVITY_RUNTIME_LINK";

pub fn tooltip_key(target: &DelegationTarget) -> &'static str {
    if target.is_static() {
        STATIC_LINK_TOOLTIP_KEY
    } else {
        RUNTIME_LINK_TOOLTIP_KEY
    }
}

/// Offset from the node's bounding box, in diagram units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPosition {
    pub top: f64,
    pub right: f64,
}

impl OverlayPosition {
    pub const TOP_RIGHT: Self = Self { top: 0.0, right: 0.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl ZoomRange {
    pub const UNBOUNDED: Self = Self { min: f64::NEG_INFINITY, max: f64::INFINITY };

    pub fn contains(&self, zoom: f64) -> bool {
        self.min <= zoom && zoom <= self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    pub tooltip: String,
    pub opacity: f32,
    pub clickable: bool,
}

/// What the host receives when an overlay is registered.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub position: OverlayPosition,
    pub zoom: ZoomRange,
    pub visible: bool,
    pub content: OverlayContent,
}

impl OverlaySpec {
    /// A hidden overlay at the node's top-right corner, shown at every zoom level.
    pub fn anchored(content: OverlayContent) -> Self {
        Self {
            position: OverlayPosition::TOP_RIGHT,
            zoom: ZoomRange::UNBOUNDED,
            visible: false,
            content,
        }
    }
}

/// Listeners attached for one overlay. `click` is only wired for navigable targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayListeners {
    pub node: ListenerId,
    pub overlay: ListenerId,
    pub click: Option<ListenerId>,
}

impl OverlayListeners {
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        [Some(self.node), Some(self.overlay), self.click].into_iter().flatten()
    }
}

#[derive(Debug)]
pub struct Overlay {
    node_id: FlowNodeId,
    target: DelegationTarget,
    clickable: bool,
    hover: HoverState,
    handle: OverlayHandle,
    listeners: Option<OverlayListeners>,
}

impl Overlay {
    pub(crate) fn new(
        node_id: FlowNodeId,
        target: DelegationTarget,
        handle: OverlayHandle,
        listeners: OverlayListeners,
    ) -> Self {
        let clickable = target.is_static();
        Self {
            node_id,
            target,
            clickable,
            hover: HoverState::new(),
            handle,
            listeners: Some(listeners),
        }
    }

    pub fn node_id(&self) -> &FlowNodeId {
        &self.node_id
    }

    pub fn target(&self) -> &DelegationTarget {
        &self.target
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn visibility(&self) -> Visibility {
        self.hover.visibility()
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hover.hide_deadline()
    }

    pub fn handle(&self) -> OverlayHandle {
        self.handle
    }

    pub fn listeners(&self) -> Option<&OverlayListeners> {
        self.listeners.as_ref()
    }

    pub(crate) fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }

    /// Whether a listener is attached for this kind of event on `region`.
    pub(crate) fn listens(&self, region: &Region, kind: PointerKind) -> bool {
        let Some(listeners) = &self.listeners else {
            return false;
        };
        match (region, kind) {
            (Region::Overlay(_), PointerKind::Click) => listeners.click.is_some(),
            (Region::Node(_), PointerKind::Click) => false,
            _ => true,
        }
    }

    /// Cancels the pending hide and hands back the listeners to detach.
    pub(crate) fn dispose(&mut self) -> Option<OverlayListeners> {
        self.hover.cancel_hide();
        self.listeners.take()
    }
}

/// Node id to overlay, owned by one controller instance.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    overlays: BTreeMap<FlowNodeId, Overlay>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn contains(&self, node_id: &FlowNodeId) -> bool {
        self.overlays.contains_key(node_id)
    }

    pub fn get(&self, node_id: &FlowNodeId) -> Option<&Overlay> {
        self.overlays.get(node_id)
    }

    pub(crate) fn get_mut(&mut self, node_id: &FlowNodeId) -> Option<&mut Overlay> {
        self.overlays.get_mut(node_id)
    }

    /// Inserts `overlay` unless one already exists for its node. Returns `true` on insert.
    pub(crate) fn insert(&mut self, overlay: Overlay) -> bool {
        if self.overlays.contains_key(overlay.node_id()) {
            return false;
        }
        self.overlays.insert(overlay.node_id().clone(), overlay);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Overlay> {
        self.overlays.values_mut()
    }

    /// The earliest pending hide across all overlays.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlays.values().filter_map(Overlay::hide_deadline).min()
    }
}
