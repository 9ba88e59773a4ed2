// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seams to the embedding application.
//!
//! The controller never touches rendering, routing or localization directly. It talks to the
//! host through the traits below, bundled in [`Collaborators`].

use std::fmt;

use crate::model::{DiagramElement, FlowNodeId};
use crate::overlay::OverlaySpec;

/// Opaque handle returned by the host when an overlay is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

/// Opaque handle for an attached pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A pointer-sensitive area tied to one call-activity node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    /// The rendered diagram node.
    Node(FlowNodeId),
    /// The overlay anchored to the node.
    Overlay(FlowNodeId),
}

impl Region {
    pub fn node_id(&self) -> &FlowNodeId {
        match self {
            Self::Node(node_id) | Self::Overlay(node_id) => node_id,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node_id) => write!(f, "node:{node_id}"),
            Self::Overlay(node_id) => write!(f, "overlay:{node_id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Enter,
    Leave,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub region: Region,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn new(region: Region, kind: PointerKind) -> Self {
        Self { region, kind }
    }
}

/// The diagram renderer: element registry, overlay subsystem and pointer regions.
pub trait DiagramCanvas {
    fn elements(&self) -> Vec<DiagramElement>;

    fn add_overlay(&mut self, node_id: &FlowNodeId, spec: OverlaySpec) -> OverlayHandle;

    fn set_overlay_visible(&mut self, handle: OverlayHandle, visible: bool);

    fn hide_tooltip(&mut self, handle: OverlayHandle);

    /// Starts forwarding the given pointer events of `region` to the controller.
    fn listen(&mut self, region: &Region, kinds: &[PointerKind]) -> ListenerId;

    fn unlisten(&mut self, listener: ListenerId);
}

/// Synchronous lookup of localized text.
pub trait Translate {
    fn instant(&self, key: &str) -> String;
}

/// Host URL routing.
pub trait Navigate {
    fn navigate(&mut self, url: &str);
}

/// Redraw signalling for hosts that need an explicit render pass after state changes.
pub trait RenderCycle {
    /// Whether the host is currently inside its own render/detection pass.
    fn in_progress(&self) -> bool {
        false
    }

    fn commit(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderCycle;

impl RenderCycle for NoopRenderCycle {
    fn commit(&mut self) {}
}

pub struct Collaborators {
    pub canvas: Box<dyn DiagramCanvas>,
    pub translate: Box<dyn Translate>,
    pub navigate: Box<dyn Navigate>,
    pub render: Box<dyn RenderCycle>,
}

impl Collaborators {
    pub fn new(
        canvas: impl DiagramCanvas + 'static,
        translate: impl Translate + 'static,
        navigate: impl Navigate + 'static,
    ) -> Self {
        Self {
            canvas: Box::new(canvas),
            translate: Box::new(translate),
            navigate: Box::new(navigate),
            render: Box::new(NoopRenderCycle),
        }
    }

    pub fn with_render_cycle(mut self, render: impl RenderCycle + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    /// Commits pending state to the render layer unless a pass is already running.
    pub(crate) fn commit(&mut self) {
        if !self.render.in_progress() {
            self.render.commit();
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
