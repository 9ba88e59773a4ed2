// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use super::OverlayController;
use crate::host::PointerEvent;
use crate::source::{CallableElementResolver, DelegationSource, ProcessData};

/// Runs an [`OverlayController`] on the current task.
///
/// The loop multiplexes host pointer events, delegation updates and hide deadlines. It ends
/// when the host drops its event sender, i.e. when the view is destroyed.
#[derive(Debug)]
pub struct OverlayDriver {
    controller: OverlayController,
    source: Option<DelegationSource>,
    events: mpsc::UnboundedReceiver<PointerEvent>,
}

impl OverlayDriver {
    /// Subscribes to the delegation source matching the controller's view context.
    ///
    /// A diagram without call activities never subscribes to anything.
    pub fn new(
        controller: OverlayController,
        data: &ProcessData,
        resolver: Arc<dyn CallableElementResolver>,
        events: mpsc::UnboundedReceiver<PointerEvent>,
    ) -> Self {
        let flow_nodes = controller.call_activity_ids();
        let source = if flow_nodes.is_empty() {
            tracing::debug!("no call activities in diagram; skipping delegation subscription");
            None
        } else {
            let source = DelegationSource::select(
                &controller.config().view_context,
                flow_nodes,
                data,
                resolver,
            );
            tracing::debug!(key = %source.observed_key(), "subscribed to delegation data");
            Some(source)
        };
        Self { controller, source, events }
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn is_subscribed(&self) -> bool {
        self.source.is_some()
    }

    /// Drives the controller until the event sender is dropped, then tears it down.
    pub async fn run(mut self) -> OverlayController {
        loop {
            let deadline = self.controller.next_deadline().map(Instant::from_std);
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    self.controller.handle_pointer(&event, Instant::now().into_std());
                }
                map = next_map(&mut self.source) => {
                    let created = self.controller.add_overlays(&map);
                    tracing::trace!(entries = map.len(), created, "delegation map applied");
                }
                _ = wait_until(deadline) => {
                    self.controller.fire_due_timers(Instant::now().into_std());
                }
            }
        }

        self.controller.teardown();
        self.controller
    }
}

async fn next_map(source: &mut Option<DelegationSource>) -> crate::model::DelegationMap {
    match source {
        Some(source) => source.next_map().await,
        None => std::future::pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
