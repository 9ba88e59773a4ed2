// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Delegation data sources.
//!
//! Both variants turn observed process data into [`DelegationMap`] updates. The history view
//! filters observed activity instances; the runtime view resolves the observed process
//! definition through a [`CallableElementResolver`].

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::ViewContext;
use crate::discovery::call_activities_map;
use crate::model::{
    ActivityInstanceMap, DelegationMap, FlowNodeId, ProcessDefinition, ProcessDefinitionId,
};

pub mod process_data;
pub mod resolver;

pub use process_data::{Observation, ObservedKey, ProcessData};
pub use resolver::{
    parse_linked_callable_elements, CallableElementResolver, CalledElement, CalledElementBinding,
    DefinitionRepository, ResolveError, StaticMappingResolver,
};

#[derive(Debug)]
pub enum DelegationSource {
    History(HistoryAdapter),
    Runtime(RuntimeAdapter),
}

impl DelegationSource {
    /// Picks the variant for `view_context` and subscribes to its key.
    pub fn select(
        view_context: &ViewContext,
        flow_nodes: Vec<FlowNodeId>,
        data: &ProcessData,
        resolver: Arc<dyn CallableElementResolver>,
    ) -> Self {
        if view_context.is_history() {
            Self::History(HistoryAdapter::new(flow_nodes, data.observe_activity_instances()))
        } else {
            Self::Runtime(RuntimeAdapter::new(data.observe_process_definition(), resolver))
        }
    }

    pub fn observed_key(&self) -> ObservedKey {
        match self {
            Self::History(_) => ObservedKey::ActivityIdToInstancesMap,
            Self::Runtime(_) => ObservedKey::ProcessDefinition,
        }
    }

    /// Waits for the next delegation map. Pends forever once the source is exhausted.
    ///
    /// Cancel safe.
    pub async fn next_map(&mut self) -> DelegationMap {
        let next = match self {
            Self::History(adapter) => adapter.next_map().await,
            Self::Runtime(adapter) => adapter.next_map().await,
        };
        match next {
            Some(map) => map,
            None => std::future::pending().await,
        }
    }
}

#[derive(Debug)]
pub struct HistoryAdapter {
    flow_nodes: Vec<FlowNodeId>,
    instances: Observation<ActivityInstanceMap>,
}

impl HistoryAdapter {
    pub fn new(flow_nodes: Vec<FlowNodeId>, instances: Observation<ActivityInstanceMap>) -> Self {
        Self { flow_nodes, instances }
    }

    pub async fn next_map(&mut self) -> Option<DelegationMap> {
        let instances = self.instances.next().await?;
        Some(call_activities_map(&self.flow_nodes, &instances))
    }
}

type Resolution = (ProcessDefinitionId, Result<DelegationMap, resolver::ResolveError>);

pub struct RuntimeAdapter {
    definitions: Observation<ProcessDefinition>,
    resolver: Arc<dyn CallableElementResolver>,
    in_flight: JoinSet<Resolution>,
    observing: bool,
}

impl std::fmt::Debug for RuntimeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeAdapter")
            .field("in_flight", &self.in_flight.len())
            .field("observing", &self.observing)
            .finish_non_exhaustive()
    }
}

impl RuntimeAdapter {
    pub fn new(
        definitions: Observation<ProcessDefinition>,
        resolver: Arc<dyn CallableElementResolver>,
    ) -> Self {
        Self { definitions, resolver, in_flight: JoinSet::new(), observing: true }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Yields resolved maps in completion order. Failed resolutions are logged and skipped.
    pub async fn next_map(&mut self) -> Option<DelegationMap> {
        loop {
            tokio::select! {
                definition = self.definitions.next(), if self.observing => match definition {
                    Some(definition) => self.request(definition.id().clone()),
                    None => self.observing = false,
                },
                Some(joined) = self.in_flight.join_next() => match joined {
                    Ok((_, Ok(map))) => return Some(map),
                    Ok((process_definition, Err(err))) => {
                        tracing::warn!(
                            process_definition = %process_definition,
                            error = %err,
                            "failed to resolve linked callable elements"
                        );
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "linked callable elements request aborted");
                    }
                },
                else => return None,
            }
        }
    }

    fn request(&mut self, process_definition: ProcessDefinitionId) {
        tracing::debug!(process_definition = %process_definition, "resolving call activities");
        let resolver = Arc::clone(&self.resolver);
        self.in_flight.spawn(async move {
            let result = resolver.linked_callable_elements(&process_definition).await;
            (process_definition, result)
        });
    }
}
