// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static resolution of call-activity targets.
//!
//! The runtime view asks a [`CallableElementResolver`] which process definition every call
//! activity of a definition is bound to. [`StaticMappingResolver`] answers that from an
//! in-memory [`DefinitionRepository`] using the engine's binding rules; remote hosts implement
//! the trait over their API and can decode responses with [`parse_linked_callable_elements`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    DelegationMap, DelegationTarget, FlowNodeId, ProcessDefinition, ProcessDefinitionId,
};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("process definition {0} not found")]
    NotFound(ProcessDefinitionId),
    #[error("resolution request failed: {0}")]
    Transport(String),
    #[error("invalid linked callable elements response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[async_trait]
pub trait CallableElementResolver: Send + Sync {
    /// Maps every call activity of `process_definition_id` to its statically bound target.
    async fn linked_callable_elements(
        &self,
        process_definition_id: &ProcessDefinitionId,
    ) -> Result<DelegationMap, ResolveError>;
}

/// Decodes `{"<nodeId>": "<definitionId>" | null, ...}`.
pub fn parse_linked_callable_elements(raw: &str) -> Result<DelegationMap, ResolveError> {
    let wire: BTreeMap<FlowNodeId, Option<ProcessDefinitionId>> = serde_json::from_str(raw)?;
    Ok(wire
        .into_iter()
        .map(|(node_id, definition_id)| (node_id, DelegationTarget::from_definition(definition_id)))
        .collect())
}

/// Which version of the called process a call activity binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalledElementBinding {
    Latest,
    /// The definition deployed together with the caller.
    Deployment,
    Version(u32),
    /// A version given as an expression; only known once the activity runs.
    VersionExpression(String),
    VersionTag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalledElement {
    activity_id: FlowNodeId,
    key: String,
    binding: CalledElementBinding,
    tenant_id: Option<String>,
}

impl CalledElement {
    pub fn new(
        activity_id: FlowNodeId,
        key: impl Into<String>,
        binding: CalledElementBinding,
    ) -> Self {
        Self { activity_id, key: key.into(), binding, tenant_id: None }
    }

    /// Binds to definitions of `tenant_id` instead of the caller's tenant.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn activity_id(&self) -> &FlowNodeId {
        &self.activity_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn binding(&self) -> &CalledElementBinding {
        &self.binding
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Whether any part of the binding (key, version, version tag or tenant) is an expression
    /// evaluated per execution.
    pub fn is_dynamic(&self) -> bool {
        let binding_is_expression = match &self.binding {
            CalledElementBinding::VersionExpression(_) => true,
            CalledElementBinding::VersionTag(tag) => is_expression(tag),
            CalledElementBinding::Latest
            | CalledElementBinding::Deployment
            | CalledElementBinding::Version(_) => false,
        };
        is_expression(&self.key)
            || binding_is_expression
            || self.tenant_id().is_some_and(is_expression)
    }
}

/// `${..}` and `#{..}` values are evaluated per execution.
fn is_expression(value: &str) -> bool {
    let value = value.trim();
    (value.starts_with("${") || value.starts_with("#{")) && value.ends_with('}')
}

#[derive(Debug, Clone)]
struct Deployed {
    definition: ProcessDefinition,
    call_activities: Vec<CalledElement>,
}

/// Deployed process definitions and their call activities.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRepository {
    deployed: BTreeMap<ProcessDefinitionId, Deployed>,
}

impl DefinitionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy(&mut self, definition: ProcessDefinition, call_activities: Vec<CalledElement>) {
        self.deployed.insert(definition.id().clone(), Deployed { definition, call_activities });
    }

    pub fn definition(&self, id: &ProcessDefinitionId) -> Option<&ProcessDefinition> {
        self.deployed.get(id).map(|deployed| &deployed.definition)
    }

    /// Resolves every call activity of `id`. Targets that cannot be bound statically come back
    /// as [`DelegationTarget::RuntimeResolved`].
    pub fn static_mappings(&self, id: &ProcessDefinitionId) -> Result<DelegationMap, ResolveError> {
        let caller = self.deployed.get(id).ok_or_else(|| ResolveError::NotFound(id.clone()))?;

        let mut mappings = DelegationMap::new();
        for called in &caller.call_activities {
            let bound = if called.is_dynamic() {
                None
            } else {
                self.statically_bound(&caller.definition, called)
            };
            mappings.insert(
                called.activity_id().clone(),
                DelegationTarget::from_definition(bound.map(|definition| definition.id().clone())),
            );
        }
        Ok(mappings)
    }

    fn statically_bound(
        &self,
        caller: &ProcessDefinition,
        called: &CalledElement,
    ) -> Option<&ProcessDefinition> {
        let tenant_id = called.tenant_id().or(caller.tenant_id());
        let mut candidates = self
            .deployed
            .values()
            .map(|deployed| &deployed.definition)
            .filter(|definition| definition.key() == called.key())
            .filter(move |definition| definition.tenant_id() == tenant_id);

        match called.binding() {
            CalledElementBinding::Latest => {
                candidates.max_by_key(|definition| definition.version())
            }
            CalledElementBinding::Deployment => {
                let deployment_id = caller.deployment_id()?;
                candidates.find(|definition| definition.deployment_id() == Some(deployment_id))
            }
            CalledElementBinding::Version(version) => {
                candidates.find(|definition| definition.version() == *version)
            }
            CalledElementBinding::VersionExpression(_) => None,
            CalledElementBinding::VersionTag(tag) => candidates
                .filter(|definition| definition.version_tag() == Some(tag.as_str()))
                .max_by_key(|definition| definition.version()),
        }
    }
}

/// Resolves against a local [`DefinitionRepository`].
#[derive(Debug, Clone, Default)]
pub struct StaticMappingResolver {
    repository: DefinitionRepository,
}

impl StaticMappingResolver {
    pub fn new(repository: DefinitionRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &DefinitionRepository {
        &self.repository
    }
}

#[async_trait]
impl CallableElementResolver for StaticMappingResolver {
    async fn linked_callable_elements(
        &self,
        process_definition_id: &ProcessDefinitionId,
    ) -> Result<DelegationMap, ResolveError> {
        self.repository.static_mappings(process_definition_id)
    }
}
