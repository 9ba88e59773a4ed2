// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{ActivityInstanceId, FlowNodeId, ProcessDefinitionId};

/// Where a call activity delegated (or will delegate) execution to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegationTarget {
    /// The destination is only known once the activity runs.
    RuntimeResolved,
    /// A statically linked process definition.
    Definition(ProcessDefinitionId),
    /// Instances that were started by this node. Never empty.
    Instances(Vec<ActivityInstanceId>),
}

impl DelegationTarget {
    pub fn from_definition(definition_id: Option<ProcessDefinitionId>) -> Self {
        match definition_id {
            Some(definition_id) => Self::Definition(definition_id),
            None => Self::RuntimeResolved,
        }
    }

    /// Returns `None` for an empty instance list.
    pub fn from_instances(instances: Vec<ActivityInstanceId>) -> Option<Self> {
        if instances.is_empty() {
            None
        } else {
            Some(Self::Instances(instances))
        }
    }

    /// Whether the target is statically known (and therefore navigable).
    pub fn is_static(&self) -> bool {
        !matches!(self, Self::RuntimeResolved)
    }

    /// The URL path segment naming this target, if it is statically known.
    pub fn path_segment(&self) -> Option<String> {
        match self {
            Self::RuntimeResolved => None,
            Self::Definition(definition_id) => Some(definition_id.to_string()),
            Self::Instances(instances) => Some(
                instances.iter().map(ActivityInstanceId::as_str).collect::<Vec<_>>().join(","),
            ),
        }
    }
}

/// Node id to delegation target. Rebuilt, never merged, on every update.
pub type DelegationMap = BTreeMap<FlowNodeId, DelegationTarget>;

/// Activity instances per flow node, as observed in the history view.
pub type ActivityInstanceMap = BTreeMap<FlowNodeId, Vec<ActivityInstanceId>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    id: ProcessDefinitionId,
    key: String,
    version: u32,
    #[serde(default)]
    version_tag: Option<String>,
    #[serde(default)]
    deployment_id: Option<String>,
    #[serde(default)]
    tenant_id: Option<String>,
}

impl ProcessDefinition {
    pub fn new(id: ProcessDefinitionId, key: impl Into<String>, version: u32) -> Self {
        Self {
            id,
            key: key.into(),
            version,
            version_tag: None,
            deployment_id: None,
            tenant_id: None,
        }
    }

    pub fn id(&self) -> &ProcessDefinitionId {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn version_tag(&self) -> Option<&str> {
        self.version_tag.as_deref()
    }

    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn with_version_tag(mut self, version_tag: impl Into<String>) -> Self {
        self.version_tag = Some(version_tag.into());
        self
    }

    pub fn with_deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}
