// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::FlowNodeId;

const CALL_ACTIVITY_TYPE: &str = "bpmn:CallActivity";

/// The semantic type of a rendered diagram element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    CallActivity,
    /// Any other semantic type, kept verbatim (e.g. `bpmn:UserTask`).
    Other(String),
}

impl ElementKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CallActivity => CALL_ACTIVITY_TYPE,
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            CALL_ACTIVITY_TYPE => Self::CallActivity,
            other => Self::Other(other.to_owned()),
        })
    }
}

/// One entry of the renderer's element registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramElement {
    id: FlowNodeId,
    kind: ElementKind,
    called_element: Option<String>,
}

impl DiagramElement {
    pub fn new(id: FlowNodeId, kind: ElementKind) -> Self {
        Self { id, kind, called_element: None }
    }

    pub fn call_activity(id: FlowNodeId, called_element: impl Into<String>) -> Self {
        Self { id, kind: ElementKind::CallActivity, called_element: Some(called_element.into()) }
    }

    pub fn id(&self) -> &FlowNodeId {
        &self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The key (or expression) of the process a call activity delegates to.
    pub fn called_element(&self) -> Option<&str> {
        self.called_element.as_deref()
    }

    pub fn with_called_element<T: Into<String>>(mut self, called_element: Option<T>) -> Self {
        self.called_element = called_element.map(Into::into);
        self
    }
}

/// A discovered call-activity node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallActivity {
    id: FlowNodeId,
    called_element: Option<String>,
}

impl CallActivity {
    pub fn new(id: FlowNodeId, called_element: Option<String>) -> Self {
        Self { id, called_element }
    }

    pub fn id(&self) -> &FlowNodeId {
        &self.id
    }

    pub fn called_element(&self) -> Option<&str> {
        self.called_element.as_deref()
    }
}
