// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Diagram elements, typed ids and the delegation data that overlays are built from.

pub mod delegation;
pub mod element;
pub mod ids;

pub use delegation::{ActivityInstanceMap, DelegationMap, DelegationTarget, ProcessDefinition};
pub use element::{CallActivity, DiagramElement, ElementKind};
pub use ids::{ActivityInstanceId, FlowNodeId, Id, IdError, ProcessDefinitionId};
