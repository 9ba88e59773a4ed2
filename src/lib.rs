// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Callout — interactive call-activity overlays for rendered process diagrams.
//!
//! For every call activity in a diagram the [`controller::OverlayController`] anchors a small
//! marker to the node, shows it while the pointer hovers the node or the marker, and navigates
//! to the called process definition on click when that target is statically known. Delegation
//! data comes either from observed activity instances (history view) or from resolving the
//! process definition (runtime view), see [`source`].

pub mod config;
pub mod controller;
pub mod discovery;
pub mod host;
pub mod i18n;
pub mod model;
pub mod navigation;
pub mod overlay;
pub mod source;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, ControllerConfig, ViewContext};
pub use controller::{OverlayController, OverlayDriver};
