// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Controller configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const HISTORY_VIEW: &str = "history";
const RUNTIME_VIEW: &str = "runtime";

const DEFAULT_NODE_HIDE_DELAY_MS: u64 = 50;
const DEFAULT_OVERLAY_HIDE_DELAY_MS: u64 = 100;
const DEFAULT_PASSIVE_OPACITY: f32 = 0.6;

/// The cockpit view an overlay controller is mounted in.
///
/// `"history"` selects instance data from the history view; every other value selects static
/// resolution. The raw value is also the last segment of navigation URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ViewContext(String);

impl ViewContext {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() || value.contains('/') {
            return Err(ConfigError::InvalidViewContext(value));
        }
        Ok(Self(value))
    }

    pub fn history() -> Self {
        Self(HISTORY_VIEW.to_owned())
    }

    pub fn runtime() -> Self {
        Self(RUNTIME_VIEW.to_owned())
    }

    pub fn is_history(&self) -> bool {
        self.0 == HISTORY_VIEW
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::runtime()
    }
}

impl fmt::Display for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ViewContext {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid view context {0:?} (must be a non-empty path segment)")]
    InvalidViewContext(String),
    #[error("passive opacity must be within 0.0..=1.0, got {0}")]
    InvalidOpacity(f32),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    pub view_context: ViewContext,
    /// Hide delay after the pointer leaves the diagram node.
    pub node_hide_delay_ms: u64,
    /// Hide delay after the pointer leaves the overlay itself.
    pub overlay_hide_delay_ms: u64,
    /// Opacity of overlays whose target is only resolved at runtime.
    pub passive_opacity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            view_context: ViewContext::default(),
            node_hide_delay_ms: DEFAULT_NODE_HIDE_DELAY_MS,
            overlay_hide_delay_ms: DEFAULT_OVERLAY_HIDE_DELAY_MS,
            passive_opacity: DEFAULT_PASSIVE_OPACITY,
        }
    }
}

impl ControllerConfig {
    pub fn new(view_context: ViewContext) -> Self {
        Self { view_context, ..Self::default() }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.passive_opacity) {
            return Err(ConfigError::InvalidOpacity(self.passive_opacity));
        }
        Ok(())
    }

    pub fn node_hide_delay(&self) -> Duration {
        Duration::from_millis(self.node_hide_delay_ms)
    }

    pub fn overlay_hide_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_hide_delay_ms)
    }
}
