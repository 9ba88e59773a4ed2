// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A flat key/value translation catalog.

use std::collections::HashMap;

use thiserror::Error;

use crate::host::Translate;
use crate::overlay::{RUNTIME_LINK_TOOLTIP_KEY, STATIC_LINK_TOOLTIP_KEY};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse translation catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English texts for the overlay tooltips.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        catalog.insert(STATIC_LINK_TOOLTIP_KEY, "Show statically linked process definition");
        catalog.insert(
            RUNTIME_LINK_TOOLTIP_KEY,
            "Linked process definition is resolved at runtime",
        );
        catalog
    }

    /// Loads a JSON object of `"KEY": "text"` pairs.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Entries of `other` win over existing ones.
    pub fn merge(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Translate for Catalog {
    /// Unknown keys translate to themselves.
    fn instant(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError};
    use crate::host::Translate;
    use crate::overlay::STATIC_LINK_TOOLTIP_KEY;

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        assert_eq!(Catalog::new().instant("UNKNOWN_KEY"), "UNKNOWN_KEY");
    }

    #[test]
    fn json_catalog_overrides_builtin_english() {
        let mut catalog = Catalog::english();
        let german =
            Catalog::from_json(r#"{"PLGN_CALL_ACTIVITY_STATIC_LINK":"Statisch verknüpft"}"#)
                .unwrap();
        catalog.merge(german);

        assert_eq!(catalog.instant(STATIC_LINK_TOOLTIP_KEY), "Statisch verknüpft");
        assert_eq!(
            catalog.instant("PLGN_CALL_ACTIVITY_RUNTIME_LINK"),
            "Linked process definition is resolved at runtime"
        );
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = Catalog::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
        assert!(err.to_string().starts_with("failed to parse translation catalog"));
    }
}
