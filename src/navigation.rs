// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::ViewContext;
use crate::model::DelegationTarget;

/// URL of the cockpit page for a delegation target, or `None` if it is only known at runtime.
pub fn navigation_url(target: &DelegationTarget, view_context: &ViewContext) -> Option<String> {
    let segment = target.path_segment()?;
    Some(format!("/process-definition/{segment}/{view_context}"))
}

#[cfg(test)]
mod tests {
    use super::navigation_url;
    use crate::config::ViewContext;
    use crate::model::{ActivityInstanceId, DelegationTarget, ProcessDefinitionId};

    #[test]
    fn definition_targets_link_to_the_definition_page() {
        let target =
            DelegationTarget::Definition(ProcessDefinitionId::new("ship:4:c0ffee").unwrap());
        assert_eq!(
            navigation_url(&target, &ViewContext::runtime()).as_deref(),
            Some("/process-definition/ship:4:c0ffee/runtime")
        );
    }

    #[test]
    fn runtime_resolved_targets_have_no_url() {
        let target = DelegationTarget::RuntimeResolved;
        assert_eq!(navigation_url(&target, &ViewContext::history()), None);
    }

    #[test]
    fn instance_targets_use_the_history_view() {
        let target = DelegationTarget::Instances(vec![ActivityInstanceId::new("i9").unwrap()]);
        assert_eq!(
            navigation_url(&target, &ViewContext::history()).as_deref(),
            Some("/process-definition/i9/history")
        );
    }
}
