// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Call-activity discovery and the history-mode filter.

use crate::model::{
    ActivityInstanceMap, CallActivity, DelegationMap, DelegationTarget, DiagramElement,
    ElementKind, FlowNodeId,
};

/// Returns the call-activity nodes of a diagram, in registry order.
pub fn discover_call_activities(elements: &[DiagramElement]) -> Vec<CallActivity> {
    elements
        .iter()
        .filter(|element| *element.kind() == ElementKind::CallActivity)
        .map(|element| {
            CallActivity::new(element.id().clone(), element.called_element().map(str::to_owned))
        })
        .collect()
}

/// Restricts observed instance data to call activities that actually started something.
///
/// Keeps keys present in both `flow_nodes` and `instances` whose instance list is non-empty.
pub fn call_activities_map(
    flow_nodes: &[FlowNodeId],
    instances: &ActivityInstanceMap,
) -> DelegationMap {
    let mut map = DelegationMap::new();
    for node_id in flow_nodes {
        let Some(node_instances) = instances.get(node_id) else {
            continue;
        };
        if let Some(target) = DelegationTarget::from_instances(node_instances.clone()) {
            map.insert(node_id.clone(), target);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{call_activities_map, discover_call_activities};
    use crate::model::{
        ActivityInstanceId, ActivityInstanceMap, DelegationTarget, DiagramElement, ElementKind,
        FlowNodeId,
    };

    fn node(id: &str) -> FlowNodeId {
        FlowNodeId::new(id).expect("node id")
    }

    fn instances(entries: Vec<(&str, Vec<&str>)>) -> ActivityInstanceMap {
        entries
            .into_iter()
            .map(|(node_id, ids)| {
                let ids = ids.into_iter().map(|id| ActivityInstanceId::new(id).unwrap()).collect();
                (node(node_id), ids)
            })
            .collect()
    }

    #[test]
    fn discovery_keeps_only_call_activities_in_registry_order() {
        let elements = vec![
            DiagramElement::new(node("Start"), ElementKind::Other("bpmn:StartEvent".to_owned())),
            DiagramElement::call_activity(node("Ship"), "shipping"),
            DiagramElement::new(node("Review"), ElementKind::Other("bpmn:UserTask".to_owned())),
            DiagramElement::call_activity(node("Bill"), "${billingProcess}"),
        ];

        let found = discover_call_activities(&elements);

        let ids: Vec<&str> = found.iter().map(|activity| activity.id().as_str()).collect();
        assert_eq!(ids, ["Ship", "Bill"]);
        assert_eq!(found[0].called_element(), Some("shipping"));
        assert_eq!(found[1].called_element(), Some("${billingProcess}"));
    }

    #[test]
    fn discovery_of_a_diagram_without_call_activities_is_empty() {
        let elements =
            vec![DiagramElement::new(node("Task"), ElementKind::Other("bpmn:Task".to_owned()))];
        assert!(discover_call_activities(&elements).is_empty());
    }

    #[test]
    fn filter_keeps_known_nodes_with_instances() {
        let flow_nodes = [node("A"), node("B")];
        let observed = instances(vec![("A", vec![]), ("B", vec!["i1"]), ("C", vec!["i2"])]);

        let map = call_activities_map(&flow_nodes, &observed);

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("B"),
            Some(&DelegationTarget::Instances(vec![ActivityInstanceId::new("i1").unwrap()]))
        );
    }

    #[rstest]
    #[case::no_flow_nodes(vec![], vec![("A", vec!["i1"])], 0)]
    #[case::no_observed_data(vec!["A"], vec![], 0)]
    #[case::all_match(vec!["A", "B"], vec![("A", vec!["i1"]), ("B", vec!["i2", "i3"])], 2)]
    fn filter_result_size(
        #[case] flow_nodes: Vec<&str>,
        #[case] observed: Vec<(&str, Vec<&str>)>,
        #[case] expected: usize,
    ) {
        let flow_nodes: Vec<FlowNodeId> = flow_nodes.into_iter().map(node).collect();
        let map = call_activities_map(&flow_nodes, &instances(observed));
        assert_eq!(map.len(), expected);
    }
}
