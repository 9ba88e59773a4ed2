// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Recording host fakes shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ControllerConfig;
use crate::controller::OverlayController;
use crate::host::{
    Collaborators, DiagramCanvas, ListenerId, Navigate, OverlayHandle, PointerKind, RenderCycle,
    Region,
};
use crate::i18n::Catalog;
use crate::model::{
    DelegationMap, DelegationTarget, DiagramElement, ElementKind, FlowNodeId, ProcessDefinitionId,
};
use crate::overlay::OverlaySpec;
use crate::source::{CallableElementResolver, ResolveError};

pub(crate) fn node(id: &str) -> FlowNodeId {
    FlowNodeId::new(id).expect("node id")
}

pub(crate) fn definition(id: &str) -> DelegationTarget {
    DelegationTarget::Definition(ProcessDefinitionId::new(id).expect("definition id"))
}

/// Two call activities (`Ship`, `Bill`) around a user task.
pub(crate) fn order_diagram() -> Vec<DiagramElement> {
    vec![
        DiagramElement::new(node("Start"), ElementKind::Other("bpmn:StartEvent".to_owned())),
        DiagramElement::call_activity(node("Ship"), "shipping"),
        DiagramElement::new(node("Review"), ElementKind::Other("bpmn:UserTask".to_owned())),
        DiagramElement::call_activity(node("Bill"), "${billingProcess}"),
    ]
}

#[derive(Debug, Default)]
pub(crate) struct CanvasLog {
    pub added: Vec<(FlowNodeId, OverlaySpec)>,
    pub visible: BTreeMap<OverlayHandle, bool>,
    pub tooltips_hidden: Vec<OverlayHandle>,
    pub listeners: BTreeMap<ListenerId, (Region, Vec<PointerKind>)>,
    pub detached: Vec<ListenerId>,
    next_id: u64,
}

impl CanvasLog {
    pub fn is_visible(&self, handle: OverlayHandle) -> bool {
        self.visible.get(&handle).copied().unwrap_or(false)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub(crate) struct FakeCanvas {
    elements: Vec<DiagramElement>,
    log: Rc<RefCell<CanvasLog>>,
}

impl DiagramCanvas for FakeCanvas {
    fn elements(&self) -> Vec<DiagramElement> {
        self.elements.clone()
    }

    fn add_overlay(&mut self, node_id: &FlowNodeId, spec: OverlaySpec) -> OverlayHandle {
        let mut log = self.log.borrow_mut();
        let handle = OverlayHandle(log.next_id());
        log.visible.insert(handle, spec.visible);
        log.added.push((node_id.clone(), spec));
        handle
    }

    fn set_overlay_visible(&mut self, handle: OverlayHandle, visible: bool) {
        self.log.borrow_mut().visible.insert(handle, visible);
    }

    fn hide_tooltip(&mut self, handle: OverlayHandle) {
        self.log.borrow_mut().tooltips_hidden.push(handle);
    }

    fn listen(&mut self, region: &Region, kinds: &[PointerKind]) -> ListenerId {
        let mut log = self.log.borrow_mut();
        let listener = ListenerId(log.next_id());
        log.listeners.insert(listener, (region.clone(), kinds.to_vec()));
        listener
    }

    fn unlisten(&mut self, listener: ListenerId) {
        let mut log = self.log.borrow_mut();
        log.listeners.remove(&listener);
        log.detached.push(listener);
    }
}

pub(crate) struct RecordingNavigator {
    urls: Rc<RefCell<Vec<String>>>,
}

impl Navigate for RecordingNavigator {
    fn navigate(&mut self, url: &str) {
        self.urls.borrow_mut().push(url.to_owned());
    }
}

pub(crate) struct RecordingRenderCycle {
    commits: Rc<Cell<usize>>,
    in_progress: Rc<Cell<bool>>,
}

impl RenderCycle for RecordingRenderCycle {
    fn in_progress(&self) -> bool {
        self.in_progress.get()
    }

    fn commit(&mut self) {
        self.commits.set(self.commits.get() + 1);
    }
}

/// Shared views into everything the fakes record.
#[derive(Clone, Default)]
pub(crate) struct Recorded {
    pub canvas: Rc<RefCell<CanvasLog>>,
    pub urls: Rc<RefCell<Vec<String>>>,
    pub commits: Rc<Cell<usize>>,
    pub in_render_cycle: Rc<Cell<bool>>,
}

impl Recorded {
    pub fn collaborators(&self, elements: Vec<DiagramElement>) -> Collaborators {
        let canvas = FakeCanvas { elements, log: Rc::clone(&self.canvas) };
        let navigator = RecordingNavigator { urls: Rc::clone(&self.urls) };
        let render = RecordingRenderCycle {
            commits: Rc::clone(&self.commits),
            in_progress: Rc::clone(&self.in_render_cycle),
        };
        Collaborators::new(canvas, Catalog::english(), navigator).with_render_cycle(render)
    }

    pub fn active_listeners(&self) -> usize {
        self.canvas.borrow().listeners.len()
    }
}

pub(crate) fn controller_with(
    elements: Vec<DiagramElement>,
    config: ControllerConfig,
) -> (OverlayController, Recorded) {
    let recorded = Recorded::default();
    let controller = OverlayController::new(config, recorded.collaborators(elements));
    (controller, recorded)
}

type Scripted = (Duration, Result<DelegationMap, ResolveError>);

/// Replays scripted responses in request order, each after its own delay.
#[derive(Default)]
pub(crate) struct ScriptedResolver {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<ProcessDefinitionId>>,
}

impl ScriptedResolver {
    /// Answers every request immediately.
    pub fn new(responses: Vec<Result<DelegationMap, ResolveError>>) -> Self {
        Self::delayed(responses.into_iter().map(|response| (0, response)).collect())
    }

    /// The n-th request is answered `delay_ms` after it was made.
    pub fn delayed(responses: Vec<(u64, Result<DelegationMap, ResolveError>)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(delay_ms, response)| (Duration::from_millis(delay_ms), response))
            .collect();
        Self { responses: Mutex::new(responses), calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<ProcessDefinitionId> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl CallableElementResolver for ScriptedResolver {
    async fn linked_callable_elements(
        &self,
        process_definition_id: &ProcessDefinitionId,
    ) -> Result<DelegationMap, ResolveError> {
        self.calls.lock().expect("calls lock").push(process_definition_id.clone());
        let scripted = self.responses.lock().expect("responses lock").pop_front();
        let Some((delay, response)) = scripted else {
            return Err(ResolveError::Transport("no scripted response".to_owned()));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}
