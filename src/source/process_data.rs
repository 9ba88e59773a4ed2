// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callout-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Observable process data shared by the views of one process page.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::model::{ActivityInstanceMap, ProcessDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservedKey {
    ActivityIdToInstancesMap,
    ProcessDefinition,
}

impl ObservedKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActivityIdToInstancesMap => "activityIdToInstancesMap",
            Self::ProcessDefinition => "processDefinition",
        }
    }
}

impl fmt::Display for ObservedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest-value store per observed key.
///
/// Every `provide_*` call reaches every live subscriber, even when several land before the
/// subscriber polls again.
#[derive(Debug, Default)]
pub struct ProcessData {
    activity_instances: Topic<ActivityInstanceMap>,
    process_definition: Topic<ProcessDefinition>,
}

impl ProcessData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide_activity_instances(&self, instances: ActivityInstanceMap) {
        self.activity_instances.publish(instances);
    }

    pub fn provide_process_definition(&self, definition: ProcessDefinition) {
        self.process_definition.publish(definition);
    }

    pub fn observe_activity_instances(&self) -> Observation<ActivityInstanceMap> {
        self.activity_instances.subscribe()
    }

    pub fn observe_process_definition(&self) -> Observation<ProcessDefinition> {
        self.process_definition.subscribe()
    }

    pub fn observer_count(&self, key: ObservedKey) -> usize {
        match key {
            ObservedKey::ActivityIdToInstancesMap => self.activity_instances.subscriber_count(),
            ObservedKey::ProcessDefinition => self.process_definition.subscriber_count(),
        }
    }
}

#[derive(Debug)]
struct TopicState<T> {
    current: Option<T>,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

/// One observed key: the current value plus a queue per subscriber.
#[derive(Debug)]
struct Topic<T> {
    state: Mutex<TopicState<T>>,
}

impl<T> Default for Topic<T> {
    fn default() -> Self {
        Self { state: Mutex::new(TopicState { current: None, subscribers: Vec::new() }) }
    }
}

impl<T: Clone> Topic<T> {
    fn lock(&self) -> MutexGuard<'_, TopicState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, value: T) {
        let mut state = self.lock();
        state.subscribers.retain(|subscriber| subscriber.send(value.clone()).is_ok());
        state.current = Some(value);
    }

    fn subscribe(&self) -> Observation<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.lock();
        if let Some(current) = &state.current {
            // the receiver is alive, so this cannot fail
            let _ = sender.send(current.clone());
        }
        state.subscribers.push(sender);
        Observation { receiver }
    }

    fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|subscriber| !subscriber.is_closed());
        state.subscribers.len()
    }
}

/// A subscription to one key. Yields the current value first (if any), then every update in
/// the order it was provided.
#[derive(Debug)]
pub struct Observation<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T> Observation<T> {
    /// Waits for the next value. Returns `None` once the data source is gone and every queued
    /// value has been taken.
    ///
    /// Cancel safe.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}
