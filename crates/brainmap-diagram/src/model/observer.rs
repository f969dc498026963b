// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Change notification for mutable scalars
//!
//! Every write to a bias, weight or output readout is reported synchronously to the
//! callbacks registered for that element and to every catch-all callback, in
//! registration order. Callbacks only see the change record, so they cannot write
//! back into the model while it is being notified.

use std::collections::HashMap;

use crate::types::{NeuronId, SubscriptionId, SynapseId};

/// Element that owns a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Neuron(NeuronId),
    Synapse(SynapseId),
}

/// Which scalar of the element changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bias,
    Weight,
    Output,
}

/// Record passed to change callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarChange {
    pub element: ElementId,
    pub kind: ScalarKind,
    pub value: f32,
}

pub type ChangeCallback = Box<dyn FnMut(&ScalarChange) + Send>;

type Key = (ElementId, ScalarKind);

struct Subscriber {
    id: SubscriptionId,
    callback: ChangeCallback,
}

/// Observer lists keyed by (element, scalar) plus catch-all subscribers
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    by_key: HashMap<Key, Vec<Subscriber>>,
    global: Vec<Subscriber>,
}

impl ObserverRegistry {
    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    pub(crate) fn subscribe(
        &mut self,
        element: ElementId,
        kind: ScalarKind,
        callback: ChangeCallback,
    ) -> SubscriptionId {
        let id = self.allocate();
        self.by_key
            .entry((element, kind))
            .or_default()
            .push(Subscriber { id, callback });
        id
    }

    pub(crate) fn subscribe_all(&mut self, callback: ChangeCallback) -> SubscriptionId {
        let id = self.allocate();
        self.global.push(Subscriber { id, callback });
        id
    }

    /// Returns `false` when the id is unknown
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(pos) = self.global.iter().position(|s| s.id == id) {
            self.global.remove(pos);
            return true;
        }
        for list in self.by_key.values_mut() {
            if let Some(pos) = list.iter().position(|s| s.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub(crate) fn notify(&mut self, change: &ScalarChange) {
        if let Some(list) = self.by_key.get_mut(&(change.element, change.kind)) {
            for subscriber in list.iter_mut() {
                (subscriber.callback)(change);
            }
        }
        for subscriber in self.global.iter_mut() {
            (subscriber.callback)(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.global.len() + self.by_key.values().map(Vec::len).sum::<usize>()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn bias_of(layer: usize, index: usize, value: f32) -> ScalarChange {
        ScalarChange {
            element: ElementId::Neuron(NeuronId::new(layer, index)),
            kind: ScalarKind::Bias,
            value,
        }
    }

    #[test]
    fn test_keyed_subscriber_only_sees_its_element() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut registry = ObserverRegistry::default();
        registry.subscribe(
            ElementId::Neuron(NeuronId::new(0, 1)),
            ScalarKind::Bias,
            Box::new(move |change| sink.lock().unwrap().push(change.value)),
        );

        registry.notify(&bias_of(0, 0, 1.0));
        registry.notify(&bias_of(0, 1, 2.0));
        registry.notify(&bias_of(0, 1, 2.0));

        assert_eq!(*seen.lock().unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_global_subscriber_sees_everything() {
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let mut registry = ObserverRegistry::default();
        registry.subscribe_all(Box::new(move |_| *sink.lock().unwrap() += 1));

        registry.notify(&bias_of(0, 0, 1.0));
        registry.notify(&bias_of(3, 2, 1.0));

        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = ObserverRegistry::default();
        let a = registry.subscribe_all(Box::new(|_| {}));
        let b = registry.subscribe(
            ElementId::Neuron(NeuronId::new(0, 0)),
            ScalarKind::Bias,
            Box::new(|_| {}),
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.unsubscribe(b));
        assert!(registry.unsubscribe(a));
        assert!(!registry.unsubscribe(a));
        assert_eq!(registry.len(), 0);
    }
}
