// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Network model
//!
//! Owns the neurons and synapses of one layer-count array, built from the layout
//! engine output. Geometry is fixed at construction; biases, weights and output
//! readouts are written by the host and every write raises a change notification,
//! even when the value does not change.
//!
//! ## Example
//!
//! ```
//! use brainmap_diagram::model::NetworkModel;
//! use brainmap_diagram::NeuronId;
//! use std::sync::{Arc, Mutex};
//!
//! let mut model = NetworkModel::new(&[2, 3, 1]).unwrap();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! model
//!     .on_bias_changed(NeuronId::new(1, 2), move |change| sink.lock().unwrap().push(change.value))
//!     .unwrap();
//!
//! model.set_bias(NeuronId::new(1, 2), 0.75).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![0.75]);
//! ```

pub mod neuron;
pub mod observer;
pub mod synapse;

pub use neuron::{Neuron, NeuronKind, NeuronStyle};
pub use observer::{ChangeCallback, ElementId, ScalarChange, ScalarKind};
pub use synapse::Synapse;

use observer::ObserverRegistry;
use rand::Rng;
use tracing::{debug, warn};

use crate::hit_test::{HitResult, HitTester};
use crate::layout::{layout_with, Layout, LayoutParams};
use crate::types::{DiagramError, NeuronId, Point, Result, SubscriptionId, SynapseId};

/// Neurons, synapses and their mutable scalars
#[derive(Debug)]
pub struct NetworkModel {
    layout: Layout,
    neurons: Vec<Vec<Neuron>>,
    synapses: Vec<Vec<Synapse>>,
    observers: ObserverRegistry,
}

impl NetworkModel {
    /// Build with default geometry and all scalars at 0
    pub fn new(layer_sizes: &[usize]) -> Result<Self> {
        Self::with_params(layer_sizes, &LayoutParams::default())
    }

    /// Build with explicit geometry and all scalars at 0
    pub fn with_params(layer_sizes: &[usize], params: &LayoutParams) -> Result<Self> {
        let layout = layout_with(layer_sizes, params)?;
        let layer_count = layout.layer_count();

        let neurons: Vec<Vec<Neuron>> = layout
            .neurons
            .iter()
            .enumerate()
            .map(|(layer, placements)| {
                let kind = NeuronKind::for_layer(layer, layer_count);
                placements
                    .iter()
                    .map(|p| Neuron::new(p.id, kind, p.bounds, 0.0))
                    .collect()
            })
            .collect();

        let synapses: Vec<Vec<Synapse>> = layout
            .synapses
            .iter()
            .map(|corridor| {
                corridor
                    .iter()
                    .map(|p| Synapse::new(p.id, p.start, p.end, 0.0))
                    .collect()
            })
            .collect();

        debug!(
            target: "brainmap-diagram",
            "Built network {:?}: {} neurons, {} synapses, canvas {}x{}",
            layer_sizes,
            neurons.iter().map(Vec::len).sum::<usize>(),
            layout.total_synapses(),
            layout.canvas.width,
            layout.canvas.height
        );

        Ok(Self {
            layout,
            neurons,
            synapses,
            observers: ObserverRegistry::default(),
        })
    }

    /// Build with biases and weights drawn uniformly from `[0, 1)`
    ///
    /// Pass a seeded generator (`StdRng::seed_from_u64`) for reproducible diagrams.
    pub fn with_random_scalars<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        params: &LayoutParams,
        rng: &mut R,
    ) -> Result<Self> {
        let mut model = Self::with_params(layer_sizes, params)?;
        for neuron in model.neurons.iter_mut().flatten() {
            neuron.bias = rng.gen::<f32>();
        }
        for synapse in model.synapses.iter_mut().flatten() {
            synapse.weight = rng.gen::<f32>();
        }
        Ok(model)
    }

    /// Redraw every bias and weight from `[0, 1)`, notifying observers for each write
    pub fn randomize_scalars<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let neuron_ids: Vec<NeuronId> = self.iter_neurons().map(Neuron::id).collect();
        for id in neuron_ids {
            let value = rng.gen::<f32>();
            self.write_bias(id, value);
        }
        let synapse_ids: Vec<SynapseId> = self.iter_synapses().map(Synapse::id).collect();
        for id in synapse_ids {
            let value = rng.gen::<f32>();
            self.write_weight(id, value);
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layout.layer_sizes
    }

    pub fn layer_count(&self) -> usize {
        self.layout.layer_count()
    }

    /// Neurons of one layer
    pub fn layer(&self, layer: usize) -> Option<&[Neuron]> {
        self.neurons.get(layer).map(Vec::as_slice)
    }

    /// Synapses between `layer` and `layer + 1`, row-major by (source, target)
    pub fn corridor(&self, layer: usize) -> Option<&[Synapse]> {
        self.synapses.get(layer).map(Vec::as_slice)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.layer)?.get(id.index)
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        let flat = self.flat_synapse_index(id)?;
        self.synapses.get(id.layer)?.get(flat)
    }

    pub fn iter_neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.neurons.iter().flatten()
    }

    pub fn iter_synapses(&self) -> impl Iterator<Item = &Synapse> {
        self.synapses.iter().flatten()
    }

    /// 0-based position of a synapse when all corridors are concatenated in order
    pub fn synapse_global_index(&self, id: SynapseId) -> Option<usize> {
        let flat = self.flat_synapse_index(id)?;
        let before: usize = self.synapses[..id.layer].iter().map(Vec::len).sum();
        Some(before + flat)
    }

    /// Resolve a pointer position to the nearest element
    pub fn hit_test(&self, point: Point) -> HitResult {
        HitTester::new(&self.layout).query(point)
    }

    fn flat_synapse_index(&self, id: SynapseId) -> Option<usize> {
        let sources = *self.layout.layer_sizes.get(id.layer)?;
        let targets = *self.layout.layer_sizes.get(id.layer + 1)?;
        (id.source < sources && id.target < targets).then(|| id.source * targets + id.target)
    }

    // ------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------

    pub fn bias(&self, id: NeuronId) -> Option<f32> {
        self.neuron(id).map(Neuron::bias)
    }

    pub fn weight(&self, id: SynapseId) -> Option<f32> {
        self.synapse(id).map(Synapse::weight)
    }

    /// Set a neuron bias and notify observers
    ///
    /// # Errors
    /// `NeuronNotFound` for an unknown id, `InvalidScalar` for NaN/infinite values.
    pub fn set_bias(&mut self, id: NeuronId, value: f32) -> Result<()> {
        if self.neuron(id).is_none() {
            return Err(DiagramError::NeuronNotFound(id));
        }
        check_finite(&id.to_string(), value)?;
        self.write_bias(id, value);
        Ok(())
    }

    /// Set a synapse weight and notify observers
    pub fn set_weight(&mut self, id: SynapseId, value: f32) -> Result<()> {
        if self.synapse(id).is_none() {
            return Err(DiagramError::SynapseNotFound(id));
        }
        check_finite(&id.to_string(), value)?;
        self.write_weight(id, value);
        Ok(())
    }

    fn write_bias(&mut self, id: NeuronId, value: f32) {
        self.neurons[id.layer][id.index].bias = value;
        self.observers.notify(&ScalarChange {
            element: ElementId::Neuron(id),
            kind: ScalarKind::Bias,
            value,
        });
    }

    fn write_weight(&mut self, id: SynapseId, value: f32) {
        let targets = self.layout.layer_sizes[id.layer + 1];
        self.synapses[id.layer][id.source * targets + id.target].weight = value;
        self.observers.notify(&ScalarChange {
            element: ElementId::Synapse(id),
            kind: ScalarKind::Weight,
            value,
        });
    }

    fn write_output(&mut self, index: usize, value: f32) {
        let layer = self.layer_count() - 1;
        self.neurons[layer][index].output = Some(value);
        self.observers.notify(&ScalarChange {
            element: ElementId::Neuron(NeuronId::new(layer, index)),
            kind: ScalarKind::Output,
            value,
        });
    }

    /// Smallest and largest bias over all neurons
    pub fn bias_range(&self) -> (f32, f32) {
        min_max(self.iter_neurons().map(Neuron::bias))
    }

    /// Smallest and largest weight over all synapses
    pub fn weight_range(&self) -> (f32, f32) {
        min_max(self.iter_synapses().map(Synapse::weight))
    }

    // ------------------------------------------------------------------
    // Input / output views
    // ------------------------------------------------------------------

    /// Biases of the input layer, in order
    pub fn input(&self) -> Vec<f32> {
        self.neurons[0].iter().map(Neuron::bias).collect()
    }

    /// Write all input values at once; nothing is written if any value is rejected
    pub fn set_input(&mut self, values: &[f32]) -> Result<()> {
        let ids: Vec<NeuronId> = self.neurons[0].iter().map(Neuron::id).collect();
        check_len(ids.len(), values.len())?;
        for (id, &value) in ids.iter().zip(values) {
            check_finite(&id.to_string(), value)?;
        }
        for (id, &value) in ids.into_iter().zip(values) {
            self.write_bias(id, value);
        }
        Ok(())
    }

    pub fn set_input_at(&mut self, index: usize, value: f32) -> Result<()> {
        self.set_bias(NeuronId::new(0, index), value)
    }

    /// Output readouts of the last layer, in order
    pub fn output(&self) -> Vec<f32> {
        self.output_layer()
            .iter()
            .map(|n| n.output.unwrap_or_default())
            .collect()
    }

    /// Write all output readouts at once; nothing is written if any value is rejected
    pub fn set_output(&mut self, values: &[f32]) -> Result<()> {
        let layer = self.layer_count() - 1;
        check_len(self.output_layer().len(), values.len())?;
        for (index, &value) in values.iter().enumerate() {
            check_finite(&NeuronId::new(layer, index).to_string(), value)?;
        }
        for (index, &value) in values.iter().enumerate() {
            self.write_output(index, value);
        }
        Ok(())
    }

    pub fn set_output_at(&mut self, index: usize, value: f32) -> Result<()> {
        let layer = self.layer_count() - 1;
        let id = NeuronId::new(layer, index);
        if index >= self.output_layer().len() {
            return Err(DiagramError::NeuronNotFound(id));
        }
        check_finite(&id.to_string(), value)?;
        self.write_output(index, value);
        Ok(())
    }

    fn output_layer(&self) -> &[Neuron] {
        &self.neurons[self.neurons.len() - 1]
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    pub fn on_bias_changed<F>(&mut self, id: NeuronId, callback: F) -> Result<SubscriptionId>
    where
        F: FnMut(&ScalarChange) + Send + 'static,
    {
        if self.neuron(id).is_none() {
            return Err(DiagramError::NeuronNotFound(id));
        }
        Ok(self
            .observers
            .subscribe(ElementId::Neuron(id), ScalarKind::Bias, Box::new(callback)))
    }

    pub fn on_weight_changed<F>(&mut self, id: SynapseId, callback: F) -> Result<SubscriptionId>
    where
        F: FnMut(&ScalarChange) + Send + 'static,
    {
        if self.synapse(id).is_none() {
            return Err(DiagramError::SynapseNotFound(id));
        }
        Ok(self
            .observers
            .subscribe(ElementId::Synapse(id), ScalarKind::Weight, Box::new(callback)))
    }

    /// Subscribe to the readout of output neuron `index`
    pub fn on_output_changed<F>(&mut self, index: usize, callback: F) -> Result<SubscriptionId>
    where
        F: FnMut(&ScalarChange) + Send + 'static,
    {
        let id = NeuronId::new(self.layer_count() - 1, index);
        if index >= self.output_layer().len() {
            return Err(DiagramError::NeuronNotFound(id));
        }
        Ok(self
            .observers
            .subscribe(ElementId::Neuron(id), ScalarKind::Output, Box::new(callback)))
    }

    /// Subscribe to every scalar write in the model
    pub fn on_any_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ScalarChange) + Send + 'static,
    {
        self.observers.subscribe_all(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        if self.observers.unsubscribe(id) {
            Ok(())
        } else {
            Err(DiagramError::SubscriptionNotFound(id))
        }
    }
}

fn check_finite(element: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        return Ok(());
    }
    warn!(target: "brainmap-diagram", "Rejected non-finite scalar {} for {}", value, element);
    Err(DiagramError::InvalidScalar {
        element: element.to_string(),
        value,
    })
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(DiagramError::ArraySizeMismatch { expected, actual })
    }
}

fn min_max(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}
