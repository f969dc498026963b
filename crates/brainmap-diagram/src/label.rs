// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Tooltip text for hit-test results
//!
//! Indices in the text are 1-based. The synapse number counts every synapse of the
//! earlier corridors, so it is unique across the whole network.

use crate::hit_test::HitResult;
use crate::model::NetworkModel;
use crate::types::{NeuronId, SynapseId};

/// Tooltip for a hit, or `None` for a miss or an element the model does not have
///
/// # Example
/// ```
/// use brainmap_diagram::label::describe;
/// use brainmap_diagram::model::NetworkModel;
/// use brainmap_diagram::{HitResult, NeuronId};
///
/// let mut model = NetworkModel::new(&[2, 3, 1]).unwrap();
/// model.set_bias(NeuronId::new(1, 0), 0.456).unwrap();
/// let hit = HitResult::NeuronHit { layer: 1, index: 0, distance: 3.0 };
/// assert_eq!(
///     describe(&model, &hit).unwrap(),
///     "Neuron 1 at Layer 2\nIts Bias is 0.46"
/// );
/// ```
pub fn describe(model: &NetworkModel, hit: &HitResult) -> Option<String> {
    match *hit {
        HitResult::NeuronHit { layer, index, .. } => describe_neuron(model, NeuronId::new(layer, index)),
        HitResult::SynapseHit {
            layer,
            source,
            target,
            ..
        } => describe_synapse(model, SynapseId::new(layer, source, target)),
        HitResult::Miss => None,
    }
}

pub fn describe_neuron(model: &NetworkModel, id: NeuronId) -> Option<String> {
    let neuron = model.neuron(id)?;
    Some(format!(
        "Neuron {} at Layer {}\nIts Bias is {:.2}",
        id.index + 1,
        id.layer + 1,
        neuron.bias()
    ))
}

pub fn describe_synapse(model: &NetworkModel, id: SynapseId) -> Option<String> {
    let synapse = model.synapse(id)?;
    let number = model.synapse_global_index(id)? + 1;
    Some(format!(
        "Synapse {} that goes\nNeuron from {} to {} at Layer {}\nIts Weight is {:.2}",
        number,
        id.source + 1,
        id.target + 1,
        id.layer + 1,
        synapse.weight()
    ))
}
