// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for neurons, synapses and change subscriptions
//!
//! All indices are 0-based. User-facing text (tooltips) adds one.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neuron ID (layer index + index within the layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronId {
    pub layer: usize,
    pub index: usize,
}

impl NeuronId {
    pub const fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neuron({}:{})", self.layer, self.index)
    }
}

/// Synapse ID
///
/// `layer` is the layer of the source neuron; the target lives in `layer + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynapseId {
    pub layer: usize,
    pub source: usize,
    pub target: usize,
}

impl SynapseId {
    pub const fn new(layer: usize, source: usize, target: usize) -> Self {
        Self {
            layer,
            source,
            target,
        }
    }

    /// Source neuron of this synapse
    pub const fn source_neuron(&self) -> NeuronId {
        NeuronId::new(self.layer, self.source)
    }

    /// Target neuron of this synapse
    pub const fn target_neuron(&self) -> NeuronId {
        NeuronId::new(self.layer + 1, self.target)
    }
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synapse({}:{}->{})", self.layer, self.source, self.target)
    }
}

/// Handle returned when registering a change callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}
