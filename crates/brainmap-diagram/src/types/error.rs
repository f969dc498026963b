// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for diagram operations

use super::ids::{NeuronId, SubscriptionId, SynapseId};

/// Errors that can occur while building or mutating a diagram
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagramError {
    /// Layer counts, layout parameters or gradient stops are unusable.
    /// Raised at construction; nothing is partially built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Bias, weight or output value is NaN or infinite
    #[error("Invalid scalar for {element}: {value} is not finite")]
    InvalidScalar { element: String, value: f32 },

    #[error("Neuron not found: {0}")]
    NeuronNotFound(NeuronId),

    #[error("Synapse not found: {0}")]
    SynapseNotFound(SynapseId),

    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(SubscriptionId),

    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ArraySizeMismatch { expected: usize, actual: usize },
}

impl DiagramError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        DiagramError::Configuration(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, DiagramError>;
pub type Error = DiagramError;
