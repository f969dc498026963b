// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Diagram Types Module
//!
//! Core type definitions shared by layout, gradients, the network model and hit-testing.

pub mod color;
pub mod error;
pub mod ids;
pub mod spatial;

// Re-export commonly used types
pub use color::Color;
pub use error::{DiagramError, Error, Result};
pub use ids::{NeuronId, SubscriptionId, SynapseId};
pub use spatial::{Point, Rect, Size};
