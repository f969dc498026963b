// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # brainmap-observability
//!
//! Logging setup shared by every brainmap binary.
//!
//! Library crates only emit `tracing` events with their crate name as target; this
//! crate decides where those events go and at which level, with per-crate debug
//! flags (`--debug-brainmap-diagram`, `--debug-all`, `BRAINMAP_DEBUG`).
//!
//! ## Features
//! - `file-logging`: per-run log folders with daily rotation

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known brainmap crate names (and tracing targets) for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "brainmap",
    "brainmap-diagram",
    "brainmap-config",
    "brainmap-observability",
];
