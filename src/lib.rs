//! # cxs - scaffolding for CMake-preset C++ trees
//!
//! cxs keeps a small JSON manifest of the libraries and apps in a C++ tree
//! and generates everything derived from it: source skeletons, build and
//! package presets in `CMakeUserPresets.json`, and debugger entries in
//! `.vscode/launch.json`.
//!
//! ## Quick Start
//!
//! ```bash
//! cxs reset --yes
//! cxs lib create mathutils
//! cxs app create sim --lib mathutils
//! cxs app configure sim
//! ```
//!
//! ## Module Organization
//!
//! - [`manifest`] - The manifest and its store
//! - [`project`] - One method per operation
//! - [`scaffold`] / [`templates`] - Source skeletons
//! - [`presets`] / [`launch`] - Derived JSON documents
//! - [`commands`] - CLI command handlers

/// CLI command handlers extracted from main.
pub mod commands;

/// Configuration file parsing (`cxs.toml`).
pub mod config;

/// Error taxonomy.
pub mod error;

/// JSON read/write helpers.
pub mod jsonio;

/// Debugger launch configuration.
pub mod launch;

/// Project manifest and store.
pub mod manifest;

/// `CMakeUserPresets.json` generation.
pub mod presets;

/// Project-level operations.
pub mod project;

/// Staged scaffold writes and removals.
pub mod scaffold;

/// Build targets and build types.
pub mod target;

/// C++ and CMake source templates.
pub mod templates;

/// Terminal UI utilities (tables, colors).
pub mod ui;
