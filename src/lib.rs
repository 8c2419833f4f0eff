//! Pippin - a flappy pig for the terminal.
//!
//! This module exposes the game core, world and scene for testing and
//! for the binary.

pub mod app;
pub mod audio;
pub mod build_info;
pub mod config;
pub mod core;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod scene;
pub mod utils;
pub mod world;

// Rendering is tightly coupled to the terminal; only the binary draws
pub mod ui;
