//! Utility modules: persistence helpers.

pub mod persistence;
