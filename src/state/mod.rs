//! State management module
//!
//! This module handles all application state:
//! - Shared data structures (data.rs)
//! - The route query coordinator that owns selections, directory and route (coordinator.rs)

pub mod coordinator;
pub mod data;
