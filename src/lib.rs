//! Husky Map
//!
//! A native campus map client. It lists buildings served by a path-finding
//! server, asks that server for the shortest route between two of them and
//! draws the route over a static campus map.

pub mod app;
pub mod config;
pub mod error;
pub mod map;
pub mod net;
pub mod state;
pub mod ui;

pub use app::{HuskyMap, Message};
