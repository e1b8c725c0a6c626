//! User interface components
//!
//! - Building drop-downs (selector.rs)
//! - Map canvas with the route overlay (map.rs)
//! - Native alert dialogs (alert.rs)

pub mod alert;
pub mod map;
pub mod selector;
