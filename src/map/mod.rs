//! Campus map imagery
//!
//! This module handles:
//! - Decoding the background map image off the UI thread (background.rs)
//! - Rasterizing the route over the map and saving it as a PNG (snapshot.rs)

pub mod background;
pub mod snapshot;

pub use background::MapImage;

/// Route stroke color (HotPink)
pub const ROUTE_COLOR: [u8; 3] = [0xFF, 0x69, 0xB4];

/// Route stroke width in image pixels
pub const ROUTE_WIDTH: f32 = 12.0;
