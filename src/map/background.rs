//! Background map loader
//!
//! Decodes the campus map image from disk. Decoding a large JPEG is
//! CPU-heavy, so it runs on tokio's blocking pool and the result is
//! delivered back to the UI as a message.

use iced::widget::image::Handle;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

use crate::error::{MapError, MapResult};

/// A decoded map image, kept both as raw pixels (for export) and as an
/// iced image handle (for the canvas)
#[derive(Debug, Clone)]
pub struct MapImage {
    pixels: Arc<RgbaImage>,
    handle: Handle,
}

impl MapImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let handle = Handle::from_rgba(pixels.width(), pixels.height(), pixels.as_raw().clone());
        Self { pixels: Arc::new(pixels), handle }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> Arc<RgbaImage> {
        Arc::clone(&self.pixels)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// Load and decode the map image at `path`
pub async fn load_background(path: PathBuf) -> MapResult<MapImage> {
    let target = path.clone();
    task::spawn_blocking(move || load_background_blocking(&target))
        .await
        .map_err(|e| MapError::Background { path, reason: format!("task join error: {e}") })?
}

fn load_background_blocking(path: &Path) -> MapResult<MapImage> {
    let decoded = image::open(path)
        .map_err(|e| MapError::Background { path: path.to_path_buf(), reason: e.to_string() })?;

    let pixels = decoded.to_rgba8();
    tracing::info!(path = %path.display(), width = pixels.width(), height = pixels.height(), "map image decoded");

    Ok(MapImage::from_rgba(pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("husky-map-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn test_load_background_reports_dimensions() {
        let path = temp_path("background.png");
        RgbaImage::from_pixel(40, 25, Rgba([10, 20, 30, 255])).save(&path).unwrap();

        let map = load_background(path.clone()).await.unwrap();
        assert_eq!((map.width(), map.height()), (40, 25));
        assert_eq!(map.pixels().get_pixel(39, 24), &Rgba([10, 20, 30, 255]));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_background_error() {
        let path = temp_path("does-not-exist.jpg");
        let err = load_background(path.clone()).await.unwrap_err();
        assert!(matches!(err, MapError::Background { path: p, .. } if p == path));
    }
}
