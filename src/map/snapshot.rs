//! Route snapshot export
//!
//! Paints the current route over a copy of the map image using the same
//! stroke style as the canvas and writes the result to disk.

use chrono::{DateTime, Local};
use image::{Rgba, RgbaImage};
use std::path::PathBuf;
use std::sync::Arc;

use super::{ROUTE_COLOR, ROUTE_WIDTH};
use crate::error::{MapError, MapResult};
use crate::state::data::{Point, Route, Segment};

/// Suggested file name for an export taken at `now`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("husky-map-{}.png", now.format("%Y%m%d-%H%M%S"))
}

/// Draw every segment of `route`, in order, over a copy of `background`
pub fn rasterize(background: &RgbaImage, route: &Route) -> RgbaImage {
    let mut canvas = background.clone();
    let [r, g, b] = ROUTE_COLOR;
    let color = Rgba([r, g, b, 255]);
    for segment in &route.segments {
        stroke_segment(&mut canvas, segment, ROUTE_WIDTH / 2.0, color);
    }
    canvas
}

/// Paint every pixel whose center lies within `radius` of the segment
fn stroke_segment(canvas: &mut RgbaImage, segment: &Segment, radius: f32, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let radius = f64::from(radius);

    let min_x = segment.start.x.min(segment.end.x) - radius;
    let max_x = segment.start.x.max(segment.end.x) + radius;
    let min_y = segment.start.y.min(segment.end.y) - radius;
    let max_y = segment.start.y.max(segment.end.y) + radius;

    // Entirely off-canvas
    if max_x < 0.0 || max_y < 0.0 || min_x >= f64::from(width) || min_y >= f64::from(height) {
        return;
    }

    let x0 = min_x.floor().max(0.0) as u32;
    let x1 = (max_x.ceil() as u32).min(width - 1);
    let y0 = min_y.floor().max(0.0) as u32;
    let y1 = (max_y.ceil() as u32).min(height - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if distance_to_segment(center, segment.start, segment.end) <= radius {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Rasterize and save on the blocking pool; the format follows the file extension
pub async fn export(background: Arc<RgbaImage>, route: Route, target: PathBuf) -> MapResult<PathBuf> {
    tokio::task::spawn_blocking(move || {
        let snapshot = rasterize(&background, &route);
        snapshot
            .save(&target)
            .map_err(|e| MapError::Snapshot(format!("{}: {e}", target.display())))?;
        tracing::info!(path = %target.display(), segments = route.len(), "snapshot exported");
        Ok(target)
    })
    .await
    .map_err(|e| MapError::Snapshot(format!("task join error: {e}")))?
}
