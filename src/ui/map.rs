//! Route renderer
//!
//! Owns the single drawing surface. The surface takes the exact pixel size
//! of the background map once it has loaded. Each repaint draws the map at
//! the origin and then every route segment, in order, as a straight line.

use iced::mouse::Cursor;
use iced::widget::canvas::{self, Cache, Frame, Path, Program, Stroke};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{scrollable, Canvas};
use iced::{Color, Element, Length, Rectangle, Renderer, Size, Theme};

use crate::map::{MapImage, ROUTE_COLOR, ROUTE_WIDTH};
use crate::state::data::{Point, Route};
use crate::Message;

/// Surface size used until the map has loaded
pub const INITIAL_SURFACE: (u32, u32) = (300, 150);

/// One primitive of a repaint, in paint order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Map image at the origin, at its natural size
    Background { width: u32, height: u32 },
    /// Route stroke between two image-space points
    Line { from: Point, to: Point },
}

/// Everything one repaint draws
pub fn draw_plan(background: Option<&MapImage>, route: &Route) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(route.len() + 1);
    if let Some(map) = background {
        ops.push(DrawOp::Background { width: map.width(), height: map.height() });
    }
    ops.extend(
        route
            .segments
            .iter()
            .map(|segment| DrawOp::Line { from: segment.start, to: segment.end }),
    );
    ops
}

#[derive(Debug, Default)]
enum BackgroundState {
    #[default]
    NotRequested,
    Loading,
    Loaded(MapImage),
    Failed,
}

pub struct RouteRenderer {
    background: BackgroundState,
    cache: Cache,
}

impl Default for RouteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRenderer {
    pub fn new() -> Self {
        Self { background: BackgroundState::default(), cache: Cache::new() }
    }

    /// Claim the single background load slot
    ///
    /// Returns `false` if a load is already running or has finished.
    pub fn begin_load(&mut self) -> bool {
        match self.background {
            BackgroundState::NotRequested => {
                self.background = BackgroundState::Loading;
                true
            }
            _ => false,
        }
    }

    pub fn background_loaded(&mut self, map: MapImage) {
        self.background = BackgroundState::Loaded(map);
        self.redraw();
    }

    pub fn background_failed(&mut self) {
        self.background = BackgroundState::Failed;
    }

    pub fn background(&self) -> Option<&MapImage> {
        match &self.background {
            BackgroundState::Loaded(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.background, BackgroundState::Loading)
    }

    /// Drop the cached frame so the next draw repaints everything
    pub fn redraw(&self) {
        self.cache.clear();
    }

    /// Pixel size of the drawing surface
    pub fn surface_size(&self) -> (u32, u32) {
        self.background()
            .map_or(INITIAL_SURFACE, |map| (map.width(), map.height()))
    }

    pub fn view<'a>(&'a self, route: &'a Route) -> Element<'a, Message> {
        let (width, height) = self.surface_size();
        let surface = Canvas::new(MapCanvas { renderer: self, route })
            .width(Length::Fixed(width as f32))
            .height(Length::Fixed(height as f32));

        scrollable(surface)
            .direction(Direction::Both {
                vertical: Scrollbar::default(),
                horizontal: Scrollbar::default(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn route_color() -> Color {
    let [r, g, b] = ROUTE_COLOR;
    Color::from_rgb8(r, g, b)
}

fn to_canvas(point: Point) -> iced::Point {
    iced::Point::new(point.x as f32, point.y as f32)
}

fn paint(frame: &mut Frame, background: Option<&MapImage>, route: &Route) {
    for op in draw_plan(background, route) {
        match op {
            DrawOp::Background { width, height } => {
                if let Some(map) = background {
                    let bounds = Rectangle::with_size(Size::new(width as f32, height as f32));
                    frame.draw_image(bounds, map.handle());
                }
            }
            DrawOp::Line { from, to } => {
                let stroke = Stroke::default().with_color(route_color()).with_width(ROUTE_WIDTH);
                frame.stroke(&Path::line(to_canvas(from), to_canvas(to)), stroke);
            }
        }
    }
}

/// Canvas program borrowing the renderer and the current route for one view
struct MapCanvas<'a> {
    renderer: &'a RouteRenderer,
    route: &'a Route,
}

impl Program<Message> for MapCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.renderer.cache.draw(renderer, bounds.size(), |frame| {
            paint(frame, self.renderer.background(), self.route);
        });
        vec![geometry]
    }
}
