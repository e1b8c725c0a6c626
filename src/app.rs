//! The iced application shell
//!
//! Routes UI events into the coordinator and turns the effects it returns
//! into HTTP tasks, dialogs and repaints.

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::{MapError, MapResult};
use crate::map::{self, MapImage};
use crate::net::CampusClient;
use crate::state::coordinator::{Effect, PathQueryCoordinator, QueryState, Side};
use crate::state::data::{BuildingDirectory, Route};
use crate::ui::map::RouteRenderer;
use crate::ui::selector::{self, Selector};
use crate::ui;

/// Main application state
pub struct HuskyMap {
    config: AppConfig,
    client: CampusClient,
    /// Selections, directory and route
    coordinator: PathQueryCoordinator,
    start_selector: Selector,
    end_selector: Selector,
    /// Selector labels derived from the current directory
    options: Vec<String>,
    renderer: RouteRenderer,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// `/list-building` finished
    DirectoryLoaded(MapResult<BuildingDirectory>),
    /// A building was picked in one of the selectors
    Selected(Side, String),
    /// User clicked "Find Path"
    FindPath,
    /// `/find-path` finished
    PathLoaded(MapResult<Route>),
    /// User clicked "Reset"
    Reset,
    /// Background map finished decoding
    BackgroundLoaded(MapResult<MapImage>),
    /// User clicked "Export PNG"
    ExportSnapshot,
    /// Snapshot export finished
    SnapshotSaved(MapResult<PathBuf>),
}

impl HuskyMap {
    /// Create the application and kick off the directory fetch and map load
    pub fn new(config: AppConfig, client: CampusClient) -> (Self, Task<Message>) {
        tracing::info!(server = client.base_url(), map = %config.map_image.display(), "Husky Map starting");

        let mut app = HuskyMap {
            coordinator: PathQueryCoordinator::new(config.default_building.clone()),
            config,
            client,
            start_selector: Selector::new(),
            end_selector: Selector::new(),
            options: Vec::new(),
            renderer: RouteRenderer::new(),
            status: "Loading buildings...".to_string(),
        };

        let load_map = app.load_background();
        let effects = app.coordinator.load_directory();
        let fetch = app.run_effects(effects);
        (app, Task::batch([load_map, fetch]))
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = match message {
            Message::DirectoryLoaded(result) => {
                let effects = self.coordinator.directory_loaded(result);
                self.options = selector::options(self.coordinator.directory());
                self.refresh_status();
                effects
            }
            Message::Selected(side, label) => {
                let label = match side {
                    Side::Start => self.start_selector.choose(label),
                    Side::End => self.end_selector.choose(label),
                };
                self.coordinator.select(side, label)
            }
            Message::FindPath => {
                let effects = self.coordinator.find_path();
                self.refresh_status();
                effects
            }
            Message::PathLoaded(result) => {
                let effects = self.coordinator.path_loaded(result);
                self.refresh_status();
                effects
            }
            Message::Reset => {
                self.start_selector.clear();
                self.end_selector.clear();
                let effects = self.coordinator.reset();
                self.options.clear();
                self.status = "Loading buildings...".to_string();
                effects
            }
            Message::BackgroundLoaded(Ok(map)) => {
                self.renderer.background_loaded(map);
                Vec::new()
            }
            Message::BackgroundLoaded(Err(err)) => {
                tracing::warn!(error = %err, "map image unavailable");
                self.renderer.background_failed();
                Vec::new()
            }
            Message::ExportSnapshot => return self.export_snapshot(),
            Message::SnapshotSaved(Ok(path)) => {
                self.status = format!("Saved route to {}", path.display());
                Vec::new()
            }
            Message::SnapshotSaved(Err(err)) => vec![Effect::Alert(err)],
        };

        self.run_effects(effects)
    }

    /// Carry out coordinator effects, returning any async work as a task
    fn run_effects(&mut self, effects: Vec<Effect>) -> Task<Message> {
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchDirectory => {
                    let client = self.client.clone();
                    tasks.push(Task::perform(
                        async move { client.list_buildings().await },
                        Message::DirectoryLoaded,
                    ));
                }
                Effect::FetchPath { start, end } => {
                    let client = self.client.clone();
                    tasks.push(Task::perform(
                        async move { client.find_path(&start, &end).await },
                        Message::PathLoaded,
                    ));
                }
                Effect::Alert(err) => ui::alert::show(&err),
                Effect::Redraw => self.renderer.redraw(),
            }
        }
        Task::batch(tasks)
    }

    fn load_background(&mut self) -> Task<Message> {
        if !self.renderer.begin_load() {
            return Task::none();
        }
        Task::perform(
            map::background::load_background(self.config.map_image.clone()),
            Message::BackgroundLoaded,
        )
    }

    fn export_snapshot(&mut self) -> Task<Message> {
        let Some(background) = self.renderer.background() else {
            ui::alert::show(&MapError::Snapshot("the map image has not loaded yet".into()));
            return Task::none();
        };
        let pixels = background.pixels();

        let mut dialog = FileDialog::new()
            .set_title("Export Route")
            .set_file_name(map::snapshot::default_file_name(chrono::Local::now()))
            .add_filter("PNG image", &["png"]);
        if let Some(pictures) = dirs::picture_dir() {
            dialog = dialog.set_directory(pictures);
        }

        let Some(target) = dialog.save_file() else {
            return Task::none();
        };

        self.status = format!("Exporting to {}...", target.display());
        Task::perform(
            map::snapshot::export(pixels, self.coordinator.route().clone(), target),
            Message::SnapshotSaved,
        )
    }

    fn refresh_status(&mut self) {
        self.status = status_line(&self.coordinator);
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let controls = column![
            text("Husky Map").size(32),
            text("Choose your starting point:"),
            self.start_selector
                .view(&self.options, |label| Message::Selected(Side::Start, label)),
            text("Choose your destination point:"),
            self.end_selector
                .view(&self.options, |label| Message::Selected(Side::End, label)),
            row![
                button("Find Path").on_press(Message::FindPath).padding(10),
                button("Reset").on_press(Message::Reset).padding(10),
                button("Export PNG").on_press(Message::ExportSnapshot).padding(10),
            ]
            .spacing(20),
            text(&self.status).size(16),
        ]
        .spacing(12)
        .width(Length::Fixed(360.0));

        let content = row![controls, self.renderer.view(self.coordinator.route())]
            .spacing(20)
            .padding(20)
            .align_y(Alignment::Start);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Status text summarizing the coordinator
fn status_line(coordinator: &PathQueryCoordinator) -> String {
    if coordinator.query_state() == QueryState::Querying {
        return "Finding path...".to_string();
    }
    let route = coordinator.route();
    if !route.is_empty() {
        return format!("Route: {} segments, cost {:.1}", route.len(), route.cost);
    }
    match coordinator.directory().len() {
        0 => "No buildings available.".to_string(),
        n => format!("Ready. {n} buildings."),
    }
}
