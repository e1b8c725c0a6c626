//! Route query coordinator
//!
//! Owns every piece of mutable UI state: the building directory, both
//! selections, the last fetched route and the query state. Each command
//! returns the effects the application shell has to carry out, so the
//! coordinator itself never touches the network or the screen.

use super::data::{BuildingDirectory, Route};
use crate::error::{MapError, MapResult};

/// Which selector a selection event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

/// Whether a path request is currently awaiting its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Querying,
}

/// Work requested by a coordinator command
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `GET /list-building`
    FetchDirectory,
    /// `GET /find-path?start=..&end=..`
    FetchPath { start: String, end: String },
    /// Show a blocking notification
    Alert(MapError),
    /// The route changed; repaint the map
    Redraw,
}

/// Extract the short code from a selector label such as `"PAR: Parrington Hall"`
pub fn short_code(label: &str) -> &str {
    label.split_once(':').map_or(label, |(code, _)| code)
}

#[derive(Debug)]
pub struct PathQueryCoordinator {
    default_building: String,
    directory: BuildingDirectory,
    start: String,
    end: String,
    route: Route,
    /// Path requests issued but not yet answered; overlapping queries are allowed
    in_flight: usize,
}

impl PathQueryCoordinator {
    pub fn new(default_building: impl Into<String>) -> Self {
        let default_building = default_building.into();
        Self {
            start: default_building.clone(),
            end: default_building.clone(),
            default_building,
            directory: BuildingDirectory::new(),
            route: Route::default(),
            in_flight: 0,
        }
    }

    pub fn directory(&self) -> &BuildingDirectory {
        &self.directory
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn selection(&self, side: Side) -> &str {
        match side {
            Side::Start => &self.start,
            Side::End => &self.end,
        }
    }

    pub fn query_state(&self) -> QueryState {
        if self.in_flight > 0 {
            QueryState::Querying
        } else {
            QueryState::Idle
        }
    }

    /// Ask for the building directory
    pub fn load_directory(&self) -> Vec<Effect> {
        vec![Effect::FetchDirectory]
    }

    /// Apply the outcome of a directory fetch
    ///
    /// Failures leave the stored directory untouched.
    pub fn directory_loaded(&mut self, result: MapResult<BuildingDirectory>) -> Vec<Effect> {
        match result {
            Ok(directory) => {
                tracing::info!(buildings = directory.len(), "building directory loaded");
                self.directory = directory;
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "building directory fetch failed");
                vec![Effect::Alert(err)]
            }
        }
    }

    /// Store the raw label chosen in one of the selectors
    pub fn select(&mut self, side: Side, label: String) -> Vec<Effect> {
        tracing::debug!(?side, %label, "selection changed");
        match side {
            Side::Start => self.start = label,
            Side::End => self.end = label,
        }
        Vec::new()
    }

    /// Issue a path request for the current selections
    ///
    /// Identical start and end codes are rejected locally without a request.
    pub fn find_path(&mut self) -> Vec<Effect> {
        let start = short_code(&self.start);
        let end = short_code(&self.end);

        if start == end {
            tracing::debug!(code = start, "rejected query from a building to itself");
            return vec![Effect::Alert(MapError::InvalidQuery { code: start.to_string() })];
        }

        let effect = Effect::FetchPath { start: start.to_string(), end: end.to_string() };
        self.in_flight += 1;
        tracing::debug!(in_flight = self.in_flight, "path query issued");
        vec![effect]
    }

    /// Apply the outcome of a path fetch
    ///
    /// The most recent response to arrive replaces the route, whichever query
    /// it belonged to. Failures leave the route untouched.
    pub fn path_loaded(&mut self, result: MapResult<Route>) -> Vec<Effect> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(route) => {
                tracing::info!(segments = route.len(), cost = route.cost, "route received");
                self.route = route;
                vec![Effect::Redraw]
            }
            Err(err) => {
                tracing::warn!(error = %err, "path fetch failed");
                vec![Effect::Alert(err)]
            }
        }
    }

    /// Restore defaults, clear the route and directory, and reload the directory
    pub fn reset(&mut self) -> Vec<Effect> {
        tracing::info!("resetting selections and route");
        self.start = self.default_building.clone();
        self.end = self.default_building.clone();
        self.route = Route::default();
        self.directory = BuildingDirectory::new();
        vec![Effect::Redraw, Effect::FetchDirectory]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Point, Segment};

    fn sample_directory() -> BuildingDirectory {
        BuildingDirectory::from_json(r#"{"PAR":"Parrington Hall","CSE":"Paul G. Allen Center"}"#)
            .unwrap()
    }

    fn sample_route() -> Route {
        Route::from_json(r#"{"path":[{"start":{"x":1,"y":2},"end":{"x":3,"y":4}}]}"#).unwrap()
    }

    fn count_path_fetches(effects: &[Effect]) -> usize {
        effects.iter().filter(|e| matches!(e, Effect::FetchPath { .. })).count()
    }

    #[test]
    fn test_short_code_takes_text_before_first_colon() {
        assert_eq!(short_code("CSE: Paul G. Allen Center"), "CSE");
        assert_eq!(short_code("CSE:Paul G. Allen Center"), "CSE");
        assert_eq!(short_code("A:B:C"), "A");
        assert_eq!(short_code("PAR"), "PAR");
        assert_eq!(short_code(""), "");
    }

    #[test]
    fn test_starts_idle_with_default_selections() {
        let coordinator = PathQueryCoordinator::new("PAR");
        assert_eq!(coordinator.selection(Side::Start), "PAR");
        assert_eq!(coordinator.selection(Side::End), "PAR");
        assert!(coordinator.route().is_empty());
        assert!(coordinator.directory().is_empty());
        assert_eq!(coordinator.query_state(), QueryState::Idle);
        assert_eq!(coordinator.load_directory(), vec![Effect::FetchDirectory]);
    }

    #[test]
    fn test_directory_success_replaces_directory() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        let effects = coordinator.directory_loaded(Ok(sample_directory()));
        assert!(effects.is_empty());
        assert_eq!(coordinator.directory(), &sample_directory());

        // Reloading with the same server state yields the same directory
        coordinator.directory_loaded(Ok(sample_directory()));
        assert_eq!(coordinator.directory(), &sample_directory());
    }

    #[test]
    fn test_directory_failure_keeps_previous_state() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        let effects = coordinator.directory_loaded(Err(MapError::bad_status(500)));
        assert_eq!(effects, vec![Effect::Alert(MapError::bad_status(500))]);
        assert!(coordinator.directory().is_empty());

        coordinator.directory_loaded(Ok(sample_directory()));
        coordinator.directory_loaded(Err(MapError::Transport("connection refused".into())));
        assert_eq!(coordinator.directory(), &sample_directory());
    }

    #[test]
    fn test_selection_has_no_network_effect() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        let effects = coordinator.select(Side::Start, "CSE: Paul G. Allen Center".into());
        assert!(effects.is_empty());
        assert_eq!(coordinator.selection(Side::Start), "CSE: Paul G. Allen Center");
        assert_eq!(coordinator.selection(Side::End), "PAR");
    }

    #[test]
    fn test_same_building_issues_no_request() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        let effects = coordinator.find_path();
        assert_eq!(count_path_fetches(&effects), 0);
        assert!(matches!(effects.as_slice(), [Effect::Alert(MapError::InvalidQuery { .. })]));
        assert_eq!(coordinator.query_state(), QueryState::Idle);

        // Different labels, same code
        coordinator.select(Side::Start, "PAR: Parrington Hall".into());
        coordinator.select(Side::End, "PAR:something else".into());
        assert_eq!(count_path_fetches(&coordinator.find_path()), 0);
    }

    #[test]
    fn test_distinct_buildings_issue_exactly_one_request() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        coordinator.directory_loaded(Ok(sample_directory()));
        coordinator.select(Side::Start, "CSE:Paul G. Allen Center".into());
        coordinator.select(Side::End, "PAR:Parrington Hall".into());

        let effects = coordinator.find_path();
        assert_eq!(
            effects,
            vec![Effect::FetchPath { start: "CSE".into(), end: "PAR".into() }]
        );
        assert_eq!(coordinator.query_state(), QueryState::Querying);

        let effects = coordinator.path_loaded(Ok(sample_route()));
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(coordinator.query_state(), QueryState::Idle);
        assert_eq!(
            coordinator.route().segments,
            vec![Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))]
        );
    }

    #[test]
    fn test_failed_query_keeps_route_and_returns_to_idle() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        coordinator.select(Side::Start, "CSE: Paul G. Allen Center".into());
        coordinator.find_path();
        coordinator.path_loaded(Ok(sample_route()));

        coordinator.find_path();
        let effects = coordinator.path_loaded(Err(MapError::bad_status(400)));
        assert_eq!(effects, vec![Effect::Alert(MapError::bad_status(400))]);
        assert_eq!(coordinator.route(), &sample_route());
        assert_eq!(coordinator.query_state(), QueryState::Idle);
    }

    #[test]
    fn test_overlapping_queries_last_response_wins() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        coordinator.select(Side::Start, "CSE: Paul G. Allen Center".into());
        assert_eq!(count_path_fetches(&coordinator.find_path()), 1);
        assert_eq!(count_path_fetches(&coordinator.find_path()), 1);
        assert_eq!(coordinator.query_state(), QueryState::Querying);

        let later = Route {
            segments: vec![Segment::new(Point::new(5.0, 5.0), Point::new(6.0, 6.0))],
            ..Route::default()
        };
        coordinator.path_loaded(Ok(later.clone()));
        assert_eq!(coordinator.query_state(), QueryState::Querying);
        coordinator.path_loaded(Ok(sample_route()));
        assert_eq!(coordinator.query_state(), QueryState::Idle);
        assert_eq!(coordinator.route(), &sample_route());
    }

    #[test]
    fn test_reset_restores_defaults_and_reloads_directory() {
        let mut coordinator = PathQueryCoordinator::new("PAR");
        coordinator.directory_loaded(Ok(sample_directory()));
        coordinator.select(Side::Start, "CSE: Paul G. Allen Center".into());
        coordinator.select(Side::End, "PAR: Parrington Hall".into());
        coordinator.find_path();
        coordinator.path_loaded(Ok(sample_route()));

        let effects = coordinator.reset();
        assert_eq!(effects, vec![Effect::Redraw, Effect::FetchDirectory]);
        assert_eq!(coordinator.selection(Side::Start), "PAR");
        assert_eq!(coordinator.selection(Side::End), "PAR");
        assert!(coordinator.route().is_empty());
        assert!(coordinator.directory().is_empty());

        coordinator.directory_loaded(Ok(sample_directory()));
        assert_eq!(coordinator.directory(), &sample_directory());
    }
}
