//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the server client and the UI layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from building short codes to long display names
///
/// Ordered by short code so the selectors list buildings alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingDirectory {
    buildings: BTreeMap<String, String>,
}

impl BuildingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON body of `/list-building`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn long_name(&self, short_code: &str) -> Option<&str> {
        self.buildings.get(short_code).map(String::as_str)
    }

    /// Iterate `(short code, long name)` pairs in short code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buildings.iter().map(|(code, name)| (code.as_str(), name.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for BuildingDirectory
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            buildings: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A location in map image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One straight leg of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    /// Walking cost of this leg, when the server reports one
    #[serde(default)]
    pub cost: f64,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end, cost: 0.0 }
    }
}

/// Ordered list of segments returned by `/find-path`
///
/// Segments are drawn in order and independently; consecutive
/// segments need not share endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Origin of the route, if the server includes it
    #[serde(default)]
    pub start: Option<Point>,
    /// Total walking cost
    #[serde(default)]
    pub cost: f64,
    #[serde(rename = "path")]
    pub segments: Vec<Segment>,
}

impl Route {
    /// Parse the JSON body of `/find-path`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
