//! Network access to the path-finding server

pub mod client;

pub use client::CampusClient;
