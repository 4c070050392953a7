//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod analytics;
pub mod feeds;
pub mod footer;
pub mod header;
pub mod kpis;
pub mod loading;
pub mod logs;
