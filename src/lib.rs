//! Song recommendations from a fitted cluster model.
//!
//! A seed track's metadata and artist genres are turned into a fixed
//! 11-column feature vector, scaled, assigned to the nearest cluster centre,
//! and answered with the most popular catalog songs from that cluster.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
