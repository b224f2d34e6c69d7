//! Pixicon - sketch iconizer and pixel-art server.
//!
//! Thin HTTP and CLI plumbing around the [`sketchfx`] transform pipelines.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
