//! CLI library components for the company directory.

pub mod logging;
pub mod render;
pub mod settings;
