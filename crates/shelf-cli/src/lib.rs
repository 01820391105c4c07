//! CLI library components for the shelf browser.

pub mod logging;
pub mod render;
pub mod settings;
