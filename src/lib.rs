//! Module Guide - an interactive accordion of learning modules
//!
//! Each module can be opened to read its body and marked complete. Completion
//! is persisted between runs and summarised as a progress gauge.

pub mod app;
pub mod config;
pub mod guide;
pub mod store;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use guide::ModuleGuide;
pub use theme::Theme;
