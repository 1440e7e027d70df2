//! dashtop: terminal admin dashboard for the programming playground API.

pub mod api;
pub mod app;
pub mod config;
pub mod fetch;
pub mod gauge;
pub mod logging;
pub mod profiles;
pub mod theme;
pub mod types;
pub mod ui;
pub mod widgets;
