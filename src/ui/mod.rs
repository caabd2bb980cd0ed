//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod employee_panel;
pub mod register_panel;

pub use app::App;
