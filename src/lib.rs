pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod ui;

pub use error::{AppError, Result};
