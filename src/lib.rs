pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod table;
pub mod ui;
pub mod utils;

pub use error::{AppError, Result};
