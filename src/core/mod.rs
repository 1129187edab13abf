//! Core utilities: configuration, errors, logging, validation, process helpers

pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod validation;

pub use error::{AppError, AppResult};
