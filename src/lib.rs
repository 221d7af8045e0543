//! OKVM daemon library.
//!
//! Ties the schema-driven configuration engine to the built-in plugin
//! catalog and exposes the shared binary front end used by `okvmd` and
//! `okvmd-ipmi`.

pub mod app;
pub mod plugins;

pub use app::{init_config, run, AppError, Args};
pub use plugins::BuiltinRegistry;
