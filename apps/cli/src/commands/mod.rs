//! Command implementations for the trainbench CLI.

pub mod hyperparams;
pub mod models;
pub mod render;
pub mod train;
pub mod types;
