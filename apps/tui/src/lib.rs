//! trainbench TUI library
//!
//! Compact training panel: pick a model, tweak its hyperparameters, train and
//! read the scalar metrics without leaving the terminal.

pub mod alert;
pub mod app;
pub mod theme;
pub mod ui;
