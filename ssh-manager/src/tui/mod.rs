//! Full-screen terminal UI
//!
//! A thin driver around [`ssh_manager_core::navigation::Navigator`]:
//! crossterm keys are mapped to navigation events and snapshots are drawn
//! with ratatui.

mod app;
mod keymap;
mod render;
mod terminal;

pub use app::run;
