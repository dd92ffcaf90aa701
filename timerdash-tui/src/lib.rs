// File: timerdash-tui/src/lib.rs

pub mod cli;
pub mod commands;
pub mod context;
pub mod render;

pub use context::DashboardContext;
