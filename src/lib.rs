pub mod catalog;
pub mod commentary;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod tui;
