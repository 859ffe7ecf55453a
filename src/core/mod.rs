//! Headless core: text buffers, the file tree, search and replace, the
//! algorithm visualizer, and the command layer that drives them. Nothing in
//! here touches the terminal.

pub mod app;
pub mod buffer;
pub mod command;
pub mod commands;
pub mod diff;
pub mod dispatcher;
pub mod files;
pub mod prompt;
pub mod search;
pub mod tabs;
pub mod visualizer;
