//! codelab: the headless core of a learn-to-code IDE.
//!
//! Two engines sit at the center: the step replay engine in
//! [`core::visualizer`], which animates recorded sorting and searching
//! steps, and the buffer search/replace engine in [`core::search`].
//! [`core::app::AppState`] wires them to a file tree and a command layer;
//! [`terminal`] draws them; [`run`] hosts the command-line modes.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod run;
pub mod terminal;
pub mod user_config;
