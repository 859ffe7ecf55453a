//! Terminal front end: raw mode, key events, colors and frame rendering.

pub mod events;
pub mod raw;
pub mod render;
pub mod theme;
