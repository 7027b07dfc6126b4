pub mod config;
pub mod display;
pub mod fonts;
pub mod indicators;
pub mod logging;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod timeline;
