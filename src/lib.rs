pub mod aggregate;
pub mod breakdown;
pub mod cli;
pub mod error;
pub mod files;
pub mod loader;
pub mod model;
pub mod projects;
pub mod report;
pub mod scale;
pub mod stats;
pub mod tui;
pub mod util;
pub mod window;
