pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
