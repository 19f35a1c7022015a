//! Portfolio Main Entry Point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

// Debug flags - set to true to enable specific debug logging
pub const DEBUG_SCROLL: bool = false; // Viewport samples, progress and tier changes
pub const DEBUG_REVEAL: bool = false; // Card, segment and branch reveals
pub const DEBUG_CONTENT: bool = false; // Backend messages and content loading

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            zoon::println!($($arg)*);
        }
    };
}

mod app;
mod connection;
mod dataflow;
mod page;
mod theme;
mod timeline;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::PortfolioApp::new();
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
