use std::sync::atomic::{AtomicU64, Ordering};

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const DB_FILE: &str = "swsidebar.sqlite";
pub const OPTIONS_FILE: &str = "swsidebar.json";

// layout variable consumed by the host to size the content area
pub const CONTENT_WIDTH_VAR: &str = "--content-width";
// inner padding of the content slot
pub const CONTENT_PADDING: f32 = 20.0;

pub const SIDEBAR_ID: &str = "sidebar";
pub const RESIZER_ID: &str = "sidebarResizer";
pub const TOGGLE_BTN_ID: &str = "sidebarBtn";
pub const CONTENT_ID: &str = "sidebarContent";
pub const TOGGLE_ID: &str = "sidebarToggle";
pub const TOGGLE_KNOB_ID: &str = "toggle-button";

pub const TOGGLE_BTN_TEXT: &str = "☰";
pub const PLACEHOLDER_CONTENT: &str =
    "<h3>Sidebar content</h3><p>Dynamic content is loaded here.</p>";

pub mod class {
    pub const MAIN_CONTAINER: &str = "main-container";
    pub const CONTENT_CONTAINER: &str = "content-container";
    pub const SIDE_CONTAINER: &str = "side-container";
    pub const SIDEBAR_MODULE: &str = "sidebar-module";
    pub const RESIZER: &str = "sidebar-resizer";
    pub const TOGGLE_BTN: &str = "sidebar-toggle";
    pub const CONTENT: &str = "sidebar-content";
    pub const TOGGLE_WRAPPER: &str = "toggle-container";
    pub const TOGGLE_INPUT: &str = "sidebar-toggle-input";
    pub const TOGGLE_SWITCH: &str = "sidebar-toggle-switch";
    pub const TOGGLE_KNOB: &str = "toggle-button";

    pub const OPEN: &str = "open";
    pub const SIDEBAR_OPEN: &str = "sidebar-open";
    pub const RESIZING: &str = "resizing";
    pub const NO_SELECT: &str = "no-select";
}

pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub const fn new() -> Counter {
        Self {
            value: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
