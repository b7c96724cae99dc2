pub mod app;
pub mod consts;
mod controller;
pub mod db;
pub mod errors;
pub mod listeners;
pub mod options;
pub mod page;
mod resize;
pub mod storage;
mod toggle;
pub mod ui;

pub use controller::{Dispatch, PageEvent, SidebarController, SidebarElements};
pub use db::SqliteStore;
pub use errors::SidebarError;
pub use options::SidebarOptions;
pub use page::{ElementId, Page, PageHandle};
pub use resize::{resized_width, DragOrigin};
pub use storage::{KeyValueStore, MemoryStore};
