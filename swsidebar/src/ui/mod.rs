mod content;
mod menubar;
pub mod side_panel;
mod toggle_switch;

pub use content::{fragment_blocks, Block};
pub use toggle_switch::toggle_switch;
