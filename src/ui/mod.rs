//! UI module - debug overlay, tuning panel, and hover tooltip

mod debug;
mod tooltip;
mod tweak_panel;

pub use debug::*;
pub use tooltip::*;
pub use tweak_panel::*;
