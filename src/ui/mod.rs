//! Terminal dashboard: report formatting and the render task.
pub mod render;


pub use render::{Dashboard, DashboardTerminal, Ui, setup_render_ui};
