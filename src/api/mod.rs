mod cursor_overlay_builder;
mod data_controller;
mod interaction_coordinator;
mod observer_dispatch;
mod pane_controller;
mod session;
mod session_config;
mod session_model;
mod session_snapshot;
mod viewport_coordinator;

pub use cursor_overlay_builder::join_info_texts;
pub use interaction_coordinator::ChartEvent;
pub use session::ChartSession;
pub use session_config::ChartSessionConfig;
pub use session_snapshot::{PaneSnapshot, SessionSnapshot};
