// Modeler shell library exports

pub mod app;
pub mod config;
pub mod document_view;
pub mod panel_state;
pub mod status_manager;
pub mod ui;
pub mod ui_state;

pub use app::App;
pub use config::Config;
pub use ui_state::UIState;
