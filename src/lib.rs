pub mod app;
pub mod calc;
pub mod chart;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_store, persist_store};
pub use tracker::CalorieTracker;
