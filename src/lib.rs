pub mod app;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod notifications;
pub mod player;
pub mod queue;
pub mod store;

pub use error::StoreError;
pub use store::{Action, AppState, Store, StoreSnapshot};
