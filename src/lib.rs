pub mod app;
pub mod error;
pub mod logging;
pub mod media;
pub mod player;
pub mod store;
pub mod ui;

pub use error::PreviewError;
