pub mod controller;
pub mod mpv;
pub mod options;
pub mod traits;

pub use controller::{NavigationReason, NavigationRequest, PreviewController};
pub use mpv::MpvRuntime;
pub use options::{normalize_locale, PlayerLang, PlayerOptions, PreviewInput};
pub use traits::{EventSink, PlayerEvent, PlayerEventKind, PlayerRuntime, Subscription};
