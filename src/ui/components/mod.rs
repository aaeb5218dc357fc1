pub mod links;
pub mod player_pane;
pub mod popups;
pub mod selector;
