use crate::player::PlayerEvent;
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    Player(PlayerEvent),
    Tick,
}
