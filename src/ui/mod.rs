pub mod components;
pub mod layout;
pub mod theme;
pub mod utils;

pub use theme::Theme;

use crate::app::App;
use crate::player::PlayerRuntime;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui<R: PlayerRuntime>(f: &mut Frame, app: &App<R>) {
    let pane = layout::get_pane_layout(f.area(), app.config.pane_height());

    components::player_pane::render(f, pane.player, app);
    components::selector::render(f, pane.selector, app);
    components::links::render(f, pane.links, app);

    if !app.show_keyhints {
        let theme = &app.theme;
        let keys = &app.config.keys;
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", keys.display(&keys.toggle_keyhints)),
                Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.overlay)),
        ]);
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), pane.footer);
    }

    components::popups::render(f, app);
}
