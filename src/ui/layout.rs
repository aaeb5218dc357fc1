use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct PaneLayout {
    pub player: Rect,
    pub selector: Rect,
    pub links: Rect,
    pub footer: Rect,
}

/// Player on top, then the playlist selector, the external player row and
/// a one-line footer.
pub fn get_pane_layout(area: Rect, player_percent: u16) -> PaneLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(player_percent), // Player
            Constraint::Min(3),                     // Selector
            Constraint::Length(3),                  // Links
            Constraint::Length(1),                  // Footer
        ])
        .split(area);

    PaneLayout {
        player: chunks[0],
        selector: chunks[1],
        links: chunks[2],
        footer: chunks[3],
    }
}
