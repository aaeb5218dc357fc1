use crate::app::App;
use crate::player::PlayerRuntime;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Row of native players, each behind a number key.
pub fn render<R: PlayerRuntime>(f: &mut Frame, area: Rect, app: &App<R>) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(" Open in ", Style::default().fg(theme.yellow)))
        .border_style(Style::default().fg(theme.overlay))
        .style(Style::default().bg(Color::Reset));

    let mut spans = Vec::new();
    for (i, link) in app.controller.links().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{}", i + 1),
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", link.name), Style::default().fg(theme.text)));
    }

    let row = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(row, area);
}
