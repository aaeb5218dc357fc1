use crate::app::App;
use crate::player::PlayerRuntime;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render<R: PlayerRuntime>(f: &mut Frame, area: Rect, app: &App<R>) {
    let theme = &app.theme;
    let playlist = app.controller.playlist();
    let current = &app.controller.current().name;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" Playlist · {} ", playlist.len()),
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.magenta))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let h = inner.height as usize;
    let w = inner.width as usize;
    if h == 0 {
        return;
    }

    // Keep the cursor roughly centered
    let start = app
        .cursor
        .saturating_sub(h / 2)
        .min(playlist.len().saturating_sub(h));

    let lines: Vec<Line> = playlist
        .items()
        .iter()
        .enumerate()
        .skip(start)
        .take(h)
        .map(|(idx, item)| {
            let is_sel = idx == app.cursor;
            let is_current = &item.name == current;

            let (marker, style) = if is_current {
                ("▶", Style::default().fg(theme.green).add_modifier(Modifier::BOLD))
            } else if is_sel {
                ("●", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(theme.overlay))
            };
            let line_style = if is_sel {
                style.bg(theme.surface)
            } else {
                style
            };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), line_style),
                Span::styled(truncate(&item.name, w.saturating_sub(4)), line_style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
