use crate::app::{App, PlaybackStatus};
use crate::player::PlayerRuntime;
use crate::ui::utils::{human_size, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render<R: PlayerRuntime>(f: &mut Frame, area: Rect, app: &App<R>) {
    let theme = &app.theme;
    let ctl = &app.controller;
    let options = ctl.options();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(
                " {} ",
                truncate(&options.title, area.width.saturating_sub(6) as usize)
            ),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let (icon, label, color) = match app.status {
        PlaybackStatus::Idle => ("…", "Starting".to_string(), theme.overlay),
        PlaybackStatus::Playing => (
            "▶",
            format!("Playing in {}", app.config.player_command),
            theme.green,
        ),
        PlaybackStatus::Ended => ("■", "Ended".to_string(), theme.yellow),
        PlaybackStatus::Closed => ("■", "Player closed".to_string(), theme.overlay),
        PlaybackStatus::Failed(Some(code)) => (
            "✖",
            format!("Player failed (exit {})", code),
            theme.red,
        ),
        PlaybackStatus::Failed(None) => ("✖", "Player failed".to_string(), theme.red),
    };

    let muted = Style::default().fg(theme.overlay);
    let value = Style::default().fg(theme.text);
    let row = |key: &str, val: String| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), muted),
            Span::styled(val, value),
        ])
    };

    let sidecars = ctl.sidecars();
    let subtitle = sidecars
        .subtitle
        .as_ref()
        .map(|s| format!("{} ({})", s.item.name, s.format.as_str()))
        .unwrap_or_else(|| "—".to_string());
    let danmaku = sidecars
        .danmaku
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "—".to_string());
    let position = ctl
        .playlist()
        .position_of(&ctl.current().name)
        .map(|i| format!("{}/{}", i + 1, ctl.playlist().len()))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", icon), Style::default().fg(color)),
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        row("Stream", options.stream.label().to_string()),
        row("Size", human_size(ctl.current().size)),
        row("Language", options.lang.as_str().to_string()),
        row("Autoplay", if options.autoplay { "on" } else { "off" }.to_string()),
        row("Subtitle", subtitle),
        row("Danmaku", danmaku),
        row("Playlist", position),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
