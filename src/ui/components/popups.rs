use crate::app::App;
use crate::player::PlayerRuntime;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render<R: PlayerRuntime>(f: &mut Frame, app: &App<R>) {
    if app.show_keyhints {
        render_help(f, app);
    }
    render_toast(f, app);
}

fn render_help<R: PlayerRuntime>(f: &mut Frame, app: &App<R>) {
    let theme = &app.theme;
    let keys = &app.config.keys;

    let rows: Vec<(String, &str)> = vec![
        (
            format!("{}/{}", keys.display(&keys.nav_up), keys.display(&keys.nav_down)),
            "Move selection",
        ),
        (keys.display(&keys.open_selected), "Play selected"),
        (keys.display(&keys.next_video), "Next video"),
        ("1-6".to_string(), "Open in native player"),
        (keys.display(&keys.toggle_keyhints), "Toggle this help"),
        (keys.display(&keys.quit), "Quit"),
    ];

    let width = 36.min(f.area().width);
    let height = (rows.len() as u16 + 2).min(f.area().height);
    let area = Rect::new(
        f.area().width.saturating_sub(width) / 2,
        f.area().height.saturating_sub(height) / 2,
        width,
        height,
    );

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:>7} ", key),
                    Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(what.to_string(), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(" Keys ", Style::default().fg(theme.blue)))
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_toast<R: PlayerRuntime>(f: &mut Frame, app: &App<R>) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let theme = &app.theme;
    let now = std::time::Instant::now();

    let width = (toast.message.width() as u16 + 6).min(f.area().width.saturating_sub(4));
    let mut x = f.area().width.saturating_sub(width + 1); // Top-right

    // Slide in during the first 300ms
    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    if entrance_elapsed < 300 {
        let t = entrance_elapsed as f32 / 300.0;
        let ease = 1.0 - (1.0 - t).powi(3);
        x += (width as f32 * (1.0 - ease)) as u16;
    }

    let visible = Rect::new(x, 1, width, 3).intersection(f.area());
    if visible.is_empty() {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));
    let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);

    f.render_widget(Clear, visible);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(toast.message.as_str(), style)))
            .alignment(Alignment::Center)
            .block(block),
        visible,
    );
}
