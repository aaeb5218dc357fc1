use crate::app::{Action, App};
use crate::media::PLAYERS;
use crate::player::PlayerRuntime;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub fn handle_key<R: PlayerRuntime>(key: KeyEvent, app: &mut App<R>) -> Result<Option<Action>> {
    if key.kind == KeyEventKind::Release {
        return Ok(None);
    }
    let keys = app.config.keys.clone();

    // Quit: close the help popup first
    if keys.matches(key, &keys.quit) || keys.matches(key, &keys.quit_alt) {
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.is_running = false;
        }
        return Ok(None);
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return Ok(None);
    }

    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.cursor_up();
        return Ok(None);
    }

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.cursor_down();
        return Ok(None);
    }

    if keys.matches(key, &keys.open_selected) {
        app.open_selected()?;
        return Ok(None);
    }

    if keys.matches(key, &keys.next_video) {
        app.skip_to_next()?;
        return Ok(None);
    }

    // 1..=6 pick an external player
    if let KeyCode::Char(ch) = key.code {
        if let Some(n) = ch.to_digit(10) {
            let n = n as usize;
            if (1..=PLAYERS.len()).contains(&n) {
                return Ok(app.link_action(n - 1));
            }
        }
    }

    Ok(None)
}
