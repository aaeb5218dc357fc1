use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::{io, time::Duration};
use tokio::sync::mpsc;

use vidpane::app::cli::Args;
use vidpane::app::config::{AppConfig, UserConfig};
use vidpane::app::events::AppEvent;
use vidpane::app::{input_handler, opener, Action, App, Launcher};
use vidpane::media::ExternalLink;
use vidpane::player::{MpvRuntime, PlayerOptions, PreviewController};
use vidpane::store::{LinkConfig, ObjStore};
use vidpane::ui::{self, theme::load_theme, Theme};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Serialize)]
struct DryRun<'a> {
    options: &'a PlayerOptions,
    links: &'a [ExternalLink],
    playlist: Vec<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", AppConfig::to_toml(&UserConfig::default())?);
        return Ok(());
    }

    let config_dir = AppConfig::get_config_dir();
    let _log_guard = vidpane::logging::init(&config_dir);

    let mut config = AppConfig::load();
    args.apply(&mut config);
    let locale = config.resolved_locale();

    let Some(path) = args.path.as_deref() else {
        anyhow::bail!("no file or directory given");
    };
    let store = ObjStore::open(
        path,
        LinkConfig {
            proxy_base: config.proxy_base.clone(),
        },
    )?;

    if args.dry_run {
        let input = store.preview_input(&locale, config.video_autoplay);
        let controller: PreviewController<MpvRuntime> = PreviewController::new(&input);
        let out = DryRun {
            options: controller.options(),
            links: controller.links(),
            playlist: controller.playlist().names().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let theme = load_theme(&config_dir);
    run_tui(store, config, locale, theme).await
}

async fn run_tui(store: ObjStore, config: UserConfig, locale: String, theme: Theme) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(100);
    let (player_tx, mut player_rx) = mpsc::channel(16);

    let command = config.player_command.clone();
    let launcher: Launcher<MpvRuntime> =
        Box::new(move |options| MpvRuntime::spawn(&command, options));
    let mut app = App::new(store, config, locale, theme, launcher, player_tx);

    // Fail before touching the terminal if the player cannot start at all
    app.open_current()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Player notifications
    let tx_player = tx.clone();
    tokio::spawn(async move {
        while let Some(event) = player_rx.recv().await {
            if tx_player.send(AppEvent::Player(event)).await.is_err() {
                break;
            }
        }
    });

    // 3. Tick (toast expiry, animations)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let result = event_loop(&mut terminal, &mut app, &mut rx).await;

    app.shutdown();
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App<MpvRuntime>,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(Event::Key(key)) => match input_handler::handle_key(key, app) {
                Ok(Some(Action::OpenLink(href))) => {
                    if let Err(e) = opener::open_external(&href) {
                        tracing::warn!(error = %e, "could not open link");
                        app.show_toast("❌ No handler for this player");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "navigation failed");
                    app.show_toast(&format!("❌ {}", e));
                }
            },
            AppEvent::Input(_) => {}
            AppEvent::Player(event) => {
                if let Err(e) = app.handle_player_event(event) {
                    tracing::error!(error = %e, "could not advance playlist");
                    app.show_toast(&format!("❌ {}", e));
                }
            }
            AppEvent::Tick => app.on_tick(),
        }
    }
    Ok(())
}
