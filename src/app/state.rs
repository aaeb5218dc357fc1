use crate::app::config::UserConfig;
use crate::player::{
    NavigationReason, NavigationRequest, PlayerEvent, PlayerEventKind, PlayerOptions,
    PlayerRuntime, PreviewController,
};
use crate::store::ObjStore;
use crate::ui::Theme;
use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Builds a runtime for a set of options. Swapped out in tests.
pub type Launcher<R> = Box<dyn Fn(&PlayerOptions) -> Result<R> + Send>;

/// What the player panel shows as its state line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Ended,
    /// The user quit the player; the pane stays on the current item.
    Closed,
    Failed(Option<i32>),
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Side effects the event loop performs on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenLink(String),
}

pub struct App<R: PlayerRuntime> {
    pub store: ObjStore,
    pub controller: PreviewController<R>,
    pub config: UserConfig,
    pub locale: String,
    pub theme: Theme,

    /// Highlighted row of the selector.
    pub cursor: usize,
    pub status: PlaybackStatus,
    pub is_running: bool,
    pub show_keyhints: bool,
    pub toast: Option<Toast>,

    launcher: Launcher<R>,
    events: mpsc::Sender<PlayerEvent>,
}

impl<R: PlayerRuntime> App<R> {
    pub fn new(
        store: ObjStore,
        config: UserConfig,
        locale: String,
        theme: Theme,
        launcher: Launcher<R>,
        events: mpsc::Sender<PlayerEvent>,
    ) -> Self {
        let input = store.preview_input(&locale, config.video_autoplay);
        let controller = PreviewController::new(&input);
        let cursor = controller
            .playlist()
            .position_of(&controller.current().name)
            .unwrap_or(0);

        Self {
            store,
            controller,
            config,
            locale,
            theme,
            cursor,
            status: PlaybackStatus::Idle,
            is_running: true,
            show_keyhints: false,
            toast: None,
            launcher,
            events,
        }
    }

    /// Mount the player for the store's current item.
    pub fn open_current(&mut self) -> Result<()> {
        let launcher = &self.launcher;
        self.controller
            .mount(|options| launcher(options), self.events.clone())?;
        self.status = PlaybackStatus::Playing;
        Ok(())
    }

    /// Tear down the current player and open `req.name` in a fresh controller.
    pub fn navigate(&mut self, req: NavigationRequest) -> Result<()> {
        // Resolve the target first so a bad name leaves the player running
        self.store.select(&req.name)?;
        self.controller.unmount()?;

        let input = self
            .store
            .preview_input(&self.locale, self.config.video_autoplay);
        self.controller = PreviewController::new(&input);
        self.cursor = self
            .controller
            .playlist()
            .position_of(&req.name)
            .unwrap_or(0);
        self.status = PlaybackStatus::Idle;

        if req.reason == NavigationReason::PlaybackEnded {
            self.show_toast(&format!("⏭ {}", req.name));
        }
        self.open_current()
    }

    pub fn handle_player_event(&mut self, event: PlayerEvent) -> Result<()> {
        if self.controller.session() != Some(event.session) {
            return Ok(());
        }
        if let Some(req) = self.controller.handle_event(&event) {
            return self.navigate(req);
        }

        match event.kind {
            PlayerEventKind::Ended => {
                self.status = PlaybackStatus::Ended;
                self.show_toast("■ End of playlist");
            }
            PlayerEventKind::Closed => {
                self.status = PlaybackStatus::Closed;
                self.show_toast("■ Player closed");
            }
            PlayerEventKind::Failed(code) => {
                self.status = PlaybackStatus::Failed(code);
                self.show_toast("❌ Player exited with an error");
            }
        }
        Ok(())
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.controller.playlist().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Navigate to the item under the cursor, if it is not already open.
    pub fn open_selected(&mut self) -> Result<()> {
        let Some(item) = self.controller.playlist().items().get(self.cursor) else {
            return Ok(());
        };
        match self.controller.select(&item.name) {
            Some(req) => self.navigate(req),
            None => Ok(()),
        }
    }

    pub fn skip_to_next(&mut self) -> Result<()> {
        let Some(next) = self
            .controller
            .playlist()
            .next_after(&self.controller.current().name)
        else {
            self.show_toast("Already at the last video");
            return Ok(());
        };
        let req = NavigationRequest {
            name: next.name.clone(),
            reason: NavigationReason::Selected,
        };
        self.navigate(req)
    }

    /// Deep link of the n-th external player (0-based).
    pub fn link_action(&self, index: usize) -> Option<Action> {
        self.controller
            .links()
            .get(index)
            .map(|l| Action::OpenLink(l.href.clone()))
    }

    pub fn shutdown(&mut self) {
        if let Err(e) = self.controller.unmount() {
            tracing::warn!(error = %e, "failed to release player on exit");
        }
        self.is_running = false;
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(2000);

        if let Some(ref mut current) = self.toast {
            // Keep start_time so a rapid update does not replay the entrance.
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }
}
