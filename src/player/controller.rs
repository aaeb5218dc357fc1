use super::options::{PlayerOptions, PreviewInput};
use super::traits::{EventSink, PlayerEvent, PlayerEventKind, PlayerRuntime, Subscription};
use crate::error::PreviewError;
use crate::media::{external_links, ExternalLink, MediaItem, Playlist, Sidecars};
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationReason {
    PlaybackEnded,
    Selected,
}

/// Ask the router to open another item of the listing, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub name: String,
    pub reason: NavigationReason,
}

enum Lifecycle<R: PlayerRuntime> {
    /// `fresh` is false once the controller has been torn down.
    Unmounted { fresh: bool },
    Mounted {
        runtime: R,
        subscription: Subscription,
    },
}

/// One video preview: the options it was opened with, the playlist it can
/// advance through, and the runtime while mounted.
///
/// A controller mounts at most once. Opening another item means building a
/// new controller.
pub struct PreviewController<R: PlayerRuntime> {
    current: MediaItem,
    options: PlayerOptions,
    playlist: Playlist,
    sidecars: Sidecars,
    links: Vec<ExternalLink>,
    lifecycle: Lifecycle<R>,
}

impl<R: PlayerRuntime> PreviewController<R> {
    pub fn new(input: &PreviewInput) -> Self {
        let sidecars = Sidecars::resolve(&input.related, &input.current);
        let options = PlayerOptions::build(input, &sidecars);
        let playlist = Playlist::from_listing(&input.objs, &input.current);

        Self {
            current: input.current.clone(),
            options,
            playlist,
            sidecars,
            links: external_links(&input.links),
            lifecycle: Lifecycle::Unmounted { fresh: true },
        }
    }

    /// Construct the runtime with this preview's options and subscribe to
    /// its notifications. Errors from `create` propagate untouched.
    pub fn mount<F>(&mut self, create: F, events: mpsc::Sender<PlayerEvent>) -> Result<u64>
    where
        F: FnOnce(&PlayerOptions) -> Result<R>,
    {
        match self.lifecycle {
            Lifecycle::Mounted { .. } => return Err(PreviewError::AlreadyMounted.into()),
            Lifecycle::Unmounted { fresh: false } => return Err(PreviewError::Released.into()),
            Lifecycle::Unmounted { fresh: true } => {}
        }

        let mut runtime = create(&self.options)?;
        let session = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        let (sink, subscription) = EventSink::new(session, events);
        runtime.subscribe(sink);

        tracing::info!(
            session,
            name = %self.current.name,
            stream = self.options.stream.label(),
            "player mounted"
        );
        self.lifecycle = Lifecycle::Mounted {
            runtime,
            subscription,
        };
        Ok(session)
    }

    /// Unsubscribe, then destroy the runtime. Safe to call repeatedly.
    pub fn unmount(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Unmounted { fresh: false }) {
            Lifecycle::Mounted {
                runtime,
                subscription,
            } => {
                let session = subscription.session();
                drop(subscription);
                runtime.destroy()?;
                tracing::info!(session, name = %self.current.name, "player released");
                Ok(())
            }
            Lifecycle::Unmounted { .. } => Ok(()),
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted { .. })
    }

    pub fn session(&self) -> Option<u64> {
        match &self.lifecycle {
            Lifecycle::Mounted { subscription, .. } => Some(subscription.session()),
            Lifecycle::Unmounted { .. } => None,
        }
    }

    /// React to a runtime notification. Only events of the live session count.
    pub fn handle_event(&self, event: &PlayerEvent) -> Option<NavigationRequest> {
        if self.session() != Some(event.session) {
            tracing::debug!(session = event.session, "ignoring event from stale session");
            return None;
        }

        match event.kind {
            PlayerEventKind::Ended => {
                let next = self.playlist.next_after(&self.current.name)?;
                tracing::info!(from = %self.current.name, to = %next.name, "advancing playlist");
                Some(NavigationRequest {
                    name: next.name.clone(),
                    reason: NavigationReason::PlaybackEnded,
                })
            }
            PlayerEventKind::Closed => {
                tracing::info!(name = %self.current.name, "player closed by user");
                None
            }
            PlayerEventKind::Failed(code) => {
                tracing::warn!(?code, name = %self.current.name, "player exited abnormally");
                None
            }
        }
    }

    /// User picked `name` from the selector.
    pub fn select(&self, name: &str) -> Option<NavigationRequest> {
        if name == self.current.name || !self.playlist.contains(name) {
            return None;
        }
        Some(NavigationRequest {
            name: name.to_string(),
            reason: NavigationReason::Selected,
        })
    }

    pub fn current(&self) -> &MediaItem {
        &self.current
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn sidecars(&self) -> &Sidecars {
        &self.sidecars
    }

    pub fn links(&self) -> &[ExternalLink] {
        &self.links
    }
}

impl<R: PlayerRuntime> Drop for PreviewController<R> {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            tracing::warn!(error = %e, "failed to release player on drop");
        }
    }
}
