use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEventKind {
    /// Playback reached the end of the file.
    Ended,
    /// The user closed the player before the end. Never advances the playlist.
    Closed,
    /// Runtime exited abnormally, with its exit code when known.
    Failed(Option<i32>),
}

/// Notification from a runtime, tagged with the mount session it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerEvent {
    pub session: u64,
    pub kind: PlayerEventKind,
}

/// Write end handed to a runtime. Emits are dropped once the matching
/// [`Subscription`] is gone.
#[derive(Debug, Clone)]
pub struct EventSink {
    session: u64,
    tx: mpsc::Sender<PlayerEvent>,
    active: Arc<AtomicBool>,
}

/// Keeps an [`EventSink`] live. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    session: u64,
    active: Arc<AtomicBool>,
}

impl EventSink {
    pub fn new(session: u64, tx: mpsc::Sender<PlayerEvent>) -> (EventSink, Subscription) {
        let active = Arc::new(AtomicBool::new(true));
        let sink = EventSink {
            session,
            tx,
            active: active.clone(),
        };
        (sink, Subscription { session, active })
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Non-blocking emit. Returns false if unsubscribed or the channel is full/closed.
    pub fn emit(&self, kind: PlayerEventKind) -> bool {
        if !self.is_active() {
            return false;
        }
        self.tx
            .try_send(PlayerEvent {
                session: self.session,
                kind,
            })
            .is_ok()
    }

    pub async fn emit_async(&self, kind: PlayerEventKind) -> bool {
        if !self.is_active() {
            return false;
        }
        self.tx
            .send(PlayerEvent {
                session: self.session,
                kind,
            })
            .await
            .is_ok()
    }
}

impl Subscription {
    pub fn session(&self) -> u64 {
        self.session
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

/// A media player that actually decodes and renders 🎬
///
/// Construction happens outside the trait (see `PreviewController::mount`),
/// so each implementation is free to need its own launch parameters.
pub trait PlayerRuntime {
    /// Route this runtime's notifications into `sink`.
    fn subscribe(&mut self, sink: EventSink);

    /// Release decoders, windows and connections. Consumes the runtime so
    /// nothing can touch it afterwards.
    fn destroy(self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sink_delivers_while_subscribed() {
        let (tx, mut rx) = mpsc::channel(4);
        let (sink, sub) = EventSink::new(7, tx);

        assert!(sink.emit(PlayerEventKind::Ended));
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.session, 7);
        assert_eq!(ev.kind, PlayerEventKind::Ended);
        assert_eq!(sub.session(), 7);
    }

    #[tokio::test]
    async fn test_drop_subscription_silences_sink() {
        let (tx, mut rx) = mpsc::channel(4);
        let (sink, sub) = EventSink::new(1, tx);
        drop(sub);

        assert!(!sink.is_active());
        assert!(!sink.emit(PlayerEventKind::Ended));
        assert!(!sink.emit_async(PlayerEventKind::Failed(Some(2))).await);
        drop(sink);
        assert!(rx.recv().await.is_none());
    }
}
