//! mpv as the player runtime.
//!
//! Each mount spawns one mpv process with a JSON IPC socket. A background
//! task follows the socket's `end-file` events and waits for the process;
//! only a clean exit after an `eof` end counts as the end of playback.
//! Destroying the runtime cancels that task, which kills the process.

use super::options::PlayerOptions;
use super::traits::{EventSink, PlayerEventKind, PlayerRuntime};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::oneshot;

const IPC_CONNECT_ATTEMPTS: u32 = 40;
const IPC_RETRY: Duration = Duration::from_millis(50);
/// How long to wait for the last IPC lines once the process is gone.
const IPC_DRAIN: Duration = Duration::from_millis(500);

static IPC_SEQ: AtomicU64 = AtomicU64::new(0);

/// Why mpv stopped playing a file, from its `end-file` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Eof,
    Quit,
    Stop,
    Error,
    Other,
}

#[derive(Deserialize)]
struct IpcMessage {
    event: Option<String>,
    reason: Option<String>,
}

/// Parse one line of mpv's IPC stream. `None` for anything but `end-file`.
pub fn parse_end_file(line: &str) -> Option<EndReason> {
    let msg: IpcMessage = serde_json::from_str(line).ok()?;
    if msg.event.as_deref() != Some("end-file") {
        return None;
    }
    Some(match msg.reason.as_deref() {
        Some("eof") => EndReason::Eof,
        Some("quit") => EndReason::Quit,
        Some("stop") => EndReason::Stop,
        Some("error") => EndReason::Error,
        _ => EndReason::Other,
    })
}

/// mpv exits 0 both at the end of the file and on a manual quit, so the
/// exit status alone cannot tell them apart.
pub fn exit_event(status: io::Result<ExitStatus>, reason: Option<EndReason>) -> PlayerEventKind {
    match status {
        Ok(s) if s.success() => match reason {
            Some(EndReason::Eof) => PlayerEventKind::Ended,
            _ => PlayerEventKind::Closed,
        },
        Ok(s) => PlayerEventKind::Failed(s.code()),
        Err(e) => {
            tracing::warn!(error = %e, "lost track of player process");
            PlayerEventKind::Failed(None)
        }
    }
}

pub struct MpvRuntime {
    child: Option<Child>,
    cancel: Option<oneshot::Sender<()>>,
    ipc_path: PathBuf,
    title: String,
}

impl MpvRuntime {
    /// Launch `program` (usually `mpv`) for `options`. Must run inside a tokio runtime.
    pub fn spawn(program: &str, options: &PlayerOptions) -> Result<Self> {
        let ipc_path = ipc_path();
        let mut args = build_args(options);
        args.insert(0, format!("--input-ipc-server={}", ipc_path.display()));

        if options.danmaku.is_some() {
            tracing::debug!("mpv has no danmaku layer; overlay comments are skipped");
        }
        Self::launch(program, &args, ipc_path, &options.title)
    }

    /// Start `program` with `args`, expecting its IPC socket at `ipc_path`.
    pub fn launch(program: &str, args: &[String], ipc_path: PathBuf, title: &str) -> Result<Self> {
        tracing::debug!(program, ?args, "spawning player");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to launch `{}`. Is it installed?", program))?;

        Ok(Self {
            child: Some(child),
            cancel: None,
            ipc_path,
            title: title.to_string(),
        })
    }

    /// OS process id, while the child is still owned here.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(|c| c.id())
    }
}

/// Command line for one preview. The url always comes last, after `--`.
pub fn build_args(options: &PlayerOptions) -> Vec<String> {
    let mut args = vec![
        "--force-window=immediate".to_string(),
        "--keep-open=no".to_string(),
        format!("--title={}", options.title),
        format!("--volume={}", (options.volume * 100.0).round() as u32),
    ];

    if !options.autoplay {
        args.push("--pause".to_string());
    }
    if !options.controls.looping {
        args.push("--loop-file=no".to_string());
    }
    if let Some(sub) = &options.subtitle {
        args.push(format!("--sub-file={}", sub.url));
    }

    let setup = options.stream_setup;
    if let Some(demuxer) = setup.demuxer {
        args.push(format!("--demuxer-lavf-format={}", demuxer));
    }
    if setup.adaptive {
        args.push("--hls-bitrate=max".to_string());
    }
    if setup.same_origin_referrer {
        if let Some(origin) = http_origin(&options.url) {
            args.push(format!("--referrer={}/", origin));
        }
    }

    args.push("--".to_string());
    args.push(options.url.clone());
    args
}

fn http_origin(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.origin().ascii_serialization()),
        _ => None,
    }
}

/// Socket (or pipe on Windows) unique to this process and mount.
fn ipc_path() -> PathBuf {
    let seq = IPC_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = format!("vidpane-mpv-{}-{}", std::process::id(), seq);
    if cfg!(windows) {
        PathBuf::from(format!(r"\\.\pipe\{}", name))
    } else {
        std::env::temp_dir().join(format!("{}.sock", name))
    }
}

#[cfg(unix)]
async fn connect_ipc(path: &Path) -> io::Result<tokio::net::UnixStream> {
    tokio::net::UnixStream::connect(path).await
}

#[cfg(windows)]
async fn connect_ipc(path: &Path) -> io::Result<tokio::net::windows::named_pipe::NamedPipeClient> {
    tokio::net::windows::named_pipe::ClientOptions::new().open(path)
}

/// Follow mpv's event stream until it closes. Returns the last `end-file` reason.
async fn watch_ipc(path: PathBuf) -> Option<EndReason> {
    let mut stream = None;
    for _ in 0..IPC_CONNECT_ATTEMPTS {
        match connect_ipc(&path).await {
            Ok(s) => {
                stream = Some(s);
                break;
            }
            Err(_) => tokio::time::sleep(IPC_RETRY).await,
        }
    }
    let Some(stream) = stream else {
        tracing::debug!(path = %path.display(), "no ipc socket; using exit status only");
        return None;
    };

    let mut lines = BufReader::new(stream).lines();
    let mut reason = None;
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(r) = parse_end_file(&line) {
                    tracing::debug!(reason = ?r, "end-file");
                    reason = Some(r);
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "ipc stream closed");
                break;
            }
        }
    }
    reason
}

async fn remove_ipc_socket(path: &Path) {
    if cfg!(unix) {
        // mpv normally removes it on exit
        let _ = tokio::fs::remove_file(path).await;
    }
}

impl PlayerRuntime for MpvRuntime {
    fn subscribe(&mut self, sink: EventSink) {
        let Some(mut child) = self.child.take() else {
            tracing::warn!(title = %self.title, "player already subscribed; ignoring");
            return;
        };
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        self.cancel = Some(cancel_tx);
        let ipc_path = self.ipc_path.clone();

        tokio::spawn(async move {
            let mut watcher = tokio::spawn(watch_ipc(ipc_path.clone()));
            tokio::select! {
                status = child.wait() => {
                    let reason = match tokio::time::timeout(IPC_DRAIN, &mut watcher).await {
                        Ok(Ok(reason)) => reason,
                        _ => {
                            watcher.abort();
                            None
                        }
                    };
                    sink.emit_async(exit_event(status, reason)).await;
                }
                _ = cancel_rx => {
                    watcher.abort();
                    if let Err(e) = child.kill().await {
                        tracing::debug!(error = %e, "player already gone");
                    }
                }
            }
            remove_ipc_socket(&ipc_path).await;
        });
    }

    fn destroy(mut self) -> Result<()> {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        // Never subscribed: the child is still ours.
        if let Some(mut child) = self.child.take() {
            child.start_kill().context("Failed to stop player")?;
        }
        tracing::debug!(title = %self.title, "mpv runtime destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{LinkContext, MediaItem, ObjType, Sidecars};
    use crate::player::options::PreviewInput;
    use crate::store::LinkConfig;

    fn options(name: &str, url: &str, related: &[&str], autoplay: bool) -> PlayerOptions {
        let current = MediaItem::new(name, ObjType::Video, url);
        let related: Vec<MediaItem> = related
            .iter()
            .map(|n| MediaItem::new(*n, ObjType::from_name(n), format!("file:///v/{}", n)))
            .collect();
        let input = PreviewInput {
            objs: vec![current.clone()],
            raw_url: url.to_string(),
            current,
            related,
            locale: "en".to_string(),
            autoplay,
            links: LinkContext::default(),
            proxy: LinkConfig::default(),
        };
        let sidecars = Sidecars::resolve(&input.related, &input.current);
        PlayerOptions::build(&input, &sidecars)
    }

    #[test]
    fn test_native_args() {
        let args = build_args(&options("a.mp4", "file:///v/a.mp4", &["a.srt"], true));
        assert!(args.contains(&"--title=a.mp4".to_string()));
        assert!(args.contains(&"--volume=50".to_string()));
        assert!(args.contains(&"--sub-file=file:///v/a.srt".to_string()));
        assert!(!args.contains(&"--pause".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--demuxer")));
        assert_eq!(&args[args.len() - 2..], ["--", "file:///v/a.mp4"]);
    }

    #[test]
    fn test_flv_forces_demuxer_and_referrer() {
        let url = "https://cdn.example.com/x/live.flv";
        let args = build_args(&options("live.flv", url, &[], false));
        assert!(args.contains(&"--pause".to_string()));
        assert!(args.contains(&"--demuxer-lavf-format=flv".to_string()));
        assert!(args.contains(&"--referrer=https://cdn.example.com/".to_string()));
    }

    #[test]
    fn test_hls_picks_best_variant() {
        let args = build_args(&options("index.m3u8", "file:///v/index.m3u8", &[], true));
        assert!(args.contains(&"--hls-bitrate=max".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--referrer")));
    }

    #[test]
    fn test_parse_end_file() {
        assert_eq!(
            parse_end_file(r#"{"event":"end-file","reason":"eof","playlist_entry_id":1}"#),
            Some(EndReason::Eof)
        );
        assert_eq!(
            parse_end_file(r#"{"event":"end-file","reason":"quit"}"#),
            Some(EndReason::Quit)
        );
        assert_eq!(parse_end_file(r#"{"event":"end-file"}"#), Some(EndReason::Other));
        assert_eq!(parse_end_file(r#"{"event":"start-file"}"#), None);
        assert_eq!(parse_end_file(r#"{"request_id":0,"error":"success"}"#), None);
        assert_eq!(parse_end_file("not json"), None);
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use crate::player::traits::PlayerEvent;
        use tokio::io::AsyncWriteExt;
        use tokio::net::UnixListener;
        use tokio::sync::mpsc;

        fn sh(script: &str, ipc_path: PathBuf) -> MpvRuntime {
            let args = ["-c".to_string(), script.to_string()];
            MpvRuntime::launch("sh", &args, ipc_path, "stub").unwrap()
        }

        fn unused_socket() -> PathBuf {
            ipc_path()
        }

        async fn next_event(rx: &mut mpsc::Receiver<PlayerEvent>) -> Option<PlayerEvent> {
            tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .ok()
                .flatten()
        }

        #[tokio::test]
        async fn test_clean_exit_without_eof_is_a_close() {
            // mpv exits 0 on a manual quit too
            let mut rt = sh("exit 0", unused_socket());
            let (tx, mut rx) = mpsc::channel(4);
            let (sink, _sub) = EventSink::new(3, tx);
            rt.subscribe(sink);

            let ev = next_event(&mut rx).await.unwrap();
            assert_eq!(ev.session, 3);
            assert_eq!(ev.kind, PlayerEventKind::Closed);
            assert_ne!(ev.kind, PlayerEventKind::Ended);
        }

        #[tokio::test]
        async fn test_error_exit_reports_code() {
            let mut rt = sh("exit 2", unused_socket());
            let (tx, mut rx) = mpsc::channel(4);
            let (sink, _sub) = EventSink::new(1, tx);
            rt.subscribe(sink);

            let ev = next_event(&mut rx).await.unwrap();
            assert_eq!(ev.kind, PlayerEventKind::Failed(Some(2)));
        }

        async fn run_with_ipc(lines: &str) -> PlayerEventKind {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("mpv.sock");
            let listener = UnixListener::bind(&path).unwrap();

            let mut rt = sh("sleep 0.5", path);
            let (tx, mut rx) = mpsc::channel(4);
            let (sink, _sub) = EventSink::new(9, tx);
            rt.subscribe(sink);

            let (mut conn, _) = listener.accept().await.unwrap();
            conn.write_all(lines.as_bytes()).await.unwrap();
            drop(conn);

            next_event(&mut rx).await.unwrap().kind
        }

        #[tokio::test]
        async fn test_eof_end_file_is_end_of_playback() {
            let kind = run_with_ipc(
                "{\"event\":\"start-file\"}\n{\"event\":\"end-file\",\"reason\":\"eof\"}\n",
            )
            .await;
            assert_eq!(kind, PlayerEventKind::Ended);
        }

        #[tokio::test]
        async fn test_quit_end_file_is_a_close() {
            let kind = run_with_ipc("{\"event\":\"end-file\",\"reason\":\"quit\"}\n").await;
            assert_eq!(kind, PlayerEventKind::Closed);
        }

        #[tokio::test]
        async fn test_destroy_kills_child_without_event() {
            let mut rt = sh("sleep 30", unused_socket());
            let pid = rt.pid().unwrap();
            let (tx, mut rx) = mpsc::channel(4);
            let (sink, sub) = EventSink::new(5, tx);
            rt.subscribe(sink);

            rt.destroy().unwrap();
            drop(sub);

            // Sink is dropped with the wait task, so the channel just closes
            assert!(next_event(&mut rx).await.is_none());

            let mut alive = true;
            for _ in 0..40 {
                let status = std::process::Command::new("kill")
                    .args(["-0", &pid.to_string()])
                    .stderr(Stdio::null())
                    .status()
                    .unwrap();
                if !status.success() {
                    alive = false;
                    break;
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            assert!(!alive, "player process survived destroy");
        }

        #[tokio::test]
        async fn test_destroy_before_subscribe_kills_child() {
            let rt = sh("sleep 30", unused_socket());
            assert!(rt.pid().is_some());
            rt.destroy().unwrap();
        }
    }
}
