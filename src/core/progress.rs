// ─── Progress Surface ───
// One-way, non-blocking notifications from the pipeline worker to whatever
// renders progress. The worker never waits on the sink.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// Pipeline stage boundaries as fractions of the whole run.
pub mod stage {
    pub const SETUP: f64 = 0.0;
    pub const MANIFEST: f64 = 0.05;
    pub const TIDY: f64 = 0.10;
    pub const DOWNLOAD_START: f64 = 0.15;
    pub const DOWNLOAD_END: f64 = 0.80;
    pub const VERIFY: f64 = 0.80;
    pub const LAUNCH: f64 = 0.90;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Stage {
        progress: f64,
        message: String,
    },
    Download {
        progress: f64,
        file: String,
        done: u64,
        total: u64,
    },
    Error {
        title: String,
        message: String,
    },
    Closed,
}

pub trait ProgressSink: Send + Sync {
    fn stage(&self, progress: f64, message: &str);

    /// Report `done` of `total` bytes across the whole batch, mapped onto the
    /// `[start, end]` span.
    fn download(&self, start: f64, end: f64, file: &str, done: u64, total: u64);

    fn error(&self, title: &str, message: &str);

    fn close(&self);
}

/// Map batch byte counts onto a span of the overall progress bar.
pub fn span_fraction(start: f64, end: f64, done: u64, total: u64) -> f64 {
    if total == 0 {
        return end;
    }
    let ratio = (done as f64 / total as f64).clamp(0.0, 1.0);
    start + (end - start) * ratio
}

/// Sink that only logs. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn stage(&self, progress: f64, message: &str) {
        info!("[{:>3.0}%] {}", progress * 100.0, message);
    }

    fn download(&self, start: f64, end: f64, file: &str, done: u64, total: u64) {
        debug!(
            "[{:>3.0}%] Downloading {} ({}/{} bytes)",
            span_fraction(start, end, done, total) * 100.0,
            file,
            done,
            total
        );
    }

    fn error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }

    fn close(&self) {}
}

/// Sink that forwards events to a UI running on another execution context.
///
/// The `bootstrapper` binary has no UI and reports through `LogProgress`;
/// embedders of the library attach their splash screen here.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: ProgressEvent) {
        // A closed receiver just means nobody is watching anymore.
        let _ = self.tx.send(event);
    }
}

impl ProgressSink for ChannelProgress {
    fn stage(&self, progress: f64, message: &str) {
        self.send(ProgressEvent::Stage {
            progress,
            message: message.to_string(),
        });
    }

    fn download(&self, start: f64, end: f64, file: &str, done: u64, total: u64) {
        self.send(ProgressEvent::Download {
            progress: span_fraction(start, end, done, total),
            file: file.to_string(),
            done,
            total,
        });
    }

    fn error(&self, title: &str, message: &str) {
        self.send(ProgressEvent::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn close(&self) {
        self.send(ProgressEvent::Closed);
    }
}

/// Closes the wrapped sink exactly once: explicitly, or when dropped, on
/// success and failure alike.
pub struct SplashGuard<'a> {
    sink: &'a dyn ProgressSink,
    closed: bool,
}

impl<'a> SplashGuard<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            closed: false,
        }
    }

    pub fn sink(&self) -> &'a dyn ProgressSink {
        self.sink
    }

    /// Close now, for exit paths where `Drop` never runs.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.sink.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for SplashGuard<'_> {
    fn drop(&mut self) {
        self.close();
    }
}
