//! Process-wide queue of transient status messages.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use scholaris_config::ToastConfig;
use scholaris_core::ClientError;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastStatus::Success => "success",
            ToastStatus::Error => "error",
            ToastStatus::Warning => "warning",
            ToastStatus::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub status: ToastStatus,
    pub title: String,
    pub description: Option<String>,
    pub duration: Duration,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.duration
    }
}

struct NotifierInner {
    config: ToastConfig,
    next_id: AtomicU64,
    tx: watch::Sender<Vec<Toast>>,
}

/// Cloneable handle to the toast queue.
///
/// Toasts are kept in insertion order and ids are never reused. Inside a
/// tokio runtime each toast is dismissed when its duration elapses, so
/// subscribers see it go; reads and writes also drop anything expired.
#[derive(Clone)]
pub struct ToastNotifier {
    inner: Arc<NotifierInner>,
}

impl fmt::Debug for ToastNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastNotifier")
            .field("queued", &self.inner.tx.borrow().len())
            .finish()
    }
}

impl ToastNotifier {
    pub fn new(config: ToastConfig) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(NotifierInner {
                config,
                next_id: AtomicU64::new(1),
                tx,
            }),
        }
    }

    /// Queues a toast with the configured duration for its status.
    pub fn show(
        &self,
        status: ToastStatus,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> ToastId {
        let millis = match status {
            ToastStatus::Error => self.inner.config.error_duration_ms,
            _ => self.inner.config.default_duration_ms,
        };
        self.show_for(status, title, description, Duration::from_millis(millis))
    }

    pub fn show_for(
        &self,
        status: ToastStatus,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: Duration,
    ) -> ToastId {
        let id = ToastId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let description = description.into();
        let toast = Toast {
            id,
            status,
            title: title.into(),
            description: (!description.trim().is_empty()).then_some(description),
            duration,
            created_at: Instant::now(),
        };
        let deadline = toast.created_at + duration;
        tracing::debug!(id = %id, status = status.as_str(), title = %toast.title, "toast");

        let max_visible = self.inner.config.max_visible.max(1);
        self.inner.tx.send_modify(|queue| {
            let now = Instant::now();
            queue.retain(|t| !t.is_expired(now));
            queue.push(toast);
            if queue.len() > max_visible {
                let overflow = queue.len() - max_visible;
                queue.drain(..overflow);
            }
        });
        self.schedule_expiry(id, deadline);
        id
    }

    fn schedule_expiry(&self, id: ToastId, deadline: Instant) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let inner = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = inner.upgrade() {
                ToastNotifier { inner }.dismiss(id);
            }
        });
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.show(ToastStatus::Success, title, description)
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.show(ToastStatus::Error, title, description)
    }

    pub fn warning(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.show(ToastStatus::Warning, title, description)
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) -> ToastId {
        self.show(ToastStatus::Info, title, description)
    }

    /// Shows `error` to the user. Authorization failures are never toasted.
    pub fn notify_error(&self, error: &ClientError) -> Option<ToastId> {
        if error.is_authorization() {
            return None;
        }
        Some(self.error(error.toast_title(), error.to_string()))
    }

    /// Returns `true` when the toast was still queued.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.inner.tx.send_if_modified(|queue| {
            let before = queue.len();
            queue.retain(|t| t.id != id);
            queue.len() != before
        })
    }

    pub fn clear(&self) {
        self.inner.tx.send_if_modified(|queue| {
            let had_any = !queue.is_empty();
            queue.clear();
            had_any
        });
    }

    /// Toasts that have not yet expired, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        self.inner.tx.send_if_modified(|queue| {
            let before = queue.len();
            queue.retain(|t| !t.is_expired(now));
            queue.len() != before
        });
        self.inner.tx.borrow().clone()
    }

    /// Removes and returns every active toast.
    pub fn drain(&self) -> Vec<Toast> {
        let toasts = self.active();
        self.clear();
        toasts
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.tx.subscribe()
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}
