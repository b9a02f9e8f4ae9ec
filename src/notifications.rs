use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub type NotificationId = u64;

/// How long a toast stays up unless told otherwise.
pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "danger" | "error" => Ok(Self::Danger),
            other => Err(format!("unknown notification kind `{other}`")),
        }
    }
}

/// A transient toast 🍞
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub content: String,
    #[serde(skip)]
    pub deadline: Instant,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        content: impl Into<String>,
        lifetime: Duration,
        now: Instant,
    ) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            deadline: now + lifetime,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Ids of the toasts whose deadline has passed at `now`.
pub fn expired(notifications: &[Notification], now: Instant) -> Vec<NotificationId> {
    notifications
        .iter()
        .filter(|n| n.is_expired(now))
        .map(|n| n.id)
        .collect()
}
