use serde::Serialize;

use crate::ids::TimeIds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Info,
    Emergency,
}

/// A system-generated message in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Millisecond creation instant, strictly increasing.
    pub id: i64,
    pub kind: NotificationKind,
    pub message: String,
    /// Display string such as "just now" or "2h ago".
    pub time: String,
}

/// Newest-first notification list. Entries are never removed or edited.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    ids: TimeIds,
}

impl NotificationFeed {
    /// Adds a notification in front of every existing one.
    pub fn prepend(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        time: impl Into<String>,
    ) -> Notification {
        let notification = Notification {
            id: self.ids.next(),
            kind,
            message: message.into(),
            time: time.into(),
        };
        self.items.insert(0, notification.clone());
        notification
    }

    /// Full ordered copy, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
