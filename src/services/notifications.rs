use crate::models::notification::{NotificationFeed, NotificationKind};

/// Display time for notifications created by the running app.
pub const JUST_NOW: &str = "just now";

/// Fills an empty feed with the standing campus notices.
pub fn seed(feed: &mut NotificationFeed) {
    feed.prepend(
        NotificationKind::Info,
        "Parking lot lighting maintenance completed",
        "1 day ago",
    );
    feed.prepend(
        NotificationKind::Alert,
        "Incident reported near Block A - area temporarily isolated",
        "2h ago",
    );
}
