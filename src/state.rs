use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, mpsc, watch};

use crate::config::Config;
use crate::geolocation::GeolocationProvider;
use crate::models::alert::{EmergencyAlert, EmergencyPhase, EmergencyState};
use crate::models::chat::{ChatMessage, ChatSession};
use crate::models::notification::{Notification, NotificationFeed};
use crate::models::risk_area::{CampusStatus, RiskArea};
use crate::models::session::{Capabilities, Profile, Prompt, Session, Tab};
use crate::scheduler::TaskRegistry;
use crate::services::{notifications, risk_areas};

/// Mutable state behind the store lock.
#[derive(Debug, Default)]
pub struct Store {
    pub session: Session,
    /// Bumped on every login and logout; deferred work compares against it.
    pub epoch: u64,
    pub login_pending: bool,
    pub active_tab: Tab,
    pub prompt: Option<Prompt>,
    pub emergency: EmergencyState,
    pub notifications: NotificationFeed,
    pub chat: ChatSession,
    /// Feeds the chat reply worker of the current session.
    pub chat_replies: Option<mpsc::UnboundedSender<tokio::time::Instant>>,
}

impl Store {
    /// Drops everything owned by the current session and starts a new epoch.
    pub fn end_session(&mut self) {
        self.session = Session::default();
        self.epoch += 1;
        self.active_tab = Tab::Home;
        self.prompt = None;
        self.emergency.reset();
        self.chat.clear();
        self.chat_replies = None;
    }
}

/// Emergency part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyView {
    pub phase: EmergencyPhase,
    pub active: bool,
    pub alerts: Vec<EmergencyAlert>,
}

/// Chat part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatView {
    pub open: bool,
    pub draft: String,
    pub messages: Vec<ChatMessage>,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub session: Session,
    pub capabilities: Capabilities,
    pub profile: Option<Profile>,
    pub login_pending: bool,
    pub active_tab: Tab,
    pub prompt: Option<Prompt>,
    pub emergency: EmergencyView,
    pub notifications: Vec<Notification>,
    pub chat: ChatView,
    pub risk_areas: Vec<RiskArea>,
    pub campus_status: CampusStatus,
}

impl AppSnapshot {
    fn from_store(store: &Store) -> Self {
        Self {
            session: store.session.clone(),
            capabilities: store.session.role.capabilities(),
            profile: Profile::from_session(&store.session),
            login_pending: store.login_pending,
            active_tab: store.active_tab,
            prompt: store.prompt,
            emergency: EmergencyView {
                phase: store.emergency.phase,
                active: store.emergency.phase.is_active(),
                alerts: store.emergency.alerts.clone(),
            },
            notifications: store.notifications.snapshot(),
            chat: ChatView {
                open: store.chat.open,
                draft: store.chat.draft.clone(),
                messages: store.chat.messages().to_vec(),
            },
            risk_areas: risk_areas::campus_risk_areas(),
            campus_status: risk_areas::campus_status(),
        }
    }

    /// Serializes the snapshot for a presentation layer that speaks JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(sonic_rs::to_string(self)?)
    }
}

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<Config>,
    /// The device location service.
    pub geolocation: Arc<dyn GeolocationProvider>,
    /// Deferred work owned by the current session.
    pub tasks: TaskRegistry,
    store: Arc<RwLock<Store>>,
    snapshots: Arc<watch::Sender<Arc<AppSnapshot>>>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    /// * `geolocation` - The location service used by the emergency flow.
    ///
    /// # Returns
    ///
    /// A logged-out store with the seeded notification feed.
    pub fn new(config: Config, geolocation: Arc<dyn GeolocationProvider>) -> Self {
        let mut store = Store::default();
        notifications::seed(&mut store.notifications);
        tracing::info!("✅ Notification feed seeded ({} entries)", store.notifications.len());

        let (tx, _rx) = watch::channel(Arc::new(AppSnapshot::from_store(&store)));

        AppState {
            config: Arc::new(config),
            geolocation,
            tasks: TaskRegistry::new(),
            store: Arc::new(RwLock::new(store)),
            snapshots: Arc::new(tx),
        }
    }

    /// Runs `f` with shared access to the store.
    pub async fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        let guard = self.store.read().await;
        f(&guard)
    }

    /// Runs `f` with exclusive access to the store and publishes a new snapshot.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut guard = self.store.write().await;
        let result = f(&mut guard);
        self.snapshots
            .send_replace(Arc::new(AppSnapshot::from_store(&guard)));
        result
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<AppSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Cancels all deferred work. Call when the owning process tears down.
    pub fn shutdown(&self) -> usize {
        tracing::info!("👋 Shutting down store");
        self.tasks.cancel_all()
    }
}
