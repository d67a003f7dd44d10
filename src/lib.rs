pub mod config;
pub mod error;
pub mod geolocation;
pub mod ids;
pub mod scheduler;
pub mod state;

pub mod models {
    pub mod alert;
    pub mod chat;
    pub mod feedback;
    pub mod notification;
    pub mod risk_area;
    pub mod session;
}

pub mod services {
    pub mod auth;
    pub mod chat;
    pub mod emergency;
    pub mod notifications;
    pub mod risk_areas;
}

pub mod handlers {
    pub mod auth;
    pub mod chat;
    pub mod emergency;
    pub mod intents;
}

pub mod validation {
    pub mod auth;
}

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::intents::{Intent, dispatch};
pub use state::{AppSnapshot, AppState};
