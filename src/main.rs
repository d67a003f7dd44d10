use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_guard::geolocation::{Coordinates, PermissionStatus, ScriptedGeolocation};
use campus_guard::models::chat::Sender;
use campus_guard::{AppState, Config, dispatch};

mod console;

use console::{Command, HELP, parse_command, render, render_feedback};

/// Builds the scripted location service from `GEO_PERMISSION`, `GEO_FIX`
/// and `GEO_LATENCY_MS`.
fn geolocation_from_env() -> anyhow::Result<ScriptedGeolocation> {
    let permission = match std::env::var("GEO_PERMISSION")
        .unwrap_or_else(|_| "granted".into())
        .to_ascii_lowercase()
        .as_str()
    {
        "granted" => PermissionStatus::Granted,
        "denied" => PermissionStatus::Denied,
        other => anyhow::bail!("GEO_PERMISSION must be 'granted' or 'denied', got '{}'", other),
    };

    let fix = match std::env::var("GEO_FIX") {
        Ok(raw) if raw.eq_ignore_ascii_case("none") => None,
        Ok(raw) => Some(
            raw.parse::<Coordinates>()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Invalid GEO_FIX")?,
        ),
        Err(_) => None,
    };

    let latency_ms: u64 = std::env::var("GEO_LATENCY_MS")
        .unwrap_or_else(|_| "0".into())
        .parse()
        .context("Invalid GEO_LATENCY_MS")?;

    Ok(ScriptedGeolocation {
        permission,
        fix,
        latency: Duration::from_millis(latency_ms),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let geolocation = geolocation_from_env()?;
    tracing::info!(
        "✅ Location service ready (permission {:?}, fix {:?})",
        geolocation.permission,
        geolocation.fix
    );

    let state = AppState::new(config, Arc::new(geolocation));
    tracing::info!("✅ AppState initialized");

    // Print notifications and chat replies that arrive from deferred work.
    let mut updates = state.subscribe();
    let watcher = tokio::spawn(async move {
        let (mut seen_notifications, mut seen_messages) = {
            let snapshot = updates.borrow();
            (snapshot.notifications.len(), snapshot.chat.messages.len())
        };
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.notifications.len() > seen_notifications {
                if let Some(latest) = snapshot.notifications.first() {
                    println!("🔔 {}", latest.message);
                }
            }
            if snapshot.chat.messages.len() > seen_messages {
                if let Some(latest) = snapshot
                    .chat
                    .messages
                    .last()
                    .filter(|m| m.sender == Sender::Security)
                {
                    println!("💬 [{}] security: {}", latest.time, latest.message);
                }
            }
            seen_notifications = snapshot.notifications.len();
            seen_messages = snapshot.chat.messages.len();
        }
    });

    println!("{}", render(&state.snapshot()));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Dispatch(intent)) => {
                let feedback = dispatch(&state, intent).await;
                println!("{}", render_feedback(&feedback));
            }
            Ok(Command::Show) => println!("{}", render(&state.snapshot())),
            Ok(Command::Json) => println!("{}", state.snapshot().to_json()?),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(e) => println!("❌ {}", e),
        }
    }

    state.shutdown();
    watcher.abort();
    tracing::info!("👋 Bye");
    Ok(())
}
