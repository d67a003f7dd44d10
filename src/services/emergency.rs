use chrono::Utc;
use rand::Rng;
use tokio::sync::oneshot;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::geolocation::{Accuracy, Coordinates, LocationError, PermissionStatus};
use crate::ids::generate_alert_id;
use crate::models::alert::{
    DEFAULT_ALERT_MESSAGE, EmergencyAlert, EmergencyPhase, EmergencyReport, LocationSource,
};
use crate::models::notification::NotificationKind;
use crate::services::notifications::JUST_NOW;
use crate::state::AppState;

/// Text of the feed entry posted when the cooldown ends.
pub const EMERGENCY_NOTIFICATION: &str =
    "Emergency triggered! Security is on the way to your location.";

/// Picks a point within `jitter` degrees of `center` on each axis.
///
/// # Arguments
///
/// * `center` - The campus center.
/// * `jitter` - Maximum absolute offset per axis, in degrees.
/// * `rng` - Source of randomness.
pub fn fallback_coordinates<R: Rng>(
    center: Coordinates,
    jitter: f64,
    rng: &mut R,
) -> Coordinates {
    if jitter <= 0.0 {
        return center;
    }
    Coordinates {
        latitude: center.latitude + rng.random_range(-jitter..=jitter),
        longitude: center.longitude + rng.random_range(-jitter..=jitter),
    }
}

fn campus_fallback(config: &Config) -> Coordinates {
    fallback_coordinates(config.campus_center, config.fallback_jitter_deg, &mut rand::rng())
}

/// Raises an emergency for the signed-in student.
///
/// Marks the emergency active, asks for location permission, reads a
/// high-accuracy position (falling back to a jittered campus coordinate when
/// that fails or times out), stores the alert and schedules the cooldown that
/// posts the feed entry and returns the flow to idle.
///
/// Everything after activation runs as a session task, so the flow still
/// settles if the caller stops waiting. Logout aborts it.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the stored alert and an optional location warning.
pub async fn trigger_emergency(state: &AppState) -> Result<EmergencyReport> {
    let (epoch, user_id) = state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            if !store.session.role.capabilities().trigger_emergency {
                return Err(AppError::RoleNotPermitted);
            }
            if store.emergency.phase.is_active() {
                return Err(AppError::EmergencyInProgress);
            }
            store.emergency.phase = EmergencyPhase::Activating;
            Ok((store.epoch, store.session.user_id()))
        })
        .await?;

    tracing::info!("🚨 Emergency activating for {}", user_id);

    let (tx, rx) = oneshot::channel();
    let flow_state = state.clone();
    state.tasks.spawn("emergency-locate", async move {
        let outcome = locate_and_store(&flow_state, epoch, user_id).await;
        if tx.send(outcome).is_err() {
            tracing::debug!("Emergency caller went away; flow finished on its own");
        }
    });

    match rx.await {
        Ok(outcome) => outcome,
        Err(_) => {
            // The task was aborted or panicked before reporting back.
            state
                .mutate(|store| {
                    if store.epoch == epoch && store.emergency.phase.is_active() {
                        store.emergency.phase = EmergencyPhase::Idle;
                    }
                })
                .await;
            Err(AppError::SessionEnded)
        }
    }
}

async fn locate_and_store(
    state: &AppState,
    epoch: u64,
    user_id: String,
) -> Result<EmergencyReport> {
    if state.geolocation.request_permission().await == PermissionStatus::Denied {
        state
            .mutate(|store| {
                if store.epoch == epoch {
                    store.emergency.phase = EmergencyPhase::Idle;
                }
            })
            .await;
        return Err(AppError::PermissionDenied);
    }

    let timeout = state.config.location_timeout;
    let reading = match tokio::time::timeout(
        timeout,
        state.geolocation.current_position(Accuracy::High),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout(timeout)),
    };

    let (coordinates, source, warning) = match reading {
        Ok(coordinates) => {
            tracing::info!("📍 Location resolved: {}", coordinates);
            (coordinates, LocationSource::Device, None)
        }
        Err(e) => {
            let coordinates = campus_fallback(&state.config);
            let feedback = AppError::LocationUnavailable(e.to_string()).feedback();
            tracing::info!("📍 Using fallback location: {}", coordinates);
            (coordinates, LocationSource::Fallback, Some(feedback.message))
        }
    };

    let located = state
        .mutate(|store| {
            if store.epoch != epoch {
                return false;
            }
            store.emergency.phase = match source {
                LocationSource::Device => EmergencyPhase::LocationResolved,
                LocationSource::Fallback => EmergencyPhase::LocationFallback,
            };
            true
        })
        .await;
    if !located {
        tracing::warn!("Emergency dropped: session ended while locating");
        return Err(AppError::SessionEnded);
    }

    let alert = EmergencyAlert {
        id: generate_alert_id(),
        latitude: coordinates.latitude,
        longitude: coordinates.longitude,
        timestamp: Utc::now(),
        user_id,
        message: DEFAULT_ALERT_MESSAGE.to_string(),
        source,
    };

    let stored = state
        .mutate(|store| {
            if store.epoch != epoch {
                return false;
            }
            store.emergency.alerts.push(alert.clone());
            store.emergency.phase = EmergencyPhase::CoolingDown;
            true
        })
        .await;

    if !stored {
        tracing::warn!("Emergency dropped: session ended before the alert was stored");
        return Err(AppError::SessionEnded);
    }

    tracing::info!("✅ Alert {} stored at {}", alert.id, coordinates);
    schedule_cooldown(state, epoch);

    Ok(EmergencyReport { alert, warning })
}

fn schedule_cooldown(state: &AppState, epoch: u64) {
    let cooldown_state = state.clone();
    state
        .tasks
        .schedule("emergency-cooldown", state.config.emergency_cooldown, async move {
            let finished = cooldown_state
                .mutate(|store| {
                    if store.epoch != epoch {
                        return false;
                    }
                    store.notifications.prepend(
                        NotificationKind::Emergency,
                        EMERGENCY_NOTIFICATION,
                        JUST_NOW,
                    );
                    store.emergency.phase = EmergencyPhase::Idle;
                    true
                })
                .await;

            if finished {
                tracing::info!("🔔 Emergency cooldown finished");
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CAMPUS_CENTER;

    #[test]
    fn fallback_stays_within_jitter() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let c = fallback_coordinates(CAMPUS_CENTER, 0.0015, &mut rng);
            assert!((c.latitude - CAMPUS_CENTER.latitude).abs() <= 0.0015 + 1e-12);
            assert!((c.longitude - CAMPUS_CENTER.longitude).abs() <= 0.0015 + 1e-12);
        }
    }

    #[test]
    fn zero_jitter_returns_the_center() {
        let c = fallback_coordinates(CAMPUS_CENTER, 0.0, &mut rand::rng());
        assert_eq!(c, CAMPUS_CENTER);
    }
}
