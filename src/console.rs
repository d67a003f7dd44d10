use campus_guard::Intent;
use campus_guard::handlers::auth::LoginRequest;
use campus_guard::models::alert::EmergencyPhase;
use campus_guard::models::chat::Sender;
use campus_guard::models::feedback::{Feedback, FeedbackLevel};
use campus_guard::models::notification::NotificationKind;
use campus_guard::models::risk_area::RiskLevel;
use campus_guard::models::session::{Prompt, Tab};
use campus_guard::state::AppSnapshot;

pub const HELP: &str = "\
Commands:
  login <rga> <password>   sign in
  logout                   ask to sign out (answer with 'confirm' or 'cancel')
  sos                      press the emergency button
  role                     switch between student and security view
  tab <home|map|notifications|profile>
  chat open|close          show or hide the security chat
  draft <text>             type into the chat box
  say [text]               send text (or the draft) to security
  show                     render the current screen
  json                     dump the snapshot as JSON
  help                     this text
  quit                     exit";

/// A parsed console line.
#[derive(Debug)]
pub enum Command {
    Dispatch(Intent),
    Show,
    Json,
    Help,
    Quit,
}

/// Parses one line typed by the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "login" => {
            let mut parts = rest.split_whitespace();
            let rga = parts.next().unwrap_or_default();
            let password = parts.next().unwrap_or_default();
            Command::Dispatch(Intent::Login(LoginRequest::new(rga, password)))
        }
        "logout" => Command::Dispatch(Intent::RequestLogout),
        "confirm" => Command::Dispatch(Intent::ConfirmLogout),
        "cancel" => Command::Dispatch(Intent::CancelLogout),
        "sos" => Command::Dispatch(Intent::TriggerEmergency),
        "role" => Command::Dispatch(Intent::ToggleRole),
        "tab" => Command::Dispatch(Intent::SelectTab(rest.parse()?)),
        "chat" => match rest {
            "open" => Command::Dispatch(Intent::OpenChat),
            "close" => Command::Dispatch(Intent::CloseChat),
            other => return Err(format!("expected 'chat open' or 'chat close', got '{}'", other)),
        },
        "draft" => Command::Dispatch(Intent::UpdateChatDraft(rest.to_string())),
        "say" => {
            let text = (!rest.is_empty()).then(|| rest.to_string());
            Command::Dispatch(Intent::SendChatMessage(text))
        }
        "show" => Command::Show,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err("type 'help' for commands".to_string()),
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(command)
}

pub fn render_feedback(feedback: &Feedback) -> String {
    let marker = match feedback.level {
        FeedbackLevel::Info => "ℹ️",
        FeedbackLevel::Success => "✅",
        FeedbackLevel::Warning => "⚠️",
        FeedbackLevel::Error => "❌",
    };
    format!("{} {}: {}", marker, feedback.title, feedback.message)
}

/// Renders the screen the snapshot describes.
pub fn render(snapshot: &AppSnapshot) -> String {
    let mut out = Vec::new();

    if !snapshot.session.logged_in {
        out.push("== UFR Security - sign in ==".to_string());
        if snapshot.login_pending {
            out.push("Signing in...".to_string());
        } else {
            out.push("login <rga> <password>".to_string());
        }
        return out.join("\n");
    }

    out.push(format!(
        "== UFR Security [{}] - {:?} ==",
        snapshot.session.role.label(),
        snapshot.active_tab
    ));

    match snapshot.active_tab {
        Tab::Home => {
            if snapshot.capabilities.trigger_emergency {
                let button = if snapshot.emergency.active { "⏳" } else { "SOS" };
                out.push(format!("[ {} ] Emergency button", button));
                if snapshot.emergency.active {
                    out.push("Connecting with security...".to_string());
                }
            }
            if snapshot.capabilities.monitor_alerts {
                out.push(format!("Active alerts: {}", snapshot.emergency.alerts.len()));
                for alert in &snapshot.emergency.alerts {
                    out.push(format!(
                        "  🚨 {} at {:.6}, {:.6} ({:?}) {}",
                        alert.user_id,
                        alert.latitude,
                        alert.longitude,
                        alert.source,
                        alert.timestamp.format("%H:%M:%S")
                    ));
                }
            }
            let status = &snapshot.campus_status;
            out.push(format!(
                "Security online: {} guards on campus, response time {}-{} minutes",
                status.guards_on_duty, status.response_time_minutes.0, status.response_time_minutes.1
            ));
        }
        Tab::Map => {
            out.push("Monitored areas:".to_string());
            for area in &snapshot.risk_areas {
                let risk = match area.risk {
                    RiskLevel::High => "HIGH",
                    RiskLevel::Medium => "MEDIUM",
                };
                out.push(format!("  {:<22} {:<6} {}", area.name, risk, area.incidents_label()));
            }
        }
        Tab::Notifications => {
            for n in &snapshot.notifications {
                let icon = match n.kind {
                    NotificationKind::Emergency => "🚨",
                    NotificationKind::Alert => "⚠️",
                    NotificationKind::Info => "🔔",
                };
                out.push(format!("  {} {} ({})", icon, n.message, n.time));
            }
        }
        Tab::Profile => {
            if let Some(profile) = &snapshot.profile {
                out.push(format!("  {} - {}", profile.display_name, profile.role_label));
                out.push(format!("  RGA: {}", profile.rga));
                out.push(format!("  Shift: {}", profile.shift));
                out.push(format!("  Status: {}", profile.status));
            }
        }
    }

    if snapshot.chat.open {
        out.push("-- Security chat --".to_string());
        for m in &snapshot.chat.messages {
            let who = match m.sender {
                Sender::User => "you",
                Sender::Security => "security",
            };
            out.push(format!("  [{}] {}: {}", m.time, who, m.message));
        }
        if !snapshot.chat.draft.is_empty() {
            out.push(format!("  > {}", snapshot.chat.draft));
        }
    }

    if snapshot.prompt == Some(Prompt::ConfirmLogout) {
        out.push("Sign out? [confirm/cancel]".to_string());
    }
    if snapshot.emergency.phase == EmergencyPhase::CoolingDown {
        out.push("Alert sent. Waiting for security...".to_string());
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_line_becomes_login_intent() {
        match parse_command("login 20241234 123456").unwrap() {
            Command::Dispatch(Intent::Login(request)) => {
                assert_eq!(request.rga, "20241234");
                assert_eq!(request.password, "123456");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn say_without_text_sends_the_draft() {
        assert!(matches!(
            parse_command("say").unwrap(),
            Command::Dispatch(Intent::SendChatMessage(None))
        ));
        assert!(matches!(
            parse_command("say help me").unwrap(),
            Command::Dispatch(Intent::SendChatMessage(Some(ref t))) if t == "help me"
        ));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse_command("tab settings").is_err());
        assert!(parse_command("chat maybe").is_err());
        assert!(parse_command("dance").is_err());
        assert!(parse_command("   ").is_err());
    }
}
