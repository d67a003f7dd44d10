mod common;

use std::time::Duration;

use campus_guard::geolocation::ScriptedGeolocation;
use campus_guard::models::chat::Sender;
use campus_guard::services::auth;
use campus_guard::services::chat::{SECURITY_GREETING, SECURITY_REPLY, send_chat_message};
use campus_guard::config::{DEFAULT_PASSWORD, DEFAULT_RGA};
use campus_guard::{AppError, Intent, dispatch};

use common::{sign_out, signed_in, test_state};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_new_session_opens_with_greeting() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        let chat = state.snapshot().chat.clone();
        assert!(!chat.open);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].sender, Sender::Security);
        assert_eq!(chat.messages[0].message, SECURITY_GREETING);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.snapshot().chat.messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_gets_one_scripted_reply() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        let sent = send_chat_message(&state, "  Someone is following me  ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sent.message, "Someone is following me");
        assert_eq!(sent.sender, Sender::User);

        let messages = state.snapshot().chat.messages.clone();
        assert_eq!(messages.len(), 2);

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(state.snapshot().chat.messages.len(), 2);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let messages = state.snapshot().chat.messages.clone();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].sender, Sender::Security);
        assert_eq!(messages[2].message, SECURITY_REPLY);
        assert!(messages[2].id > messages[1].id);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.snapshot().chat.messages.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_message_is_ignored() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        assert_eq!(send_chat_message(&state, "").await, Ok(None));
        assert_eq!(send_chat_message(&state, " \t\n ").await, Ok(None));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(state.snapshot().chat.messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_sends_are_answered_in_order() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        for text in ["one", "two", "three"] {
            send_chat_message(&state, text).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
        let messages = state.snapshot().chat.messages.clone();
        assert_eq!(messages.len(), 7);
        let senders: Vec<Sender> = messages.iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Security,
                Sender::User,
                Sender::User,
                Sender::User,
                Sender::Security,
                Sender::Security,
                Sender::Security,
            ]
        );
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_draft_is_sent_and_cleared() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        dispatch(&state, Intent::OpenChat).await;
        dispatch(&state, Intent::UpdateChatDraft("Lights out near Block E".into())).await;
        assert_eq!(state.snapshot().chat.draft, "Lights out near Block E");

        dispatch(&state, Intent::SendChatMessage(None)).await;

        let snapshot = state.snapshot();
        assert!(snapshot.chat.open);
        assert!(snapshot.chat.draft.is_empty());
        assert_eq!(snapshot.chat.messages.len(), 2);
        assert_eq!(snapshot.chat.messages[1].message, "Lights out near Block E");

        dispatch(&state, Intent::CloseChat).await;
        assert!(!state.snapshot().chat.open);
        assert_eq!(state.snapshot().chat.messages.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_drops_pending_reply() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;
        send_chat_message(&state, "help").await.unwrap();

        sign_out(&state).await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(state.snapshot().chat.messages.is_empty());

        auth::login(&state, DEFAULT_RGA, DEFAULT_PASSWORD).await.unwrap();
        let messages = state.snapshot().chat.messages.clone();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, SECURITY_GREETING);

        send_chat_message(&state, "still there?").await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(state.snapshot().chat.messages.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_requires_a_session() {
        let state = test_state(ScriptedGeolocation::without_fix());
        assert_eq!(
            send_chat_message(&state, "hello").await,
            Err(AppError::NotLoggedIn)
        );
    }
}
