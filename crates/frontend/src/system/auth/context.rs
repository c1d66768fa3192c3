use contracts::system::auth::is_admin_identity;
use leptos::prelude::*;

use super::{api, storage};
use crate::layout::conversation_context::ConversationStore;
use crate::shared::http::ApiError;

/// Session of the current browser tab, provided by `App`.
///
/// Mirrors the `token` / `username` sessionStorage entries. Route guards
/// watch `token` and send the user to `/login` as soon as it is cleared.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub token: RwSignal<Option<String>>,
    pub username: RwSignal<Option<String>>,
    /// Per-user state dropped on every sign-out.
    conversations: ConversationStore,
    clear_storage: fn(),
}

impl SessionContext {
    /// Pick up a session left in sessionStorage by an earlier page load.
    pub fn restore(conversations: ConversationStore) -> Self {
        Self::new(
            storage::get_token(),
            storage::get_username(),
            conversations,
            api::logout,
        )
    }

    pub fn new(
        token: Option<String>,
        username: Option<String>,
        conversations: ConversationStore,
        clear_storage: fn(),
    ) -> Self {
        Self {
            token: RwSignal::new(token),
            username: RwSignal::new(username),
            conversations,
            clear_storage,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.as_deref().is_some_and(|t| !t.is_empty()))
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated()
            && self
                .username
                .with(|u| u.as_deref().is_some_and(is_admin_identity))
    }

    /// Called after `api::login` has persisted the session.
    pub fn sign_in(&self, token: String, username: String) {
        self.token.set(Some(token));
        self.username.set(Some(username));
    }

    /// The one sign-out path, shared by Logout and expired sessions.
    pub fn sign_out(&self) {
        (self.clear_storage)();
        self.conversations.reset();
        self.token.set(None);
        self.username.set(None);
    }

    /// Interprets an API failure for a view.
    ///
    /// An expired session is cleared here (guards then redirect to `/login`)
    /// and yields `None`; anything else yields the message to show inline.
    pub fn handle_error(&self, err: ApiError) -> Option<String> {
        if err.is_session_expired() {
            log::warn!("session expired, signing out");
            self.sign_out();
            return None;
        }
        log::error!("request failed: {}", err);
        Some(err.to_string())
    }
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use contracts::domain::a003_conversation::aggregate::{Conversation, SimpleConversation};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn conversation(id: i64) -> Conversation {
        Conversation {
            id,
            user_id: 1,
            title: format!("Conversation {id}"),
            messages: vec![],
            created_at: ts("2024-01-01T00:00:00Z"),
            updated_at: ts("2024-01-01T00:00:00Z"),
        }
    }

    fn signed_in() -> (SessionContext, ConversationStore) {
        let store = ConversationStore::new();
        store.set_conversations(vec![SimpleConversation::from(&conversation(4))]);
        store.set_selected_conversation_id(Some(4));
        store.set_current_conversation(Some(conversation(4)));
        let session = SessionContext::new(
            Some("access".into()),
            Some("admin".into()),
            store,
            || {},
        );
        (session, store)
    }

    #[test]
    fn test_expired_session_signs_out_and_forgets_conversations() {
        let (session, store) = signed_in();

        assert_eq!(session.handle_error(ApiError::SessionExpired), None);

        assert_eq!(session.token.get_untracked(), None);
        assert_eq!(session.username.get_untracked(), None);
        assert!(!session.is_authenticated());
        assert!(store.conversations.get_untracked().is_empty());
        assert!(store.selected_conversation_id.get_untracked().is_none());
        assert!(store.current_conversation.get_untracked().is_none());
    }

    #[test]
    fn test_other_errors_keep_the_session() {
        let (session, store) = signed_in();
        let err = ApiError::Http {
            status: 500,
            message: "Failed to fetch documents".into(),
        };

        assert_eq!(
            session.handle_error(err).as_deref(),
            Some("Failed to fetch documents")
        );
        assert_eq!(session.token.get_untracked().as_deref(), Some("access"));
        assert!(session.is_admin());
        assert_eq!(store.selected_conversation_id.get_untracked(), Some(4));
    }
}
