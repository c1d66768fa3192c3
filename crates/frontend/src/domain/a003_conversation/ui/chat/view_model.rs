//! Chat pane - View Model

use crate::domain::a003_conversation::api;
use crate::layout::conversation_context::ConversationStore;
use crate::shared::date_utils::format_time;
use crate::shared::http::ApiError;
use crate::system::auth::context::SessionContext;
use contracts::domain::a003_conversation::aggregate::{
    can_submit, content_blocks, ChatRole, ContentBlock, Conversation, GREETING,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

/// One rendered bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub key: String,
    pub role: ChatRole,
    pub blocks: Vec<ContentBlock>,
    pub time: Option<String>,
}

impl ChatLine {
    fn greeting() -> Self {
        Self {
            key: "greeting".to_string(),
            role: ChatRole::Assistant,
            blocks: content_blocks(GREETING),
            time: None,
        }
    }
}

/// Messages in server order; an empty history shows the greeting instead.
pub fn chat_lines(conversation: &Conversation) -> Vec<ChatLine> {
    if conversation.messages.is_empty() {
        return vec![ChatLine::greeting()];
    }
    conversation
        .messages
        .iter()
        .map(|m| ChatLine {
            key: m.id.to_string(),
            role: m.role,
            blocks: content_blocks(&m.content),
            time: Some(format_time(&m.created_at)),
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct ChatVm {
    pub draft: RwSignal<String>,
    pub is_sending: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    store: ConversationStore,
    session: SessionContext,
}

impl ChatVm {
    pub fn new(store: ConversationStore, session: SessionContext) -> Self {
        Self {
            draft: RwSignal::new(String::new()),
            is_sending: RwSignal::new(false),
            error: RwSignal::new(None),
            store,
            session,
        }
    }

    pub fn can_send(&self) -> bool {
        self.store.current_conversation.with(|c| c.is_some())
            && self.draft.with(|d| can_submit(d, self.is_sending.get()))
    }

    /// Posts the draft, then refetches the conversation to pick up the reply.
    /// The draft is cleared only once both calls succeeded.
    pub fn send(&self) {
        let Some(conversation_id) = self
            .store
            .current_conversation
            .with_untracked(|c| c.as_ref().map(|c| c.id))
        else {
            return;
        };
        let query = self.draft.get_untracked();
        if !can_submit(&query, self.is_sending.get_untracked()) {
            return;
        }

        let vm = *self;
        vm.is_sending.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result: Result<Conversation, ApiError> = async {
                api::get_ai_response(conversation_id, query.trim().to_string()).await?;
                api::get_conversation(conversation_id).await
            }
            .await;

            match result {
                Ok(conversation) => {
                    vm.store.upsert(&conversation);
                    if vm.store.selected_conversation_id.get_untracked() == Some(conversation_id) {
                        vm.store.set_current_conversation(Some(conversation));
                    }
                    vm.draft.set(String::new());
                }
                Err(e) => {
                    if vm.session.handle_error(e).is_some() {
                        vm.error.set(Some(SEND_FAILED.to_string()));
                    }
                }
            }
            vm.is_sending.set(false);
        });
    }
}
