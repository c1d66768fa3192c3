use contracts::domain::a003_conversation::aggregate::{
    sort_recent_first, Conversation, ConversationId, SimpleConversation,
};
use leptos::prelude::*;

/// Conversation state shared by the dashboard sidebar and the chat pane.
///
/// One store per session, provided by `App`. Selecting a conversation makes
/// the dashboard refetch it into `current_conversation`.
#[derive(Clone, Copy)]
pub struct ConversationStore {
    pub current_conversation: RwSignal<Option<Conversation>>,
    pub conversations: RwSignal<Vec<SimpleConversation>>,
    pub selected_conversation_id: RwSignal<Option<ConversationId>>,
    pub is_new_conversation_modal_open: RwSignal<bool>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            current_conversation: RwSignal::new(None),
            conversations: RwSignal::new(Vec::new()),
            selected_conversation_id: RwSignal::new(None),
            is_new_conversation_modal_open: RwSignal::new(false),
        }
    }

    pub fn set_current_conversation(&self, conversation: Option<Conversation>) {
        self.current_conversation.set(conversation);
    }

    /// Replaces the list, most recently updated first.
    pub fn set_conversations(&self, mut conversations: Vec<SimpleConversation>) {
        sort_recent_first(&mut conversations);
        self.conversations.set(conversations);
    }

    /// `None` also drops the loaded conversation.
    pub fn set_selected_conversation_id(&self, id: Option<ConversationId>) {
        if id.is_none() {
            self.current_conversation.set(None);
        }
        self.selected_conversation_id.set(id);
    }

    pub fn set_new_conversation_modal_open(&self, open: bool) {
        self.is_new_conversation_modal_open.set(open);
    }

    /// Inserts or refreshes the list entry of a freshly fetched conversation.
    pub fn upsert(&self, conversation: &Conversation) {
        let entry = SimpleConversation::from(conversation);
        self.conversations.update(|list| {
            match list.iter_mut().find(|c| c.id == entry.id) {
                Some(existing) => *existing = entry,
                None => list.push(entry),
            }
            sort_recent_first(list);
        });
    }

    /// Forget everything, on logout.
    pub fn reset(&self) {
        self.set_selected_conversation_id(None);
        self.conversations.set(Vec::new());
        self.is_new_conversation_modal_open.set(false);
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_conversations() -> ConversationStore {
    use_context::<ConversationStore>().expect("ConversationStore not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn conversation(id: i64, updated: &str) -> Conversation {
        Conversation {
            id,
            user_id: 1,
            title: format!("Conversation {id}"),
            messages: vec![],
            created_at: ts("2024-01-01T00:00:00Z"),
            updated_at: ts(updated),
        }
    }

    #[test]
    fn test_created_conversation_is_listed_first() {
        let store = ConversationStore::new();
        store.set_conversations(vec![
            SimpleConversation::from(&conversation(1, "2024-01-02T00:00:00Z")),
            SimpleConversation::from(&conversation(2, "2024-01-03T00:00:00Z")),
        ]);
        store.upsert(&conversation(3, "2024-02-01T00:00:00Z"));

        let ids: Vec<_> = store
            .conversations
            .get_untracked()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_clearing_selection_drops_current() {
        let store = ConversationStore::new();
        store.set_selected_conversation_id(Some(4));
        store.set_current_conversation(Some(conversation(4, "2024-01-01T00:00:00Z")));

        store.set_selected_conversation_id(None);
        assert!(store.current_conversation.get_untracked().is_none());
        assert!(store.selected_conversation_id.get_untracked().is_none());
    }

    #[test]
    fn test_upsert_refreshes_existing_entry() {
        let store = ConversationStore::new();
        store.set_conversations(vec![
            SimpleConversation::from(&conversation(1, "2024-01-05T00:00:00Z")),
            SimpleConversation::from(&conversation(2, "2024-01-03T00:00:00Z")),
        ]);
        store.upsert(&conversation(2, "2024-01-09T00:00:00Z"));

        let list = store.conversations.get_untracked();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 2);
    }
}
