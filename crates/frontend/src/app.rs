use crate::layout::conversation_context::ConversationStore;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Conversation state shared by the dashboard sidebar and the chat pane.
    let conversations = ConversationStore::new();
    provide_context(conversations);

    // Session restored from sessionStorage; one per browser tab. Signing out
    // also resets the conversations.
    provide_context(SessionContext::restore(conversations));

    view! {
        <AppRoutes />
    }
}
