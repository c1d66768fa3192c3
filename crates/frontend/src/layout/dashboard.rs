use crate::domain::a003_conversation::api;
use crate::domain::a003_conversation::ui::chat::ChatView;
use crate::layout::conversation_context::use_conversations;
use crate::layout::left::new_conversation_modal::NewConversationModal;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_session;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// `/dashboard`: conversation sidebar next to the chat pane.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_conversations();
    let session = use_session();
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let fetch_list = move || {
        loading.set(true);
        spawn_local(async move {
            match api::list_conversations().await {
                Ok(list) => {
                    store.set_conversations(list);
                    error.set(None);
                }
                Err(e) => error.set(session.handle_error(e)),
            }
            loading.set(false);
        });
    };

    // Selection drives the full fetch; a late answer for a conversation that
    // is no longer selected is dropped.
    Effect::new(move |_| match store.selected_conversation_id.get() {
        Some(id) => spawn_local(async move {
            match api::get_conversation(id).await {
                Ok(conversation) => {
                    if store.selected_conversation_id.get_untracked() == Some(id) {
                        store.set_current_conversation(Some(conversation));
                    }
                }
                Err(e) => error.set(session.handle_error(e)),
            }
        }),
        None => store.set_current_conversation(None),
    });

    fetch_list();

    view! {
        <Shell>
            <div class="dashboard">
                <Sidebar loading=loading />
                <main class="dashboard__main">
                    {move || error.get().map(|e| view! {
                        <div class="warning-box warning-box--error">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{e}</span>
                        </div>
                    })}
                    <ChatView />
                </main>
            </div>
            <Show when=move || store.is_new_conversation_modal_open.get()>
                <NewConversationModal />
            </Show>
        </Shell>
    }
}
