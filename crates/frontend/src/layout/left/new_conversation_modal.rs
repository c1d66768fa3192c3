use crate::domain::a003_conversation::api;
use crate::layout::conversation_context::use_conversations;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_session;
use contracts::domain::a003_conversation::aggregate::normalize_title;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

/// "New Conversation" dialog. The created conversation is listed first and
/// selected.
#[component]
pub fn NewConversationModal() -> impl IntoView {
    let store = use_conversations();
    let session = use_session();

    let title = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let is_creating = RwSignal::new(false);

    let close = Callback::new(move |_| {
        title.set(String::new());
        error.set(None);
        store.set_new_conversation_modal_open(false);
    });

    let create = move || {
        if is_creating.get_untracked() {
            return;
        }
        let Some(value) = normalize_title(&title.get_untracked()) else {
            error.set(Some("Please enter a title".to_string()));
            return;
        };

        is_creating.set(true);
        error.set(None);
        spawn_local(async move {
            match api::create_conversation(value).await {
                Ok(conversation) => {
                    log::info!("created conversation {}", conversation.id);
                    store.upsert(&conversation);
                    store.set_selected_conversation_id(Some(conversation.id));
                    store.set_current_conversation(Some(conversation));
                    is_creating.set(false);
                    close.run(());
                }
                Err(e) => {
                    error.set(session.handle_error(e));
                    is_creating.set(false);
                }
            }
        });
    };

    view! {
        <ModalFrame title="New Conversation" on_close=close locked=is_creating>
            <div class="form">
                <label class="form__label" for="conversation-title">"Title"</label>
                <input
                    id="conversation-title"
                    class="form__input"
                    placeholder="e.g. Enrollment questions"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            create();
                        }
                    }
                    disabled=move || is_creating.get()
                />

                {move || error.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <div class="form__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_creating
                        on_click=move |_| close.run(())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=is_creating
                        on_click=move |_| create()
                    >
                        {move || if is_creating.get() { "Creating..." } else { "Create" }}
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}
