//! Conversation list of the dashboard.

use crate::layout::conversation_context::use_conversations;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar(
    /// Set while the list is being fetched
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let store = use_conversations();

    view! {
        <aside class="sidebar">
            <div class="sidebar__header">
                <button
                    class="button button--primary sidebar__new"
                    on:click=move |_| store.set_new_conversation_modal_open(true)
                >
                    {icon("plus")}
                    " New Conversation"
                </button>
            </div>

            <div class="sidebar__list">
                <Show when=move || loading.get() && store.conversations.with(|c| c.is_empty())>
                    <div class="sidebar__hint">"Loading conversations..."</div>
                </Show>
                <Show when=move || !loading.get() && store.conversations.with(|c| c.is_empty())>
                    <div class="sidebar__hint">"No conversations yet"</div>
                </Show>
                <For
                    each=move || store.conversations.get()
                    key=|c| (c.id, c.title.clone())
                    let:conversation
                >
                    {{
                        let id = conversation.id;
                        view! {
                            <div
                                class=move || {
                                    if store.selected_conversation_id.get() == Some(id) {
                                        "sidebar__item sidebar__item--selected"
                                    } else {
                                        "sidebar__item"
                                    }
                                }
                                on:click=move |_| store.set_selected_conversation_id(Some(id))
                            >
                                {icon("chat")}
                                <span class="sidebar__item-title">{conversation.title.clone()}</span>
                            </div>
                        }
                    }}
                </For>
            </div>
        </aside>
    }
}
