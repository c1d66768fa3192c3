//! Chat pane - View Component

use super::view_model::{chat_lines, ChatLine, ChatVm};
use crate::layout::conversation_context::use_conversations;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a003_conversation::aggregate::{ChatRole, ContentBlock};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatView() -> impl IntoView {
    let store = use_conversations();
    let vm = ChatVm::new(store, use_session());
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    let lines = Memo::new(move |_| {
        store
            .current_conversation
            .with(|c| c.as_ref().map(chat_lines).unwrap_or_default())
    });

    // Keep the newest message in view.
    Effect::new(move |_| {
        lines.track();
        vm.is_sending.track();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    // A different conversation starts with a clean input.
    Effect::new(move |prev: Option<Option<i64>>| {
        let id = store.selected_conversation_id.get();
        if prev.is_some_and(|p| p != id) {
            vm.draft.set(String::new());
            vm.error.set(None);
        }
        id
    });

    view! {
        <Show
            when=move || store.current_conversation.with(|c| c.is_some())
            fallback=|| view! {
                <div class="chat chat--empty">
                    {icon("chat")}
                    <p>"Select a conversation or start a new one."</p>
                </div>
            }
        >
            <div class="chat">
                <div class="chat__header">
                    <h2 class="chat__title">
                        {move || store
                            .current_conversation
                            .with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default())}
                    </h2>
                </div>

                <div node_ref=messages_container_ref class="chat__messages">
                    <For
                        each=move || lines.get()
                        key=|line| line.key.clone()
                        children=move |line: ChatLine| view! { <MessageBubble line=line /> }
                    />
                    <Show when=move || vm.is_sending.get()>
                        <div class="chat__bubble chat__bubble--assistant chat__typing">
                            <span class="chat__dot"></span>
                            <span class="chat__dot"></span>
                            <span class="chat__dot"></span>
                        </div>
                    </Show>
                </div>

                {move || vm.error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <Flex class="chat__input" style="gap: 8px; align-items: flex-end;">
                    <div style="flex: 1;">
                        <Textarea
                            value=vm.draft
                            placeholder="Type your message... (Enter to send, Shift+Enter for a new line)"
                            attr:style="width: 100%; min-height: 60px; max-height: 200px; resize: vertical;"
                            disabled=vm.is_sending
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    vm.send();
                                }
                            }
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !vm.can_send())
                        on_click=move |_| vm.send()
                    >
                        {icon("send")}
                        {move || if vm.is_sending.get() { " Sending..." } else { " Send" }}
                    </Button>
                </Flex>
            </div>
        </Show>
    }
}

#[component]
#[allow(non_snake_case)]
fn MessageBubble(line: ChatLine) -> impl IntoView {
    let is_user = line.role == ChatRole::User;
    let blocks = line
        .blocks
        .into_iter()
        .map(|block| match block {
            ContentBlock::Line(text) => view! { <p class="chat__line">{text}</p> }.into_any(),
            ContentBlock::Spacer => view! { <div class="chat__spacer"></div> }.into_any(),
        })
        .collect_view();

    view! {
        <div class=if is_user { "chat__row chat__row--user" } else { "chat__row chat__row--assistant" }>
            <div class=if is_user { "chat__bubble chat__bubble--user" } else { "chat__bubble chat__bubble--assistant" }>
                {blocks}
                {line.time.map(|t| view! { <div class="chat__time">{t}</div> })}
            </div>
        </div>
    }
}
