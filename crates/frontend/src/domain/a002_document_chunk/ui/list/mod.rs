use crate::domain::a002_document_chunk::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_state::LoadState;
use crate::system::auth::context::use_session;
use contracts::domain::a001_document::aggregate::DocumentId;
use contracts::domain::a002_document_chunk::aggregate::{DocumentChunk, DocumentChunkId};
use contracts::shared::pagination::{Page, Pager};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashMap, HashSet};

const PREVIEW_CHARS: usize = 160;

/// Paginated chunks, all of them or those of one document. Every chunk
/// starts collapsed to a preview; expanding it loads the full record.
#[component]
#[allow(non_snake_case)]
pub fn ChunkList(
    /// Restrict to the chunks of one document
    #[prop(optional)]
    document_id: Option<DocumentId>,
    /// Refetch the current page whenever this changes
    #[prop(optional, into)]
    reload: Signal<u32>,
) -> impl IntoView {
    let session = use_session();

    let pager = RwSignal::new(Pager::new());
    let page = RwSignal::new(Page::<DocumentChunk>::default());
    let state = RwSignal::new(LoadState::Idle);
    let expanded = RwSignal::new(HashSet::<DocumentChunkId>::new());
    // Full records fetched on first expansion.
    let full_texts = RwSignal::new(HashMap::<DocumentChunkId, String>::new());

    let current_page = Memo::new(move |_| pager.with(|p| p.current()));

    Effect::new(move |_| {
        let requested = current_page.get();
        reload.track();
        let page_size = pager.with_untracked(|p| p.page_size());
        state.set(LoadState::Loading);
        spawn_local(async move {
            match api::list_chunks(requested, document_id, page_size).await {
                Ok(loaded) => {
                    pager.update(|p| {
                        p.reconcile(&loaded);
                    });
                    page.set(loaded);
                    state.set(LoadState::Loaded);
                }
                Err(e) => match session.handle_error(e) {
                    Some(message) => state.set(LoadState::Errored(message)),
                    None => state.set(LoadState::Idle),
                },
            }
        });
    });

    let toggle = move |id: DocumentChunkId| {
        let mut opened = false;
        expanded.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
                opened = true;
            }
        });
        if !opened || full_texts.with_untracked(|texts| texts.contains_key(&id)) {
            return;
        }
        spawn_local(async move {
            match api::get_chunk(id).await {
                Ok(chunk) => full_texts.update(|texts| {
                    texts.insert(id, chunk.text);
                }),
                Err(e) => {
                    // The list text is still shown; only a 401 matters here.
                    session.handle_error(e);
                }
            }
        });
    };

    view! {
        <div class="chunk-list">
            {move || state.get().error().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=move || !(state.get().is_loading() && page.with(|p| p.is_empty()))
                fallback=|| view! { <div class="panel__hint">"Loading chunks..."</div> }
            >
                <Show
                    when=move || !page.with(|p| p.is_empty())
                    fallback=|| view! { <div class="panel__hint">"No chunks found."</div> }
                >
                    <ul class="chunk-list__items">
                        {move || page.with(|p| {
                            p.objects
                                .iter()
                                .enumerate()
                                .map(|(index, chunk)| {
                                    let ordinal = p.ordinal(index);
                                    let id = chunk.id;
                                    let full = chunk.text.clone();
                                    let preview = chunk.preview(PREVIEW_CHARS);
                                    let is_open = move || expanded.with(|set| set.contains(&id));
                                    view! {
                                        <li class="chunk-list__item">
                                            <button
                                                class="chunk-list__toggle"
                                                on:click=move |_| toggle(id)
                                            >
                                                {move || if is_open() { icon("chevron-down") } else { icon("chevron-right") }}
                                                <span class="chunk-list__ordinal">{format!("Chunk {}", ordinal)}</span>
                                                <span class="chunk-list__meta">{format!("document #{}", chunk.document_id)}</span>
                                            </button>
                                            <div class="chunk-list__text">
                                                {move || {
                                                    if !is_open() {
                                                        return preview.clone();
                                                    }
                                                    full_texts
                                                        .with(|texts| texts.get(&id).cloned())
                                                        .unwrap_or_else(|| full.clone())
                                                }}
                                            </div>
                                        </li>
                                    }
                                })
                                .collect_view()
                        })}
                    </ul>
                </Show>
            </Show>

            <PaginationControls
                pager=pager
                total_count=Signal::derive(move || page.with(|p| p.total_count))
                disabled=Signal::derive(move || state.get().is_loading())
            />
        </div>
    }
}
