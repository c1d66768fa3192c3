mod upload_modal;

pub use upload_modal::UploadDocumentModal;

use crate::domain::a001_document::api;
use crate::domain::a002_document_chunk::ui::list::ChunkList;
use crate::layout::Shell;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_state::LoadState;
use crate::system::auth::context::use_session;
use contracts::domain::a001_document::aggregate::{Document, DocumentId};
use contracts::shared::pagination::{Page, Pager};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

/// `/admin/knowledge-base`: paginated documents, the upload dialog and the
/// chunk panel.
#[component]
#[allow(non_snake_case)]
pub fn KnowledgeBasePage() -> impl IntoView {
    let session = use_session();

    let pager = RwSignal::new(Pager::new());
    let page = RwSignal::new(Page::<Document>::default());
    let state = RwSignal::new(LoadState::Idle);
    let reload = RwSignal::new(0u32);
    // Bumped whenever documents change so the chunk panel refetches too.
    let chunks_reload = RwSignal::new(0u32);
    let show_upload = RwSignal::new(false);
    let action_error = RwSignal::new(Option::<String>::None);

    let current_page = Memo::new(move |_| pager.with(|p| p.current()));

    Effect::new(move |_| {
        let requested = current_page.get();
        reload.track();
        let page_size = pager.with_untracked(|p| p.page_size());
        state.set(LoadState::Loading);
        spawn_local(async move {
            match api::list_documents(requested, page_size).await {
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

    let handle_delete = move |id: DocumentId, name: String| {
        let confirmed = web_sys::window()
            .and_then(|win| {
                win.confirm_with_message(&format!("Delete document \"{}\"?", name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let items_on_page = page.with_untracked(|p| p.objects.len());
        action_error.set(None);
        spawn_local(async move {
            match api::delete_document(id).await {
                Ok(()) => {
                    log::info!("document {} deleted", id);
                    pager.update(|p| {
                        p.after_delete(items_on_page);
                    });
                    reload.update(|v| *v += 1);
                    chunks_reload.update(|v| *v += 1);
                }
                Err(e) => action_error.set(session.handle_error(e)),
            }
        });
    };

    let on_created = Callback::new(move |_| {
        show_upload.set(false);
        reload.update(|v| *v += 1);
        chunks_reload.update(|v| *v += 1);
    });

    view! {
        <Shell>
            <div class="page">
                <div class="header">
                    <div class="header__content">
                        <h1 class="header__title">"Knowledge Base"</h1>
                    </div>
                    <div class="header__actions">
                        <button class="button button--primary" on:click=move |_| show_upload.set(true)>
                            {icon("upload")}
                            " Upload Document"
                        </button>
                    </div>
                </div>

                {move || state.get().error().or_else(|| action_error.get()).map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <section class="panel">
                    <h2 class="panel__title">"Documents"</h2>
                    <Show
                        when=move || !(state.get().is_loading() && page.with(|p| p.is_empty()))
                        fallback=|| view! { <div class="panel__hint">"Loading documents..."</div> }
                    >
                        <Show
                            when=move || !page.with(|p| p.is_empty())
                            fallback=|| view! { <div class="panel__hint">"No documents uploaded yet."</div> }
                        >
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Document"</th>
                                        <th>"Uploaded"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || page.with(|p| {
                                        p.objects
                                            .iter()
                                            .enumerate()
                                            .map(|(index, doc)| {
                                                let ordinal = p.ordinal(index);
                                                let id = doc.id;
                                                let name = doc.display_name();
                                                let name_for_delete = name.clone();
                                                let href = format!("/admin/documents?id={}", id);
                                                view! {
                                                    <tr>
                                                        <td>{ordinal}</td>
                                                        <td>
                                                            <A href=href>{icon("file-text")} " " {name}</A>
                                                        </td>
                                                        <td>{format_date(&doc.created_at)}</td>
                                                        <td class="table__actions">
                                                            <button
                                                                class="button button--danger"
                                                                title="Delete"
                                                                on:click=move |_| handle_delete(id, name_for_delete.clone())
                                                            >
                                                                {icon("trash")}
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()
                                    })}
                                </tbody>
                            </table>
                        </Show>
                    </Show>
                    <PaginationControls
                        pager=pager
                        total_count=Signal::derive(move || page.with(|p| p.total_count))
                        disabled=Signal::derive(move || state.get().is_loading())
                    />
                </section>

                <section class="panel">
                    <h2 class="panel__title">"Document Chunks"</h2>
                    <ChunkList reload=chunks_reload />
                </section>
            </div>

            <Show when=move || show_upload.get()>
                <UploadDocumentModal
                    on_close=Callback::new(move |_| show_upload.set(false))
                    on_created=on_created
                />
            </Show>
        </Shell>
    }
}
