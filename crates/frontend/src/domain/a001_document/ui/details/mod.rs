use crate::domain::a001_document::api;
use crate::domain::a002_document_chunk::ui::list::ChunkList;
use crate::layout::Shell;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a001_document::aggregate::{Document, DocumentId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

/// `/admin/documents?id=<id>`: one document and its chunks.
#[component]
#[allow(non_snake_case)]
pub fn DocumentDetailsPage() -> impl IntoView {
    let query = use_query_map();
    let document_id = Memo::new(move |_| {
        query.with(|q| q.get("id").and_then(|id| id.parse::<DocumentId>().ok()))
    });

    view! {
        <Shell>
            <div class="page">
                <div class="header">
                    <div class="header__content">
                        <A href="/admin/knowledge-base">{icon("chevron-left")} " Knowledge Base"</A>
                    </div>
                </div>
                {move || match document_id.get() {
                    Some(id) => view! { <DocumentDetails id=id /> }.into_any(),
                    None => view! {
                        <div class="warning-box warning-box--error">
                            <span class="warning-box__text">"No document selected."</span>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </Shell>
    }
}

#[component]
#[allow(non_snake_case)]
fn DocumentDetails(id: DocumentId) -> impl IntoView {
    let session = use_session();
    let document = RwSignal::new(Option::<Document>::None);
    let error = RwSignal::new(Option::<String>::None);

    spawn_local(async move {
        match api::get_document(id).await {
            Ok(doc) => document.set(Some(doc)),
            Err(e) => error.set(session.handle_error(e)),
        }
    });

    view! {
        {move || error.get().map(|e| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e}</span>
            </div>
        })}
        <section class="panel">
            {move || document.get().map(|doc| view! {
                <h1 class="header__title">{doc.display_name()}</h1>
                <dl class="details">
                    <dt>"File"</dt>
                    <dd>{doc.file_url.clone()}</dd>
                    <dt>"Description"</dt>
                    <dd>{if doc.description.trim().is_empty() { "-".to_string() } else { doc.description.clone() }}</dd>
                    <dt>"Uploaded"</dt>
                    <dd>{format_datetime(&doc.created_at)}</dd>
                    <dt>"Updated"</dt>
                    <dd>{format_datetime(&doc.updated_at)}</dd>
                </dl>
            })}
        </section>
        <section class="panel">
            <h2 class="panel__title">"Chunks"</h2>
            <ChunkList document_id=id />
        </section>
    }
}
