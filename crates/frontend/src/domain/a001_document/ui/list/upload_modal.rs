use crate::domain::a001_document::api;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::upload::upload_file;
use crate::system::auth::context::use_session;
use contracts::domain::a001_document::aggregate::CreateDocumentRequest;
use contracts::shared::upload::{format_size_mb, validate_upload, ALLOWED_FILE_TYPES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};
use wasm_bindgen::JsCast;

/// Upload dialog: validate, send through the bridge, then register the
/// document. Stays open with the error inline when any step fails.
#[component]
#[allow(non_snake_case)]
pub fn UploadDocumentModal(on_close: Callback<()>, on_created: Callback<()>) -> impl IntoView {
    let session = use_session();

    // web_sys::File is not Send; keep it in local storage.
    let file = RwSignal::new_local(Option::<web_sys::File>::None);
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let is_uploading = RwSignal::new(false);

    let on_file_change = move |ev: leptos::ev::Event| {
        let selected = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        error.set(None);
        if let Some(f) = &selected {
            if let Err(e) = validate_upload(&f.name(), f.size() as u64) {
                error.set(Some(e.to_string()));
            }
        }
        file.set(selected);
    };

    let submit = move || {
        if is_uploading.get_untracked() {
            return;
        }
        let selected = file.get_untracked();
        let (name, size) = selected
            .as_ref()
            .map(|f| (f.name(), f.size() as u64))
            .unwrap_or_default();
        if let Err(e) = validate_upload(&name, size) {
            error.set(Some(e.to_string()));
            return;
        }
        let Some(selected) = selected else {
            return;
        };

        is_uploading.set(true);
        error.set(None);
        let description = description.get_untracked().trim().to_string();
        spawn_local(async move {
            let file_url = match upload_file(selected).await.into_result() {
                Ok(url) => url,
                Err(message) => {
                    error.set(Some(message));
                    is_uploading.set(false);
                    return;
                }
            };

            let request = CreateDocumentRequest {
                file_url,
                description,
            };
            match api::create_document(&request).await {
                Ok(document) => {
                    log::info!("document {} created from {}", document.id, document.file_url);
                    is_uploading.set(false);
                    on_created.run(());
                }
                Err(e) => {
                    error.set(session.handle_error(e));
                    is_uploading.set(false);
                }
            }
        });
    };

    let accept = ALLOWED_FILE_TYPES.join(",");

    view! {
        <ModalFrame title="Upload Document" on_close=on_close locked=is_uploading>
            <div class="form">
                <label class="form__label" for="document-file">"File"</label>
                <input
                    id="document-file"
                    type="file"
                    accept=accept
                    class="form__input"
                    disabled=move || is_uploading.get()
                    on:change=on_file_change
                />
                {move || file.with(|f| f.as_ref().map(|f| {
                    let info = format!("{} ({})", f.name(), format_size_mb(f.size() as u64));
                    view! { <div class="form__hint">{info}</div> }
                }))}

                <label class="form__label" for="document-description">"Description"</label>
                <textarea
                    id="document-description"
                    class="form__input"
                    rows="3"
                    placeholder="What is this document about?"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                    disabled=move || is_uploading.get()
                ></textarea>

                {move || error.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <div class="form__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_uploading
                        on_click=move |_| on_close.run(())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || is_uploading.get() || file.with(|f| f.is_none()))
                        on_click=move |_| submit()
                    >
                        {move || if is_uploading.get() { "Uploading..." } else { "Upload" }}
                    </Button>
                </div>
            </div>
        </ModalFrame>
    }
}
