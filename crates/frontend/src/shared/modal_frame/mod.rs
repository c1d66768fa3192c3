use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Dialog surface with a title bar, rendered over a dimmed overlay.
///
/// Used by the upload and new-conversation dialogs. Action buttons belong to
/// the children.
#[component]
pub fn ModalFrame(
    /// Dialog heading.
    #[prop(into)]
    title: String,
    /// Called on the close button, Escape and overlay clicks.
    on_close: Callback<()>,
    /// Blocks every close path while a request is in flight.
    #[prop(optional, into)]
    locked: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Removing the overlay during its own click dispatch drops the handler
    // Leptos is still delegating to; close on the next tick instead.
    let request_close = move || {
        if locked.get_untracked() {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    // Press and release must both land on the overlay, so a text selection
    // dragged out of the dialog does not close it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            request_close();
        }
    };

    let handle_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            request_close();
        }
    };

    view! {
        <div
            class="modal-overlay"
            tabindex="-1"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
            on:keydown=handle_keydown
        >
            <div class="modal" role="dialog" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal__header">
                    <h3 class="modal__title">{title}</h3>
                    <button
                        class="modal__close"
                        title="Close"
                        disabled=move || locked.get()
                        on:click=move |_| request_close()
                    >
                        {icon("close")}
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
