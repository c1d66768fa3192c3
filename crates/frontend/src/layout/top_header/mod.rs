//! TopHeader component - application top navigation bar.

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

/// Dashboard link, the Knowledge Base link for the admin, and logout.
#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Knowledge Base Assistant"</span>
            </div>

            <nav class="top-header__nav">
                <A href="/dashboard" attr:class="top-header__link">
                    {icon("chat")}
                    <span>"Dashboard"</span>
                </A>
                <Show when=move || session.is_admin()>
                    <A href="/admin/knowledge-base" attr:class="top-header__link">
                        {icon("book")}
                        <span>"Knowledge Base"</span>
                    </A>
                </Show>
            </nav>

            <div class="top-header__actions">
                <span class="top-header__user">
                    {move || session.username.get().unwrap_or_default()}
                </span>
                <button class="top-header__icon-btn" on:click=logout title="Logout">
                    {icon("logout")}
                    <span>"Logout"</span>
                </button>
            </div>
        </div>
    }
}
