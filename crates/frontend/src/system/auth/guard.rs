use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_session;

/// Renders its children only while a token is stored; otherwise redirects to
/// `/login`. Clearing the session later (logout, 401) redirects as well.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}

/// Admin-only pages. Anonymous users go to `/login`, everybody else to
/// `/dashboard`.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_admin()
            fallback=move || {
                if session.is_authenticated() {
                    view! { <Redirect path="/dashboard" /> }.into_any()
                } else {
                    view! { <Redirect path="/login" /> }.into_any()
                }
            }
        >
            {children()}
        </Show>
    }
}
