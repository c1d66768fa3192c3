use crate::domain::a001_document::ui::details::DocumentDetailsPage;
use crate::domain::a001_document::ui::list::KnowledgeBasePage;
use crate::layout::dashboard::DashboardPage;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="page">"404 - Page Not Found"</div> }>
                <Route path=path!("/") view=|| view! { <Redirect path="/dashboard" /> } />
                <Route path=path!("/login") view=LoginPage />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                />
                <Route
                    path=path!("/admin/knowledge-base")
                    view=|| view! { <RequireAdmin><KnowledgeBasePage /></RequireAdmin> }
                />
                <Route
                    path=path!("/admin/documents")
                    view=|| view! { <RequireAdmin><DocumentDetailsPage /></RequireAdmin> }
                />
            </Routes>
        </Router>
    }
}
