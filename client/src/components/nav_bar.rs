//! Top navigation bar with role-appropriate links.
//!
//! SYSTEM CONTEXT
//! ==============
//! Re-renders whenever the session signal changes, so logging in or out swaps
//! the link set without a reload.

use leptos::prelude::*;

use crate::app::RouterBase;
use crate::routing::base::join_base;
use crate::state::session::SessionState;
use crate::util::auth::{brand_path, nav_links};

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let base = expect_context::<RouterBase>();

    let role_label = move || session.get().role().map(|role| role.to_string());
    let brand_base = base.clone();
    let brand_href = move || join_base(&brand_base.0, brand_path(session.get()));
    let links = move || {
        nav_links(session.get())
            .into_iter()
            .map(|(path, view)| {
                let href = join_base(&base.0, path);
                view! {
                    <li class="nav-item">
                        <a class="nav-link" href=href data-view=view.slug()>{view.title()}</a>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar navbar-expand navbar-light bg-light px-3">
            <a class="navbar-brand" href=brand_href>"Clinic"</a>
            <ul class="navbar-nav me-auto">{links}</ul>
            <span class="navbar-text">{role_label}</span>
        </nav>
    }
}
