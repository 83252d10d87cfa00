//! Frame rendered for a resolved route.
//!
//! Page bodies are implemented outside the shell; the frame marks the active
//! view with `data-view` and lists the captured route parameters they receive.

#[cfg(test)]
#[path = "view_frame_test.rs"]
mod view_frame_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::pages::logout::LogoutPage;
use crate::routing::table::{Resolution, ViewId};

/// Render the page for `resolution`.
#[component]
pub fn ViewFrame(resolution: Resolution) -> impl IntoView {
    if resolution.view == ViewId::Logout {
        return view! { <LogoutPage/> }.into_any();
    }

    let view_id = resolution.view;
    let params = param_rows(&resolution);

    view! {
        <section class="page" data-view=view_id.slug() data-section=view_id.section().slug()>
            <h2 class="page__title">{view_id.title()}</h2>
            {(!params.is_empty()).then(|| view! {
                <dl class="page__params">
                    {params
                        .into_iter()
                        .map(|(name, value)| view! {
                            <dt>{name}</dt>
                            <dd>{value}</dd>
                        })
                        .collect_view()}
                </dl>
            })}
        </section>
    }
    .into_any()
}

/// Owned `(name, value)` rows for the parameter list.
fn param_rows(resolution: &Resolution) -> Vec<(String, String)> {
    let mut rows = Vec::with_capacity(resolution.params.len());
    rows.extend(resolution.params.iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
    rows
}
