//! Logout view. Clearing the session happens when the navigator activates
//! this view; the page itself only shows a transient message.

use leptos::prelude::*;

#[component]
pub fn LogoutPage() -> impl IntoView {
    view! {
        <div class="text-center mt-5">
            <h3>"Logging out..."</h3>
        </div>
    }
}
