//! Root application component with routing and context providers.

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::Router;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::nav_bar::NavBar;
use crate::config::ShellConfig;
use crate::pages::view_frame::ViewFrame;
use crate::routing::base::{join_base, strip_base};
use crate::routing::navigator::{NavigationEvent, Navigator};
use crate::routing::table::{Resolution, RouteTable};
use crate::state::session::{SessionState, SessionStore};
use crate::util::auth::{post_logout_redirect, session_change_redirect};

/// Path prefix the app is served under, provided via context.
#[derive(Clone, Debug)]
pub struct RouterBase(pub String);

/// Root application component.
///
/// Provides the session handle and a reactive copy of its state, then hands
/// every location change to the navigator.
#[component]
pub fn App(session: SessionStore, routes: Arc<RouteTable>, config: ShellConfig) -> impl IntoView {
    provide_meta_context();

    let session_state = RwSignal::new(session.state());
    let subscription = session.subscribe(move |state| session_state.set(state));
    let cleanup_session = session.clone();
    on_cleanup(move || {
        cleanup_session.unsubscribe(subscription);
    });

    provide_context(session.clone());
    provide_context(session_state);
    provide_context(RouterBase(config.router_base));

    let navigator = Arc::new(Mutex::new(Navigator::new(routes, session)));

    view! {
        <Title text="Clinic"/>

        <Router>
            <NavBar/>
            <main class="container mt-4">
                <RouteOutlet navigator/>
            </main>
        </Router>
    }
}

/// Resolves the current location and renders the matching view.
///
/// Also returns to `/` whenever the session goes from logged in to logged out,
/// whichever page triggered the logout.
#[component]
fn RouteOutlet(navigator: Arc<Mutex<Navigator>>) -> impl IntoView {
    let base = expect_context::<RouterBase>();
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();
    let navigate = use_navigate();
    let current = RwSignal::new(None::<Resolution>);

    let session_base = base.clone();
    let session_navigate = navigate.clone();
    Effect::new(move |prev: Option<SessionState>| {
        let next = session.get();
        if let Some(target) = prev.and_then(|prev| session_change_redirect(prev, next)) {
            let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
            session_navigate(&join_base(&session_base.0, target), replace);
        }
        next
    });

    Effect::new(move || {
        let pathname = location.pathname.get();
        let path = strip_base(&base.0, &pathname).to_owned();
        let resolution = {
            let mut nav = navigator.lock().unwrap_or_else(PoisonError::into_inner);
            nav.navigate(NavigationEvent::new(path.clone()))
        };

        let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
        if resolution.path != path {
            navigate(&join_base(&base.0, &resolution.path), replace);
        } else if let Some(target) =
            post_logout_redirect(resolution.view, session.get_untracked())
        {
            navigate(&join_base(&base.0, target), replace);
        }
        current.set(Some(resolution));
    });

    move || current.get().map(|resolution| view! { <ViewFrame resolution/> })
}
