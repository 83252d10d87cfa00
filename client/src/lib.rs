//! # client
//!
//! Leptos + WASM single-page shell for the clinic portal (admin, doctor and
//! patient areas).
//!
//! This crate owns the route table and path resolution, the session flags
//! persisted in browser storage, and the root component that ties them to
//! the browser location. Page bodies are rendered by the views each route
//! names; the shell only frames them.

pub mod app;
pub mod components;
pub mod config;
pub mod pages;
pub mod routing;
pub mod state;
pub mod util;

/// Bootstrap the app in the browser: logging, panic hook, session, mount.
#[cfg(feature = "csr")]
pub fn start() {
    use std::sync::Arc;

    use leptos::prelude::*;

    use crate::app::App;
    use crate::config::ShellConfig;
    use crate::state::session::SessionStore;
    use crate::util::storage::BrowserStorage;

    console_error_panic_hook::set_once();

    let (config, config_error) = match ShellConfig::from_build_env() {
        Ok(config) => (config, None),
        Err(e) => (ShellConfig::default(), Some(e)),
    };
    if let Err(e) = console_log::init_with_level(config.log_level) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    if let Some(e) = config_error {
        log::error!("invalid build config, using defaults: {e}");
    }

    let routes = match routing::clinic_routes() {
        Ok(routes) => Arc::new(routes),
        Err(e) => {
            log::error!("route table failed to compile: {e}");
            return;
        }
    };
    let session = SessionStore::initialize(Arc::new(BrowserStorage), config.storage_keys.clone());
    log::info!(
        "clinic shell starting: base={} logged_in={}",
        config.router_base,
        session.is_logged_in()
    );

    leptos::mount::mount_to_body(move || view! { <App session routes config/> });
}
