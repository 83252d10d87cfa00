//! Navigation state: which view is active, and activation side effects.
//!
//! SYSTEM CONTEXT
//! ==============
//! The outlet feeds every location change through [`Navigator::navigate`].
//! Events are handled one at a time on the UI thread, so a navigation is
//! fully resolved before the next one is looked at.
//!
//! The only activation side effect is logout: entering the logout view
//! clears the session exactly once. Staying on `/logout` (same-view
//! navigation) does not re-trigger it; leaving and coming back does.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::sync::Arc;

use super::table::{Resolution, RouteTable, ViewId};
use crate::state::session::SessionStore;

/// A requested path, produced per URL change and consumed by the navigator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEvent {
    pub path: String,
}

impl NavigationEvent {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Resolves navigation events against a route table and tracks the active view.
#[derive(Debug)]
pub struct Navigator {
    routes: Arc<RouteTable>,
    session: SessionStore,
    active: Option<ViewId>,
}

impl Navigator {
    pub fn new(routes: Arc<RouteTable>, session: SessionStore) -> Self {
        Self { routes, session, active: None }
    }

    /// View shown after the last navigation, if any.
    #[must_use]
    pub fn active(&self) -> Option<ViewId> {
        self.active
    }

    /// Resolve `event`, make its view active, and run activation side effects.
    pub fn navigate(&mut self, event: NavigationEvent) -> Resolution {
        let resolution = self.routes.resolve(&event.path);
        let previous = self.active.replace(resolution.view);
        if previous != Some(resolution.view) {
            log::debug!("navigate: {} -> {:?}", event.path, resolution.view);
            self.activate(resolution.view);
        }
        resolution
    }

    fn activate(&self, view: ViewId) {
        if view == ViewId::Logout {
            self.session.logout();
        }
    }
}
