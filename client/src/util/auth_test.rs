use super::*;
use crate::routing::table::clinic_routes;

#[test]
fn redirects_home_once_logout_view_clears_session() {
    assert_eq!(post_logout_redirect(ViewId::Logout, SessionState::LoggedOut), Some("/"));
}

#[test]
fn no_redirect_while_session_still_active() {
    let state = SessionState::LoggedIn { role: Some(Role::Doctor) };
    assert_eq!(post_logout_redirect(ViewId::Logout, state), None);
}

#[test]
fn no_redirect_from_other_views() {
    assert_eq!(post_logout_redirect(ViewId::Home, SessionState::LoggedOut), None);
    assert_eq!(post_logout_redirect(ViewId::Register, SessionState::LoggedOut), None);
}

#[test]
fn session_ending_on_any_page_redirects_home() {
    for role in [None, Some(Role::Admin), Some(Role::Doctor), Some(Role::Patient)] {
        let prev = SessionState::LoggedIn { role };
        let redirect = session_change_redirect(prev, SessionState::LoggedOut);
        assert_eq!(redirect, Some("/"), "{role:?}");
    }
}

#[test]
fn session_change_without_logout_does_not_redirect() {
    let admin = SessionState::LoggedIn { role: Some(Role::Admin) };
    let doctor = SessionState::LoggedIn { role: Some(Role::Doctor) };
    assert_eq!(session_change_redirect(SessionState::LoggedOut, admin), None);
    assert_eq!(session_change_redirect(admin, doctor), None);
    let logged_out = SessionState::LoggedOut;
    assert_eq!(session_change_redirect(logged_out, logged_out), None);
}

#[test]
fn store_logout_from_dashboard_yields_home_redirect() {
    use crate::config::StorageKeys;
    use crate::state::session::SessionStore;
    use crate::util::storage::MemoryStorage;
    use std::sync::{Arc, Mutex};

    let storage = Arc::new(MemoryStorage::with_entries([("token", "t"), ("role", "admin")]));
    let store = SessionStore::initialize(storage, StorageKeys::default());
    let last = Arc::new(Mutex::new(store.state()));
    let redirects = Arc::new(Mutex::new(Vec::new()));
    let (seen, sink) = (last.clone(), redirects.clone());
    store.subscribe(move |next| {
        let mut prev = seen.lock().unwrap();
        sink.lock().unwrap().push(session_change_redirect(*prev, next));
        *prev = next;
    });

    store.logout();
    assert_eq!(*redirects.lock().unwrap(), vec![Some("/")]);
}

#[test]
fn brand_links_to_role_landing_page() {
    let doctor = SessionState::LoggedIn { role: Some(Role::Doctor) };
    assert_eq!(brand_path(doctor), "/doctor/dashboard");
    assert_eq!(brand_path(SessionState::LoggedIn { role: None }), "/");
    assert_eq!(brand_path(SessionState::LoggedOut), "/");
}

#[test]
fn logged_out_links_are_public_and_have_no_logout() {
    let links = nav_links(SessionState::LoggedOut);
    assert_eq!(links.first(), Some(&("/", ViewId::Home)));
    assert!(links.iter().all(|(_, view)| *view != ViewId::Logout));
}

#[test]
fn logged_in_links_end_with_logout() {
    for role in [None, Some(Role::Admin), Some(Role::Doctor), Some(Role::Patient)] {
        let links = nav_links(SessionState::LoggedIn { role });
        assert_eq!(links.last(), Some(&("/logout", ViewId::Logout)), "{role:?}");
    }
}

#[test]
fn role_links_start_at_landing_path() {
    for role in [Role::Admin, Role::Doctor, Role::Patient] {
        let links = nav_links(SessionState::LoggedIn { role: Some(role) });
        assert_eq!(links[0].0, role.landing_path());
    }
}

#[test]
fn every_nav_link_resolves_to_its_view() {
    let table = clinic_routes().unwrap();
    let states = [
        SessionState::LoggedOut,
        SessionState::LoggedIn { role: None },
        SessionState::LoggedIn { role: Some(Role::Admin) },
        SessionState::LoggedIn { role: Some(Role::Doctor) },
        SessionState::LoggedIn { role: Some(Role::Patient) },
    ];
    for state in states {
        for (path, view) in nav_links(state) {
            assert_eq!(table.resolve(path).view, view, "{path}");
        }
    }
}
