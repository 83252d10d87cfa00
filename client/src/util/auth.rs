//! Session-aware navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The logout view only clears the session; these helpers decide where the
//! shell goes next and which links the navigation bar offers per role.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::routing::table::{HOME_PATH, ViewId};
use crate::state::session::{Role, SessionState};

/// Where to send the user once the logout view is active and the session is cleared.
#[must_use]
pub fn post_logout_redirect(active: ViewId, state: SessionState) -> Option<&'static str> {
    (active == ViewId::Logout && !state.is_logged_in()).then_some(HOME_PATH)
}

/// Where to send the user when the session changes from `prev` to `next`.
///
/// Only a logged-in to logged-out transition redirects, whatever view is
/// active, so a logout triggered from any page leaves that page.
#[must_use]
pub fn session_change_redirect(prev: SessionState, next: SessionState) -> Option<&'static str> {
    (prev.is_logged_in() && !next.is_logged_in()).then_some(HOME_PATH)
}

/// Target of the navigation bar brand link: the role's landing page, else home.
#[must_use]
pub fn brand_path(state: SessionState) -> &'static str {
    state.role().map_or(HOME_PATH, Role::landing_path)
}

/// Navigation bar entries as `(path, view)` for the given session.
#[must_use]
pub fn nav_links(state: SessionState) -> Vec<(&'static str, ViewId)> {
    let mut links = match state {
        SessionState::LoggedOut => {
            return vec![
                (HOME_PATH, ViewId::Home),
                ("/register", ViewId::Register),
                ("/admin/login", ViewId::AdminLogin),
            ];
        }
        SessionState::LoggedIn { role: None } => vec![(HOME_PATH, ViewId::Home)],
        SessionState::LoggedIn { role: Some(Role::Admin) } => vec![
            ("/admin/dashboard", ViewId::AdminDashboard),
            ("/admin/doctors", ViewId::AdminDoctors),
            ("/admin/patients", ViewId::AdminPatients),
            ("/admin/appointments", ViewId::AdminAppointments),
            ("/admin/departments", ViewId::AdminDepartments),
            ("/admin/reports", ViewId::AdminReports),
        ],
        SessionState::LoggedIn { role: Some(Role::Doctor) } => vec![
            ("/doctor/dashboard", ViewId::DoctorDashboard),
            ("/doctor/appointments", ViewId::DoctorAppointments),
            ("/doctor/availability", ViewId::DoctorAvailability),
            ("/doctor/profile", ViewId::DoctorProfile),
        ],
        SessionState::LoggedIn { role: Some(Role::Patient) } => vec![
            ("/patient/dashboard", ViewId::PatientDashboard),
            ("/patient/doctors", ViewId::PatientDoctors),
            ("/patient/appointments", ViewId::PatientAppointments),
            ("/patient/treatments", ViewId::PatientTreatments),
            ("/patient/history", ViewId::PatientHistory),
            ("/patient/reports", ViewId::PatientReports),
            ("/patient/profile", ViewId::PatientProfile),
        ],
    };
    links.push(("/logout", ViewId::Logout));
    links
}
