//! The clinic route table and path resolution.
//!
//! Routes are checked in declaration order and the first structural match
//! wins; there is no specificity scoring. That makes order load-bearing:
//! `/admin/patient/:id/history` has to come before `/admin/patient/:id` or
//! the history page can never be reached. The last entry is a catch-all
//! redirect to `/`, so resolution never fails and there is no 404 view.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use super::pattern::{Params, PatternError, RoutePattern};

/// Upper bound on redirect hops before giving up and showing the home view.
pub const MAX_REDIRECTS: usize = 8;

pub const HOME_PATH: &str = "/";

/// Identifies the page a path resolves to. Pages themselves live outside the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    // Public
    Home,
    Register,
    // Admin
    AdminLogin,
    AdminDashboard,
    AdminDoctors,
    AdminPatients,
    AdminAppointments,
    AdminReports,
    AdminDepartments,
    AdminPatientHistory,
    AdminPatientDetails,
    // Doctor
    DoctorDashboard,
    DoctorProfile,
    DoctorAppointments,
    DoctorAvailability,
    DoctorPatientHistory,
    // Patient
    PatientDashboard,
    PatientProfile,
    PatientDoctors,
    PatientAppointments,
    PatientTreatments,
    PatientReports,
    PatientHistory,
    // Shared
    DepartmentDetails,
    BookAppointment,
    Logout,
}

/// Area of the app a view belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Public,
    Admin,
    Doctor,
    Patient,
    Shared,
    Session,
}

impl Section {
    /// Lowercase name used in markup attributes.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
            Self::Shared => "shared",
            Self::Session => "session",
        }
    }
}

impl ViewId {
    /// Every page view, in route table order. Excludes [`ViewId::Logout`].
    pub const PAGES: [ViewId; 25] = [
        Self::Home,
        Self::Register,
        Self::AdminLogin,
        Self::AdminDashboard,
        Self::AdminDoctors,
        Self::AdminPatients,
        Self::AdminAppointments,
        Self::AdminReports,
        Self::AdminDepartments,
        Self::AdminPatientHistory,
        Self::AdminPatientDetails,
        Self::DoctorDashboard,
        Self::DoctorProfile,
        Self::DoctorAppointments,
        Self::DoctorAvailability,
        Self::DoctorPatientHistory,
        Self::PatientDashboard,
        Self::PatientProfile,
        Self::PatientDoctors,
        Self::PatientAppointments,
        Self::PatientTreatments,
        Self::DepartmentDetails,
        Self::BookAppointment,
        Self::PatientReports,
        Self::PatientHistory,
    ];

    /// Stable kebab-case name, used as a DOM data attribute.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Register => "register",
            Self::AdminLogin => "admin-login",
            Self::AdminDashboard => "admin-dashboard",
            Self::AdminDoctors => "admin-doctors",
            Self::AdminPatients => "admin-patients",
            Self::AdminAppointments => "admin-appointments",
            Self::AdminReports => "admin-reports",
            Self::AdminDepartments => "admin-departments",
            Self::AdminPatientHistory => "admin-patient-history",
            Self::AdminPatientDetails => "admin-patient-details",
            Self::DoctorDashboard => "doctor-dashboard",
            Self::DoctorProfile => "doctor-profile",
            Self::DoctorAppointments => "doctor-appointments",
            Self::DoctorAvailability => "doctor-availability",
            Self::DoctorPatientHistory => "doctor-patient-history",
            Self::PatientDashboard => "patient-dashboard",
            Self::PatientProfile => "patient-profile",
            Self::PatientDoctors => "patient-doctors",
            Self::PatientAppointments => "patient-appointments",
            Self::PatientTreatments => "patient-treatments",
            Self::PatientReports => "patient-reports",
            Self::PatientHistory => "patient-history",
            Self::DepartmentDetails => "department-details",
            Self::BookAppointment => "book-appointment",
            Self::Logout => "logout",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Register => "Register",
            Self::AdminLogin => "Admin Login",
            Self::AdminDashboard => "Admin Dashboard",
            Self::AdminDoctors => "Doctors",
            Self::AdminPatients => "Patients",
            Self::AdminAppointments => "Appointments",
            Self::AdminReports => "Reports",
            Self::AdminDepartments => "Departments",
            Self::AdminPatientHistory | Self::DoctorPatientHistory => "Patient History",
            Self::AdminPatientDetails => "Patient Details",
            Self::DoctorDashboard => "Doctor Dashboard",
            Self::DoctorProfile | Self::PatientProfile => "My Profile",
            Self::DoctorAppointments | Self::PatientAppointments => "My Appointments",
            Self::DoctorAvailability => "Availability",
            Self::PatientDashboard => "Patient Dashboard",
            Self::PatientDoctors => "Find a Doctor",
            Self::PatientTreatments => "Treatments",
            Self::PatientReports => "Export Reports",
            Self::PatientHistory => "My History",
            Self::DepartmentDetails => "Department",
            Self::BookAppointment => "Book Appointment",
            Self::Logout => "Logging out",
        }
    }

    #[must_use]
    pub fn section(self) -> Section {
        match self {
            Self::Home | Self::Register => Section::Public,
            Self::AdminLogin
            | Self::AdminDashboard
            | Self::AdminDoctors
            | Self::AdminPatients
            | Self::AdminAppointments
            | Self::AdminReports
            | Self::AdminDepartments
            | Self::AdminPatientHistory
            | Self::AdminPatientDetails => Section::Admin,
            Self::DoctorDashboard
            | Self::DoctorProfile
            | Self::DoctorAppointments
            | Self::DoctorAvailability
            | Self::DoctorPatientHistory => Section::Doctor,
            Self::PatientDashboard
            | Self::PatientProfile
            | Self::PatientDoctors
            | Self::PatientAppointments
            | Self::PatientTreatments
            | Self::PatientReports
            | Self::PatientHistory => Section::Patient,
            Self::DepartmentDetails | Self::BookAppointment => Section::Shared,
            Self::Logout => Section::Session,
        }
    }
}

/// What a matched route does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    View(ViewId),
    Redirect(String),
}

#[derive(Clone, Debug)]
pub struct Route {
    pub pattern: RoutePattern,
    pub target: RouteTarget,
}

/// Outcome of resolving a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub view: ViewId,
    pub params: Params,
    /// Path actually shown, after any redirects. Differs from the request on redirect.
    pub path: String,
}

impl Resolution {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Ordered, immutable list of routes.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile `(pattern, target)` pairs, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<'a>(
        defs: impl IntoIterator<Item = (&'a str, RouteTarget)>,
    ) -> Result<Self, PatternError> {
        let routes = defs
            .into_iter()
            .map(|(pattern, target)| Ok(Route { pattern: RoutePattern::parse(pattern)?, target }))
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { routes })
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route whose pattern matches `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    /// Resolve `path` to a view, following redirects.
    ///
    /// Never fails: unmatched paths, and redirect chains longer than
    /// [`MAX_REDIRECTS`], land on the home view at `/`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        let mut current = path.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            match self.find(&current) {
                Some((Route { target: RouteTarget::View(view), .. }, params)) => {
                    return Resolution { view: *view, params, path: current };
                }
                Some((Route { target: RouteTarget::Redirect(to), .. }, _)) => {
                    log::debug!("route redirect: {current} -> {to}");
                    current.clone_from(to);
                }
                None => break,
            }
        }
        log::warn!("no route resolved for {path}, falling back to {HOME_PATH}");
        Resolution { view: ViewId::Home, params: Params::new(), path: HOME_PATH.to_owned() }
    }
}

/// Route definitions for the clinic app, in match order.
#[must_use]
pub fn clinic_route_defs() -> Vec<(&'static str, RouteTarget)> {
    use RouteTarget::{Redirect, View};
    vec![
        // Public
        ("/", View(ViewId::Home)),
        ("/register", View(ViewId::Register)),
        // Admin
        ("/admin/login", View(ViewId::AdminLogin)),
        ("/admin/dashboard", View(ViewId::AdminDashboard)),
        ("/admin/doctors", View(ViewId::AdminDoctors)),
        ("/admin/patients", View(ViewId::AdminPatients)),
        ("/admin/appointments", View(ViewId::AdminAppointments)),
        ("/admin/reports", View(ViewId::AdminReports)),
        ("/admin/departments", View(ViewId::AdminDepartments)),
        ("/admin/patient/:id/history", View(ViewId::AdminPatientHistory)),
        ("/admin/patient/:id", View(ViewId::AdminPatientDetails)),
        // Doctor
        ("/doctor/dashboard", View(ViewId::DoctorDashboard)),
        ("/doctor/profile", View(ViewId::DoctorProfile)),
        ("/doctor/appointments", View(ViewId::DoctorAppointments)),
        ("/doctor/availability", View(ViewId::DoctorAvailability)),
        ("/doctor/patient/:id/history", View(ViewId::DoctorPatientHistory)),
        // Patient
        ("/patient/dashboard", View(ViewId::PatientDashboard)),
        ("/patient/profile", View(ViewId::PatientProfile)),
        ("/patient/doctors", View(ViewId::PatientDoctors)),
        ("/patient/appointments", View(ViewId::PatientAppointments)),
        ("/patient/treatments", View(ViewId::PatientTreatments)),
        ("/department/:id", View(ViewId::DepartmentDetails)),
        ("/book/:id", View(ViewId::BookAppointment)),
        ("/patient/reports", View(ViewId::PatientReports)),
        ("/patient/history", View(ViewId::PatientHistory)),
        // Session
        ("/logout", View(ViewId::Logout)),
        // Fallback
        ("/*pathMatch", Redirect(HOME_PATH.to_owned())),
    ]
}

/// Compile the clinic route table.
///
/// # Errors
///
/// Returns an error only if a definition in [`clinic_route_defs`] is malformed.
pub fn clinic_routes() -> Result<RouteTable, PatternError> {
    RouteTable::new(clinic_route_defs())
}

/// Map the `redirect` hint the login endpoint puts in its token claims to a route.
///
/// Login pages call this after a successful sign-in; the shell itself has no
/// login flow.
#[must_use]
pub fn redirect_hint_path(hint: &str) -> Option<&'static str> {
    match hint {
        "admin_dashboard" => Some("/admin/dashboard"),
        "doctor_dashboard" => Some("/doctor/dashboard"),
        "doctor_profile" => Some("/doctor/profile"),
        "patient_dashboard" => Some("/patient/dashboard"),
        _ => None,
    }
}
