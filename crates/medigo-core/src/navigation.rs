//! Screen-level navigation as a pure reducer.

use serde::{Deserialize, Serialize};

/// Every screen of the application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Onboarding,
    Home,
    SearchResults,
    DrugDetails,
    Catalogue,
    PharmacyDetail,
    AdminLogin,
    AdminDashboard,
    PharmacyLogin,
    PharmacyDashboard,
    VerifyDrug,
    Profile,
    About,
}

impl ViewState {
    /// Views that require a login.
    pub fn is_dashboard(self) -> bool {
        matches!(self, ViewState::AdminDashboard | ViewState::PharmacyDashboard)
    }
}

/// Role picked during onboarding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Pharmacy,
}

/// Bottom navigation tabs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tab {
    Home,
    Catalogue,
    Verify,
    Profile,
}

/// User intents and async completions that move between screens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavEvent {
    OnboardingCompleted(Role),
    TabSelected(Tab),
    AdminRequested,
    PharmacyDashboardRequested,
    AdminLoginSucceeded,
    AdminLoginCancelled,
    PharmacyLoginSucceeded,
    PharmacyLoginCancelled,
    DashboardLogout,
    SearchCompleted,
    MedicationSelected,
    PharmacySelected,
    AboutRequested,
    SignedOut,
    Back,
}

/// Current screen plus the context needed to leave it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavState {
    pub view: ViewState,
    /// Where `Back` from drug details leads
    pub return_view: ViewState,
    pub role: Option<Role>,
    pub admin_authenticated: bool,
    pub pharmacy_authenticated: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            view: ViewState::Onboarding,
            return_view: ViewState::Home,
            role: None,
            admin_authenticated: false,
            pharmacy_authenticated: false,
        }
    }
}

impl NavState {
    fn go(self, view: ViewState) -> Self {
        Self { view, ..self }
    }
}

/// Next navigation state. Never touches anything outside `state`.
///
/// Authentication flags survive logout and sign-out; only a successful login sets them.
pub fn reduce(state: NavState, event: NavEvent) -> NavState {
    let next = match event {
        NavEvent::OnboardingCompleted(role) => {
            let view = match role {
                Role::Patient => ViewState::Home,
                Role::Pharmacy => ViewState::PharmacyLogin,
            };
            NavState {
                role: Some(role),
                ..state.go(view)
            }
        }
        NavEvent::TabSelected(tab) => state.go(match tab {
            Tab::Home => ViewState::Home,
            Tab::Catalogue => ViewState::Catalogue,
            Tab::Verify => ViewState::VerifyDrug,
            Tab::Profile => ViewState::Profile,
        }),
        NavEvent::AdminRequested => state.go(ViewState::AdminDashboard),
        NavEvent::PharmacyDashboardRequested => state.go(ViewState::PharmacyDashboard),
        NavEvent::AdminLoginSucceeded if state.view == ViewState::AdminLogin => NavState {
            admin_authenticated: true,
            ..state.go(ViewState::AdminDashboard)
        },
        NavEvent::PharmacyLoginSucceeded if state.view == ViewState::PharmacyLogin => NavState {
            pharmacy_authenticated: true,
            ..state.go(ViewState::PharmacyDashboard)
        },
        NavEvent::AdminLoginCancelled if state.view == ViewState::AdminLogin => state.go(ViewState::Home),
        NavEvent::PharmacyLoginCancelled if state.view == ViewState::PharmacyLogin => {
            state.go(ViewState::Onboarding)
        }
        NavEvent::DashboardLogout if state.view.is_dashboard() => state.go(ViewState::Onboarding),
        NavEvent::SearchCompleted => state.go(ViewState::SearchResults),
        NavEvent::MedicationSelected => {
            let origin = match state.view {
                ViewState::Catalogue | ViewState::SearchResults => state.view,
                _ => ViewState::Home,
            };
            NavState {
                return_view: origin,
                ..state.go(ViewState::DrugDetails)
            }
        }
        NavEvent::PharmacySelected if state.view == ViewState::SearchResults => state.go(ViewState::PharmacyDetail),
        NavEvent::AboutRequested if state.view == ViewState::Profile => state.go(ViewState::About),
        NavEvent::SignedOut => state.go(ViewState::Onboarding),
        NavEvent::Back => match state.view {
            ViewState::DrugDetails => state.go(state.return_view),
            ViewState::About => state.go(ViewState::Profile),
            ViewState::PharmacyDetail => state.go(ViewState::SearchResults),
            ViewState::SearchResults | ViewState::Catalogue | ViewState::AdminDashboard => {
                state.go(ViewState::Home)
            }
            _ => state,
        },
        // Events that do not apply to the current screen
        _ => state,
    };

    guard_dashboards(next)
}

/// Unauthenticated dashboard requests land on the matching login screen.
fn guard_dashboards(state: NavState) -> NavState {
    match state.view {
        ViewState::AdminDashboard if !state.admin_authenticated => state.go(ViewState::AdminLogin),
        ViewState::PharmacyDashboard if !state.pharmacy_authenticated => state.go(ViewState::PharmacyLogin),
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(events: &[NavEvent]) -> NavState {
        events.iter().fold(NavState::default(), |s, e| reduce(s, *e))
    }

    #[test]
    fn test_starts_at_onboarding() {
        assert_eq!(NavState::default().view, ViewState::Onboarding);
    }

    #[test]
    fn test_onboarding_by_role() {
        let patient = run(&[NavEvent::OnboardingCompleted(Role::Patient)]);
        assert_eq!(patient.view, ViewState::Home);
        assert_eq!(patient.role, Some(Role::Patient));

        let pharmacy = run(&[NavEvent::OnboardingCompleted(Role::Pharmacy)]);
        assert_eq!(pharmacy.view, ViewState::PharmacyLogin);
    }

    #[test]
    fn test_admin_requires_login() {
        let s = run(&[NavEvent::OnboardingCompleted(Role::Patient), NavEvent::AdminRequested]);
        assert_eq!(s.view, ViewState::AdminLogin);

        let s = reduce(s, NavEvent::AdminLoginSucceeded);
        assert_eq!(s.view, ViewState::AdminDashboard);
        assert!(s.admin_authenticated);

        // already authenticated: straight to the dashboard
        let s = reduce(reduce(s, NavEvent::Back), NavEvent::AdminRequested);
        assert_eq!(s.view, ViewState::AdminDashboard);
    }

    #[test]
    fn test_admin_cancel_goes_home() {
        let s = run(&[
            NavEvent::OnboardingCompleted(Role::Patient),
            NavEvent::AdminRequested,
            NavEvent::AdminLoginCancelled,
        ]);
        assert_eq!(s.view, ViewState::Home);
        assert!(!s.admin_authenticated);
    }

    #[test]
    fn test_pharmacy_login_flow() {
        let s = run(&[
            NavEvent::OnboardingCompleted(Role::Pharmacy),
            NavEvent::PharmacyLoginSucceeded,
        ]);
        assert_eq!(s.view, ViewState::PharmacyDashboard);
        assert!(s.pharmacy_authenticated);

        let s = reduce(s, NavEvent::DashboardLogout);
        assert_eq!(s.view, ViewState::Onboarding);
    }

    #[test]
    fn test_pharmacy_cancel_returns_to_onboarding() {
        let s = run(&[
            NavEvent::OnboardingCompleted(Role::Pharmacy),
            NavEvent::PharmacyLoginCancelled,
        ]);
        assert_eq!(s.view, ViewState::Onboarding);
    }

    #[test]
    fn test_login_success_ignored_elsewhere() {
        let s = run(&[NavEvent::OnboardingCompleted(Role::Patient), NavEvent::AdminLoginSucceeded]);
        assert_eq!(s.view, ViewState::Home);
        assert!(!s.admin_authenticated);
    }

    #[test]
    fn test_drug_details_returns_to_origin() {
        let from_results = run(&[
            NavEvent::OnboardingCompleted(Role::Patient),
            NavEvent::SearchCompleted,
            NavEvent::MedicationSelected,
        ]);
        assert_eq!(from_results.view, ViewState::DrugDetails);
        assert_eq!(reduce(from_results, NavEvent::Back).view, ViewState::SearchResults);

        let from_catalogue = run(&[
            NavEvent::OnboardingCompleted(Role::Patient),
            NavEvent::TabSelected(Tab::Catalogue),
            NavEvent::MedicationSelected,
        ]);
        assert_eq!(reduce(from_catalogue, NavEvent::Back).view, ViewState::Catalogue);
    }

    #[test]
    fn test_profile_about_and_sign_out() {
        let s = run(&[
            NavEvent::OnboardingCompleted(Role::Patient),
            NavEvent::TabSelected(Tab::Profile),
            NavEvent::AboutRequested,
        ]);
        assert_eq!(s.view, ViewState::About);
        let s = reduce(s, NavEvent::Back);
        assert_eq!(s.view, ViewState::Profile);
        assert_eq!(reduce(s, NavEvent::SignedOut).view, ViewState::Onboarding);
    }

    #[test]
    fn test_pharmacy_detail_from_results() {
        let s = run(&[
            NavEvent::OnboardingCompleted(Role::Patient),
            NavEvent::SearchCompleted,
            NavEvent::PharmacySelected,
        ]);
        assert_eq!(s.view, ViewState::PharmacyDetail);
        assert_eq!(reduce(s, NavEvent::Back).view, ViewState::SearchResults);
    }

    #[test]
    fn test_tabs() {
        let s = run(&[NavEvent::OnboardingCompleted(Role::Patient), NavEvent::TabSelected(Tab::Verify)]);
        assert_eq!(s.view, ViewState::VerifyDrug);
    }

    fn event_strategy() -> impl Strategy<Value = NavEvent> {
        prop_oneof![
            Just(NavEvent::OnboardingCompleted(Role::Patient)),
            Just(NavEvent::OnboardingCompleted(Role::Pharmacy)),
            Just(NavEvent::TabSelected(Tab::Home)),
            Just(NavEvent::TabSelected(Tab::Catalogue)),
            Just(NavEvent::TabSelected(Tab::Profile)),
            Just(NavEvent::AdminRequested),
            Just(NavEvent::PharmacyDashboardRequested),
            Just(NavEvent::AdminLoginCancelled),
            Just(NavEvent::PharmacyLoginCancelled),
            Just(NavEvent::DashboardLogout),
            Just(NavEvent::SearchCompleted),
            Just(NavEvent::MedicationSelected),
            Just(NavEvent::PharmacySelected),
            Just(NavEvent::AboutRequested),
            Just(NavEvent::SignedOut),
            Just(NavEvent::Back),
        ]
    }

    proptest! {
        #[test]
        fn dashboards_unreachable_without_login(events in proptest::collection::vec(event_strategy(), 0..40)) {
            let mut state = NavState::default();
            for event in events {
                state = reduce(state, event);
                prop_assert!(!state.admin_authenticated);
                prop_assert!(!state.pharmacy_authenticated);
                prop_assert!(!state.view.is_dashboard());
            }
        }
    }
}
