//! Design AI Hub frontend: Leptos CSR application shell and routing.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod api;
pub mod auth;
pub mod components;
pub mod generation;
pub mod pages;
pub mod session;
pub mod stages;
pub mod theme;

use auth::GuardDecision;

// ── Routing ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Dashboard,
    History,
    AdminUsers,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Dashboard | Route::History | Route::AdminUsers)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Route::AdminUsers)
    }
}

#[derive(Clone, Copy)]
pub struct Router {
    pub route: RwSignal<Route>,
    /// Destination preserved by the guard so login can return the user to
    /// the page they originally asked for.
    pub after_login: RwSignal<Option<Route>>,
}

impl Router {
    pub fn navigate(&self, route: Route) {
        self.route.set(route);
    }

    /// Consume the saved post-login destination, if any.
    pub fn take_after_login(&self) -> Option<Route> {
        let mut saved = None;
        self.after_login.update_untracked(|v| saved = v.take());
        saved
    }
}

pub fn provide_router() {
    provide_context(Router {
        route: RwSignal::new(Route::Home),
        after_login: RwSignal::new(None),
    });
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

// ── App shell ──

#[component]
pub fn App() -> impl IntoView {
    theme::provide_theme();
    auth::provide_auth_state();
    provide_router();

    let router = use_router();
    let auth_state = auth::use_auth();

    let guarded = move || {
        let route = router.route.get();
        match auth::guard_route(route, auth_state.snapshot()) {
            GuardDecision::Pending => {
                view! { <components::spinner::Spinner label="Loading..."/> }.into_any()
            }
            GuardDecision::RedirectToLogin => {
                router.after_login.update_untracked(|v| *v = Some(route));
                view! { <pages::auth::AuthPage/> }.into_any()
            }
            GuardDecision::RedirectToDashboard => {
                view! { <pages::dashboard::DashboardPage/> }.into_any()
            }
            GuardDecision::Allow => match route {
                Route::Home => view! { <pages::home::HomePage/> }.into_any(),
                Route::Login => view! { <pages::auth::AuthPage/> }.into_any(),
                Route::Dashboard => view! { <pages::dashboard::DashboardPage/> }.into_any(),
                Route::History => view! { <pages::history::HistoryPage/> }.into_any(),
                Route::AdminUsers => view! { <pages::admin_users::AdminUsersPage/> }.into_any(),
            },
        }
    };

    view! {
        <components::nav_bar::NavBar/>
        <div class="content">{guarded}</div>
    }
}

#[wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
