//! Authentication state and route guarding.
//!
//! Startup resolves `loading → {authenticated, unauthenticated}` from the
//! session store synchronously; after that the state changes only through
//! explicit login/signup/logout calls. Guard decisions are a pure function
//! of the requested route and an auth snapshot, so the routing shell stays
//! trivial and the policy stays testable.

use leptos::prelude::*;

use hub_api_types::ApiUser;

use crate::api::{self, ApiError};
use crate::{session, Route};

#[derive(Clone, Copy)]
pub struct AuthState {
    pub user: RwSignal<Option<ApiUser>>,
    /// True until the stored session has been examined.
    pub loading: RwSignal<bool>,
    /// True while a login/signup call is in flight; the submit action is
    /// disabled so concurrent attempts cannot race.
    pub busy: RwSignal<bool>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(|u| u.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|u| u.as_ref().is_some_and(|u| u.is_admin))
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            loading: self.loading.get(),
            authenticated: self.is_authenticated(),
            admin: self.is_admin(),
        }
    }
}

/// Install the auth context, resolving it from durable storage. A session
/// with a token but no parseable profile (or vice versa) is wiped; half a
/// session is no session.
pub fn provide_auth_state() {
    let state = AuthState {
        user: RwSignal::new(None),
        loading: RwSignal::new(true),
        busy: RwSignal::new(false),
    };
    match (session::token(), session::user()) {
        (Some(_), Some(user)) => state.user.set(Some(user)),
        _ => session::clear(),
    }
    state.loading.set(false);
    provide_context(state);
}

pub fn use_auth() -> AuthState {
    expect_context::<AuthState>()
}

// ── Login / signup / logout ──

fn apply_auth_success(state: AuthState, token: &str, user: ApiUser) {
    session::set_token(token);
    session::set_user(&user);
    state.user.set(Some(user));
}

fn apply_auth_failure(state: AuthState) {
    // Clean up any partial data so a failed attempt cannot leave a
    // half-written session behind.
    session::clear();
    state.user.set(None);
}

pub async fn login(state: AuthState, email: &str, password: &str) -> Result<ApiUser, ApiError> {
    if state.busy.get_untracked() {
        return Err(ApiError::new("Sign-in already in progress"));
    }
    state.busy.set(true);
    let result = api::login(email, password).await;
    state.busy.set(false);
    match result {
        Ok(resp) => {
            apply_auth_success(state, &resp.token, resp.user.clone());
            Ok(resp.user)
        }
        Err(e) => {
            apply_auth_failure(state);
            Err(e)
        }
    }
}

pub async fn signup(
    state: AuthState,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<ApiUser, ApiError> {
    if state.busy.get_untracked() {
        return Err(ApiError::new("Signup already in progress"));
    }
    state.busy.set(true);
    let result = api::signup(full_name, email, password).await;
    state.busy.set(false);
    match result {
        Ok(resp) => {
            apply_auth_success(state, &resp.token, resp.user.clone());
            Ok(resp.user)
        }
        Err(e) => {
            apply_auth_failure(state);
            Err(e)
        }
    }
}

pub fn logout(state: AuthState) {
    session::clear();
    state.user.set(None);
}

// ── Route guarding ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub loading: bool,
    pub authenticated: bool,
    pub admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth still resolving; render a neutral placeholder, decide nothing.
    Pending,
    Allow,
    /// Unauthenticated on a protected route. The caller saves the requested
    /// destination so a successful login can return there.
    RedirectToLogin,
    /// Authenticated but not admin on an admin route.
    RedirectToDashboard,
}

pub fn guard_route(route: Route, auth: AuthSnapshot) -> GuardDecision {
    if !route.requires_auth() {
        return GuardDecision::Allow;
    }
    if auth.loading {
        return GuardDecision::Pending;
    }
    if !auth.authenticated {
        return GuardDecision::RedirectToLogin;
    }
    if route.requires_admin() && !auth.admin {
        return GuardDecision::RedirectToDashboard;
    }
    GuardDecision::Allow
}
