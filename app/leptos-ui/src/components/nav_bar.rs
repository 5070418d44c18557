use leptos::prelude::*;

use crate::auth;
use crate::theme::use_theme;
use crate::{use_router, Route};

/// Sun/moon toggle icon for the current theme.
fn theme_icon(dark: bool) -> &'static str {
    if dark {
        // Sun: clicking switches to light
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="5"/><line x1="12" y1="1" x2="12" y2="3"/><line x1="12" y1="21" x2="12" y2="23"/><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"/><line x1="18.36" y1="18.36" x2="19.78" y2="19.78"/><line x1="1" y1="12" x2="3" y2="12"/><line x1="21" y1="12" x2="23" y2="12"/><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"/><line x1="18.36" y1="5.64" x2="19.78" y2="4.22"/></svg>"#
    } else {
        // Moon: clicking switches to dark
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M21 12.79A9 9 0 1111.21 3 7 7 0 0021 12.79z"/></svg>"#
    }
}

#[component]
fn NavLink(route: Route, label: &'static str) -> impl IntoView {
    let router = use_router();
    view! {
        <button
            class=move || {
                if router.route.get() == route { "nav-link nav-link-active" } else { "nav-link" }
            }
            on:click=move |_| router.navigate(route)
        >
            {label}
        </button>
    }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let router = use_router();
    let auth_state = auth::use_auth();
    let theme = use_theme();

    view! {
        <header class="nav-bar">
            <button class="nav-brand" on:click=move |_| router.navigate(Route::Home)>
                "Design AI Hub"
            </button>

            <nav class="nav-links">
                {move || auth_state.is_authenticated().then(|| view! {
                    <NavLink route=Route::Dashboard label="Dashboard"/>
                    <NavLink route=Route::History label="History"/>
                })}
                {move || auth_state.is_admin().then(|| view! {
                    <NavLink route=Route::AdminUsers label="Users"/>
                })}
            </nav>

            <div class="nav-actions">
                <button
                    class="nav-theme-toggle"
                    on:click=move |_| theme.toggle()
                    inner_html=move || theme_icon(theme.is_dark())
                ></button>
                {move || if auth_state.is_authenticated() {
                    let name = auth_state
                        .user
                        .with(|u| u.as_ref().map(|u| u.full_name.clone()).unwrap_or_default());
                    view! {
                        <span class="nav-user">{name}</span>
                        <button
                            class="nav-auth-btn"
                            on:click=move |_| {
                                auth::logout(auth_state);
                                router.navigate(Route::Login);
                            }
                        >
                            "Log out"
                        </button>
                    }.into_any()
                } else {
                    view! {
                        <button
                            class="nav-auth-btn"
                            on:click=move |_| router.navigate(Route::Login)
                        >
                            "Sign in"
                        </button>
                    }.into_any()
                }}
            </div>
        </header>
    }
}
