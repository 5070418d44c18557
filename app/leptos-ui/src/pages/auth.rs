use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth;
use crate::{use_router, Route};

/// Login / signup form. The submit action is disabled while an attempt is
/// in flight, which is what keeps concurrent login attempts from racing.
/// After a successful login, admins land on the user table and everyone
/// else returns to whatever protected page the guard bounced them from.
#[component]
pub fn AuthPage() -> impl IntoView {
    let router = use_router();
    let auth_state = auth::use_auth();

    let (is_signup, set_is_signup) = signal(false);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit = move |_| {
        set_error_msg.set(None);
        let signup = is_signup.get_untracked();
        let name = full_name.get_untracked();
        let mail = email.get_untracked();
        let pass = password.get_untracked();

        spawn_local(async move {
            let result = if signup {
                auth::signup(auth_state, &name, &mail, &pass).await
            } else {
                auth::login(auth_state, &mail, &pass).await
            };
            match result {
                Ok(user) => {
                    let dest = if user.is_admin {
                        Route::AdminUsers
                    } else {
                        router.take_after_login().unwrap_or(Route::Dashboard)
                    };
                    router.navigate(dest);
                }
                Err(e) => set_error_msg.set(Some(e.message)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1>{move || if is_signup.get() { "Create an account" } else { "Welcome back" }}</h1>

            {move || error_msg.get().map(|msg| view! {
                <div class="auth-error">{msg}</div>
            })}

            <div class="auth-form">
                {move || is_signup.get().then(|| view! {
                    <input
                        type="text"
                        placeholder="Full name"
                        prop:value=move || full_name.get()
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    />
                })}
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button
                    class="auth-submit"
                    disabled=move || auth_state.busy.get()
                    on:click=submit
                >
                    {move || match (is_signup.get(), auth_state.busy.get()) {
                        (_, true) => "Please wait...",
                        (true, _) => "Sign up",
                        (false, _) => "Log in",
                    }}
                </button>
            </div>

            <button
                class="auth-switch"
                on:click=move |_| set_is_signup.update(|v| *v = !*v)
            >
                {move || if is_signup.get() {
                    "Already have an account? Log in"
                } else {
                    "New here? Create an account"
                }}
            </button>
        </div>
    }
}
