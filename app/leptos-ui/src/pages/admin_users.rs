use leptos::prelude::*;
use leptos::task::spawn_local;

use hub_api_types::{AdminUser, Pagination};

use crate::api;
use crate::components::spinner::Spinner;

const PAGE_SIZE: u32 = 10;

/// Short date for the "last active" column.
pub fn format_last_active(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%b %e, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let (users, set_users) = signal(Vec::<AdminUser>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let fetch_page = move |page: u32| {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_admin_users(page, PAGE_SIZE).await {
                Ok(data) => {
                    set_users.set(data.users);
                    set_pagination.set(data.pagination);
                }
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_loading.set(false);
        });
    };

    fetch_page(1);

    let delete_user = move |id: String| {
        spawn_local(async move {
            match api::delete_admin_user(&id).await {
                Ok(()) => fetch_page(pagination.get_untracked().page),
                Err(e) => set_error_msg.set(Some(e.message)),
            }
        });
    };

    view! {
        <div class="admin-users-page">
            <h1>"Users"</h1>

            {move || error_msg.get().map(|msg| view! {
                <div class="admin-error">{msg}</div>
            })}

            {move || if loading.get() {
                view! { <Spinner size="lg" label="Loading users..."/> }.into_any()
            } else {
                view! {
                    <table class="admin-users-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Designs"</th>
                                <th>"Analyses"</th>
                                <th>"Last active"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {users.get().into_iter().map(|user| {
                                let id = user.id.clone();
                                view! {
                                    <tr>
                                        <td>{user.full_name}</td>
                                        <td>{user.email}</td>
                                        <td>{user.stats.total_designs}</td>
                                        <td>{user.stats.total_analyses}</td>
                                        <td>{format_last_active(&user.stats.last_active)}</td>
                                        <td>
                                            <button
                                                class="admin-delete-btn"
                                                on:click=move |_| delete_user(id.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any()
            }}

            <div class="admin-pager">
                <button
                    disabled=move || pagination.get().page <= 1 || loading.get()
                    on:click=move |_| fetch_page(pagination.get_untracked().page - 1)
                >
                    "Previous"
                </button>
                <span>
                    {move || {
                        let p = pagination.get();
                        format!("Page {} of {}", p.page, p.pages.max(1))
                    }}
                </span>
                <button
                    disabled=move || {
                        let p = pagination.get();
                        p.page >= p.pages || loading.get()
                    }
                    on:click=move |_| fetch_page(pagination.get_untracked().page + 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
