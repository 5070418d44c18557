use leptos::prelude::*;
use leptos::task::spawn_local;

use hub_api_types::{HistoryItem, Pagination};

use crate::api;
use crate::components::spinner::Spinner;

const PAGE_SIZE: u32 = 6;

/// "August 7, 2026 • 14:32" out of an RFC 3339 timestamp; unparseable input
/// is shown as-is rather than hidden.
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%B %e, %Y • %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn has_prev(p: &Pagination) -> bool {
    p.page > 1
}

pub fn has_next(p: &Pagination) -> bool {
    p.page < p.pages
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let (items, set_items) = signal(Vec::<HistoryItem>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let fetch_page = move |page: u32| {
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api::fetch_history(page, PAGE_SIZE).await {
                Ok(data) => {
                    set_items.set(data.history);
                    set_pagination.set(data.pagination);
                }
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_loading.set(false);
        });
    };

    // Initial fetch on mount
    fetch_page(1);

    view! {
        <div class="history-page">
            <h1>"Design History"</h1>

            {move || error_msg.get().map(|msg| view! {
                <div class="history-error">{msg}</div>
            })}

            {move || if loading.get() {
                view! { <Spinner size="lg" label="Loading history..."/> }.into_any()
            } else if items.get().is_empty() {
                view! { <p class="history-empty">"No prompt history available"</p> }.into_any()
            } else {
                view! {
                    <div class="history-grid">
                        {items.get().into_iter().map(|item| view! {
                            <div class="history-card">
                                <div class="history-card-image">
                                    {match item.design_image {
                                        Some(data) => view! {
                                            <img
                                                src=format!("data:image/png;base64,{data}")
                                                alt="Generated design"
                                            />
                                        }.into_any(),
                                        None => view! {
                                            <span class="history-no-image">"No image available"</span>
                                        }.into_any(),
                                    }}
                                </div>
                                <div class="history-card-body">
                                    <p class="history-date">{format_timestamp(&item.created_at)}</p>
                                    <p class="history-prompt">{item.prompt}</p>
                                </div>
                            </div>
                        }).collect_view()}
                    </div>
                }.into_any()
            }}

            <div class="history-pager">
                <button
                    disabled=move || !pagination.with(has_prev) || loading.get()
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
                    disabled=move || !pagination.with(has_next) || loading.get()
                    on:click=move |_| fetch_page(pagination.get_untracked().page + 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
