use leptos::prelude::*;

use crate::{use_router, Route};

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="home-page">
            <section class="home-hero">
                <h1>"Turn ideas into moodboards"</h1>
                <p>
                    "Describe a vibe, drop in a reference image, or get AI feedback "
                    "on an existing design."
                </p>
                <button
                    class="home-cta"
                    on:click=move |_| router.navigate(Route::Dashboard)
                >
                    "Get started"
                </button>
            </section>

            <section class="home-features">
                <div class="feature-card">
                    <h3>"Prompt to Moodboard"</h3>
                    <p>"Generate a full design direction from a text prompt."</p>
                </div>
                <div class="feature-card">
                    <h3>"Image to Moodboard"</h3>
                    <p>"Extract colors and typography from any reference image."</p>
                </div>
                <div class="feature-card">
                    <h3>"Design Suggestions"</h3>
                    <p>"Upload a design and get categorized improvement feedback."</p>
                </div>
            </section>
        </div>
    }
}
