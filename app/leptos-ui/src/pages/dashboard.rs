use leptos::prelude::*;

use crate::api::HttpDesignApi;
use crate::components::analysis_display::AnalysisDisplay;
use crate::components::design_result::DesignResult;
use crate::components::image_uploader::ImageUploader;
use crate::generation::{GenerationCoordinator, TabId};
use crate::stages::Feature;

/// The three-tab generation workspace. All generation state lives in the
/// coordinator, which is constructed here and torn down with the page.
/// Switching tabs changes only what is rendered; an in-flight submission
/// or poll on another tab keeps running untouched.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let coordinator = GenerationCoordinator::new(HttpDesignApi);
    let (active_tab, set_active_tab) = signal(TabId::Prompt);

    {
        // A leaked poll loop would keep hitting the backend after the user
        // navigates away.
        let coordinator = coordinator.clone();
        on_cleanup(move || coordinator.stop_all_polling());
    }

    let coord = coordinator.clone();
    let content = move || match active_tab.get() {
        TabId::Prompt => {
            let c = coord.clone();
            let input = c.input(TabId::Prompt);
            let loading = c.loading(TabId::Prompt);
            let on_generate = {
                let c = c.clone();
                move |_| {
                    let text = input.get_untracked();
                    c.submit_prompt(TabId::Prompt, &text);
                }
            };
            view! {
                <div class="tab-panel">
                    <div class="prompt-row">
                        <input
                            type="text"
                            placeholder="Describe your desired moodboard..."
                            prop:value=move || input.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                        />
                        <button
                            class="generate-btn"
                            disabled=move || loading.get()
                            on:click=on_generate
                        >
                            {move || if loading.get() { "Generating..." } else { "Generate" }}
                        </button>
                    </div>
                    <DesignResult
                        feature=Feature::Prompt
                        status=c.status(TabId::Prompt)
                        message=c.message(TabId::Prompt)
                        stage=c.stage(TabId::Prompt)
                        design=c.design(TabId::Prompt)
                        loading=c.loading(TabId::Prompt)
                    />
                </div>
            }
            .into_any()
        }
        TabId::Image => {
            let c = coord.clone();
            let on_select = {
                let c = c.clone();
                move |file: web_sys::File| c.submit_image(TabId::Image, file)
            };
            let on_clear = {
                let c = c.clone();
                move || c.clear(TabId::Image)
            };
            view! {
                <div class="tab-panel">
                    <ImageUploader
                        current=c.selected_file(TabId::Image)
                        loading=c.loading(TabId::Image)
                        on_select=on_select
                        on_clear=on_clear
                    />
                    <DesignResult
                        feature=Feature::Image
                        status=c.status(TabId::Image)
                        message=c.message(TabId::Image)
                        stage=c.stage(TabId::Image)
                        design=c.design(TabId::Image)
                        loading=c.loading(TabId::Image)
                    />
                </div>
            }
            .into_any()
        }
        TabId::Suggestions => {
            let c = coord.clone();
            let on_select = {
                let c = c.clone();
                move |file: web_sys::File| c.analyze(file)
            };
            let on_clear = {
                let c = c.clone();
                move || c.clear(TabId::Suggestions)
            };
            view! {
                <div class="tab-panel">
                    <ImageUploader
                        current=c.selected_file(TabId::Suggestions)
                        loading=c.loading(TabId::Suggestions)
                        on_select=on_select
                        on_clear=on_clear
                    />
                    <AnalysisDisplay
                        analysis=c.analysis()
                        stage=c.stage(TabId::Suggestions)
                    />
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="dashboard-page">
            <nav class="tab-nav">
                {TabId::ALL.iter().copied().map(|tab| view! {
                    <button
                        class=move || {
                            if active_tab.get() == tab {
                                "tab-btn tab-btn-active"
                            } else {
                                "tab-btn"
                            }
                        }
                        on:click=move |_| set_active_tab.set(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </nav>

            <h1 class="dashboard-title">
                {move || match active_tab.get() {
                    TabId::Prompt => "Create from Prompt",
                    TabId::Image => "Create from Image",
                    TabId::Suggestions => "Design Suggestions",
                }}
            </h1>

            {content}
        </div>
    }
}
