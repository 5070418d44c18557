use leptos::prelude::*;

use hub_api_types::DesignResponse;

use crate::components::spinner::Spinner;
use crate::generation::{GenStatus, LoadingStage};
use crate::stages::{self, Feature};

/// Progress panel + final design render for the prompt and image tabs.
/// Everything shown here is derived from coordinator signals; the component
/// itself holds no state.
#[component]
pub fn DesignResult(
    feature: Feature,
    status: RwSignal<GenStatus>,
    message: RwSignal<String>,
    stage: RwSignal<LoadingStage>,
    design: RwSignal<Option<DesignResponse>>,
    loading: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="design-result">
            {move || loading.get().then(|| {
                let stage_str = stage.get().as_str();
                let handoff = stages::is_handoff_stage(stage_str);
                view! {
                    <div class="progress-panel">
                        {(!handoff).then(|| view! { <Spinner size="lg"/> })}
                        <p class=move || {
                            if handoff { "progress-message progress-handoff" } else { "progress-message" }
                        }>
                            {stages::stage_message(feature, stage_str)}
                        </p>
                        {(!handoff).then(|| view! {
                            <p class="progress-hint">"This may take a few moments..."</p>
                        })}
                    </div>
                }
            })}

            {move || match status.get() {
                GenStatus::Complete => {
                    let img = design.get().and_then(|d| d.design_image);
                    view! {
                        <div class="design-complete">
                            <p class="design-message">{message.get()}</p>
                            {img.map(|data| view! {
                                <img
                                    class="design-image"
                                    src=format!("data:image/png;base64,{data}")
                                    alt="Generated design"
                                />
                            })}
                            {design.get().and_then(|d| d.design_tokens).map(|tokens| view! {
                                <div class="design-tokens">
                                    <div class="token-swatches">
                                        {tokens.colors.iter().map(|c| view! {
                                            <span
                                                class="token-swatch"
                                                style=format!("background-color: {c}")
                                                title=c.clone()
                                            ></span>
                                        }).collect_view()}
                                    </div>
                                    <p class="token-typography">
                                        {tokens.typography.font_family.clone()}
                                    </p>
                                </div>
                            })}
                        </div>
                    }.into_any()
                }
                GenStatus::Error => view! {
                    <div class="design-error">{message.get()}</div>
                }.into_any(),
                _ => {
                    // Pending states are covered by the progress panel above;
                    // not-started shows the inline message, if any (e.g. a
                    // rejected file pick).
                    let msg = message.get();
                    (!msg.is_empty() && !loading.get())
                        .then(|| view! { <p class="design-note">{msg}</p> })
                        .into_any()
                }
            }}
        </div>
    }
}
