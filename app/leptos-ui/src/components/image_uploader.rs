use leptos::html;
use leptos::prelude::*;
use web_sys::DragEvent;

use crate::generation::SelectedFile;

/// Human-readable file size for the selected-file chip.
pub fn format_bytes(size: f64) -> String {
    if size >= 1024.0 * 1024.0 {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    } else if size >= 1024.0 {
        format!("{:.0} KB", size / 1024.0)
    } else {
        format!("{:.0} B", size)
    }
}

/// Drag-and-drop / click-to-pick image input. Hands the picked
/// `web_sys::File` to `on_select` untouched; validation and upload are the
/// caller's business.
#[component]
pub fn ImageUploader<F, G>(
    current: RwSignal<Option<SelectedFile>>,
    loading: RwSignal<bool>,
    on_select: F,
    on_clear: G,
) -> impl IntoView
where
    F: Fn(web_sys::File) + Clone + 'static,
    G: Fn() + Clone + 'static + Send,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let on_drop = {
        let on_select = on_select.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);
            if loading.get_untracked() {
                return;
            }
            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_select(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !loading.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_zone_click = move |_| {
        if loading.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_input_change = {
        let on_select = on_select.clone();
        move |_| {
            let Some(input) = input_ref.get_untracked() else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_select(file);
            }
            // Reset so picking the same file again still fires a change event.
            input.set_value("");
        }
    };

    view! {
        <div class="image-uploader">
            <input
                type="file"
                accept="image/*"
                class="image-uploader-input"
                style="display: none"
                node_ref=input_ref
                on:change=on_input_change
            />
            <div
                class=move || {
                    let mut classes = vec!["upload-zone"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if loading.get() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_zone_click
            >
                {move || match current.get() {
                    Some(file) => view! {
                        <div class="upload-selected">
                            <span class="upload-file-name">{file.name.clone()}</span>
                            <span class="upload-file-size">{format_bytes(file.size)}</span>
                        </div>
                    }.into_any(),
                    None => view! {
                        <div class="upload-prompt">
                            <p>"Drag and drop an image, or click to browse"</p>
                            <p class="upload-hint">"PNG or JPEG, up to 5MB"</p>
                        </div>
                    }.into_any(),
                }}
            </div>
            {move || (current.get().is_some() && !loading.get()).then(|| {
                let on_clear = on_clear.clone();
                view! {
                    <button class="upload-clear-btn" on:click=move |_| on_clear()>
                        "Clear"
                    </button>
                }
            })}
        </div>
    }
}
