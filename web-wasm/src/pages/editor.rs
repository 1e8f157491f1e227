//! 翻訳編集画面

use super::route_image_id;
use crate::app::{use_handoff, use_transfer};
use crate::components::image_viewer::ImageViewer;
use crate::components::translation_list::TranslationList;
use crate::download::download_translated;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use mangalens_common::{
    fetch_variants, submit_save, ImageVariant, ProcessedResult, TranslationEditSession,
    VariantImages,
};

#[component]
pub fn EditorPage() -> impl IntoView {
    let image_id = route_image_id();

    match use_handoff().get_for(&image_id) {
        Some(handoff) => view! { <EditorScreen result=handoff.result /> }.into_any(),
        None => {
            tracing::warn!(%image_id, "no processed result for this image; returning home");
            view! { <Redirect path="/" /> }.into_any()
        }
    }
}

#[component]
fn EditorScreen(result: ProcessedResult) -> impl IntoView {
    let transfer = use_transfer();
    let handoff_slot = use_handoff();
    let image_id = result.image_id.clone();

    let session = RwSignal::new(TranslationEditSession::new(&result));
    let images = RwSignal::new(VariantImages::default());
    let loading = RwSignal::new(true);
    let active = RwSignal::new(ImageVariant::Translated);
    let error = RwSignal::new(None::<String>);

    {
        let transfer = transfer.clone();
        spawn_local(async move {
            let fetched = fetch_variants(&transfer, &result, &ImageVariant::EDITOR_TABS).await;
            images.try_set(fetched);
            loading.try_set(false);
        });
    }

    let on_save = move |_: MouseEvent| {
        let request = match session.try_update(|s| s.begin_save()) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "save ignored");
                return;
            }
            None => return,
        };
        error.set(None);

        let transfer = transfer.clone();
        spawn_local(async move {
            match submit_save(&transfer, &request).await {
                Ok(outcome) => {
                    if session.try_update(|s| s.complete_save(&request, &outcome)).is_none() {
                        return;
                    }
                    handoff_slot.record_save(&request, &outcome);
                    images.try_update(|i| i.insert(ImageVariant::Translated, outcome.handle));
                    active.try_set(ImageVariant::Translated);
                }
                Err(e) => {
                    session.try_update(|s| s.abort_save());
                    error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let download_id = image_id.clone();
    let on_download = move |_: MouseEvent| {
        images.with_untracked(|i| match i.get(ImageVariant::Translated) {
            Some(handle) => download_translated(handle, &download_id),
            None => tracing::warn!(image_id = %download_id, "translated image not loaded yet"),
        });
    };

    let save_label = move || {
        session.with(|s| {
            if s.is_saving() {
                "Saving..."
            } else if s.is_modified() {
                "Save & Re-render *"
            } else {
                "Save & Re-render"
            }
        })
    };

    let current_src =
        move || images.with(|i| i.get(active.get()).map(|h| h.as_str().to_string()));

    view! {
        <section class="editor">
            <div class="toolbar">
                <a href="/" class="btn btn-subtle">"← Back to Home"</a>
                <span class="text-muted">{format!("Image {}", image_id)}</span>
                <div class="toolbar-actions">
                    <button class="btn btn-secondary" disabled=move || loading.get() on:click=on_download>
                        "Download"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || session.with(|s| s.is_saving())
                        on:click=on_save
                    >
                        {save_label}
                    </button>
                </div>
            </div>

            {move || error.get().map(|message| view! { <div class="notice error">{message}</div> })}

            <div class="editor-layout">
                <div class="editor-image">
                    <div class="tabs">
                        {ImageVariant::EDITOR_TABS
                            .into_iter()
                            .map(|variant| {
                                view! {
                                    <button
                                        class="tab"
                                        class:active=move || active.get() == variant
                                        on:click=move |_| active.set(variant)
                                    >
                                        {variant.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    <ImageViewer
                        src=Signal::derive(current_src)
                        alt=Signal::derive(move || active.get().alt_text().to_string())
                        loading=Signal::derive(move || loading.get())
                    />
                </div>

                <aside class="editor-translations">
                    <h3>"Translations"</h3>
                    <TranslationList session=session />
                </aside>
            </div>
        </section>
    }
}
