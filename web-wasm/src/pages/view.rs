//! 翻訳結果の表示画面

use super::route_image_id;
use crate::app::{use_handoff, use_transfer};
use crate::components::image_viewer::ImageViewer;
use crate::download::download_translated;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use mangalens_common::{
    fetch_or_placeholder, translated_filename, AppRoute, ImageHandle, ImageTransfer, ImageVariant,
    ReviewHandoff,
};

#[component]
pub fn ViewPage() -> impl IntoView {
    let transfer = use_transfer();
    let handoff_slot = use_handoff();
    let navigate = use_navigate();
    let image_id = route_image_id();

    let image = RwSignal::new(None::<ImageHandle>);
    let loading = RwSignal::new(true);
    let opening_editor = RwSignal::new(false);

    let translated_path = translated_filename(&image_id);

    {
        let transfer = transfer.clone();
        spawn_local(async move {
            let handle = fetch_or_placeholder(&transfer, ImageVariant::Translated, &translated_path).await;
            image.try_set(Some(handle));
            loading.try_set(false);
        });
    }

    let edit_id = image_id.clone();
    let on_edit = move |_: MouseEvent| {
        if opening_editor.get_untracked() {
            return;
        }
        let editor_path = AppRoute::editor(edit_id.clone()).path();

        // 編集は常に最新の処理結果から始める
        opening_editor.set(true);
        let transfer = transfer.clone();
        let navigate = navigate.clone();
        let image_id = edit_id.clone();
        spawn_local(async move {
            match transfer.process(&image_id).await {
                Ok(result) => handoff_slot.put(ReviewHandoff::to_editor(result)),
                Err(e) => {
                    tracing::error!(error = %e, %image_id, "failed to load translations for editing")
                }
            }
            if opening_editor.try_set(false).is_some() {
                return;
            }
            navigate(&editor_path, Default::default());
        });
    };

    let download_id = image_id.clone();
    let on_download = move |_: MouseEvent| {
        image.with_untracked(|handle| {
            if let Some(handle) = handle {
                download_translated(handle, &download_id);
            }
        });
    };

    let src = Signal::derive(move || image.with(|h| h.as_ref().map(|h| h.as_str().to_string())));

    view! {
        <section class="view">
            <div class="toolbar">
                <a href="/" class="btn btn-subtle">"← Back to Home"</a>
                <span class="text-muted">{format!("Image {}", image_id)}</span>
                <div class="toolbar-actions">
                    <button class="btn btn-secondary" disabled=move || loading.get() on:click=on_download>
                        "Download"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || opening_editor.get()
                        on:click=on_edit
                    >
                        {move || if opening_editor.get() { "Loading..." } else { "Edit Translations" }}
                    </button>
                </div>
            </div>

            <ImageViewer
                src=src
                alt=Signal::derive(|| ImageVariant::Translated.alt_text().to_string())
                loading=Signal::derive(move || loading.get())
            />
        </section>
    }
}
