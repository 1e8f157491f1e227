//! 翻訳一覧（編集フォーム）

use leptos::prelude::*;
use mangalens_common::TranslationEditSession;

#[component]
pub fn TranslationList(session: RwSignal<TranslationEditSession>) -> impl IntoView {
    let ids = move || session.with(|s| s.entries().iter().map(|e| e.id).collect::<Vec<_>>());

    view! {
        <div class="translation-list">
            <Show
                when=move || session.with(|s| !s.is_empty())
                fallback=|| view! { <p class="text-muted">"No text was detected in this image"</p> }
            >
                <For each=ids key=|id| *id let:id>
                    <TranslationRow session=session id=id />
                </For>
            </Show>
        </div>
    }
}

#[component]
fn TranslationRow(session: RwSignal<TranslationEditSession>, id: u32) -> impl IntoView {
    let original = move || {
        session.with(|s| {
            s.entry(id)
                .map(|e| e.original_text.clone())
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| "(No text detected)".to_string())
        })
    };
    let translated = move || {
        session.with(|s| s.entry(id).map(|e| e.translated_text.clone()).unwrap_or_default())
    };

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        session.update(|s| {
            if let Err(e) = s.edit_text(id, text) {
                tracing::warn!(error = %e, "ignored edit");
            }
        });
    };

    view! {
        <div class="translation-row">
            <div class="translation-header">
                <span class="badge">{format!("#{}", id)}</span>
                <p class="original-text">{original}</p>
            </div>
            <textarea
                class="translated-text"
                rows="2"
                prop:value=translated
                on:input=on_input
            />
        </div>
    }
}
