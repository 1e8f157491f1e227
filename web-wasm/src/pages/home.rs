//! アップロード画面

use crate::api::read_upload_file;
use crate::app::{use_handoff, use_transfer};
use crate::components::image_viewer::ImageViewer;
use crate::components::progress_bar::ProgressBar;
use crate::components::upload_area::UploadArea;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use mangalens_common::{upload_and_process, validate_upload, ImageTransfer, ValidationError, WorkflowState};
use web_sys::{File, Url};

/// 古いプレビューURLを解放して差し替える
fn replace_preview(preview_url: RwSignal<Option<String>>, next: Option<String>) {
    if let Some(old) = preview_url.try_get_untracked().flatten() {
        let _ = Url::revoke_object_url(&old);
    }
    preview_url.try_set(next);
}

#[component]
pub fn HomePage() -> impl IntoView {
    let transfer = use_transfer();
    let handoff_slot = use_handoff();
    let navigate = use_navigate();

    let selected = RwSignal::new_local(None::<File>);
    let file_name = RwSignal::new(None::<String>);
    let preview_url = RwSignal::new(None::<String>);
    let workflow = RwSignal::new(WorkflowState::Idle);
    let error = RwSignal::new(None::<String>);
    let backend_online = RwSignal::new(true);

    // バックエンドの死活確認（アップロードは妨げない）
    {
        let transfer = transfer.clone();
        spawn_local(async move {
            if let Err(e) = transfer.health().await {
                tracing::warn!(error = %e, "backend health check failed");
                backend_online.try_set(false);
            }
        });
    }

    on_cleanup(move || replace_preview(preview_url, None));

    let on_file_selected = move |file: File| {
        if let Err(e) = validate_upload(&file.type_(), file.size() as u64) {
            tracing::warn!(file = %file.name(), error = %e, "rejected file");
            error.set(Some(e.to_string()));
            selected.set(None);
            file_name.set(None);
            replace_preview(preview_url, None);
            return;
        }

        replace_preview(preview_url, Url::create_object_url_with_blob(&file).ok());
        file_name.set(Some(file.name()));
        selected.set(Some(file));
        error.set(None);
        if matches!(workflow.get_untracked(), WorkflowState::Failed { .. }) {
            workflow.set(WorkflowState::Idle);
        }
    };

    let on_translate = move |_: MouseEvent| {
        if workflow.with_untracked(|s| s.is_busy()) {
            return;
        }
        let Some(file) = selected.get_untracked() else {
            error.set(Some(ValidationError::NoFileSelected.to_string()));
            return;
        };
        error.set(None);

        let transfer = transfer.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let upload = match read_upload_file(&file).await {
                Ok(upload) => upload,
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                    return;
                }
            };

            let result = upload_and_process(&transfer, &upload, |state| {
                workflow.try_set(state.clone());
            })
            .await;

            match result {
                Ok(handoff) => {
                    // 画面を離れていたら遷移しない
                    if error.try_set(None).is_some() {
                        return;
                    }
                    let path = handoff.route.path();
                    handoff_slot.put(handoff);
                    navigate(&path, Default::default());
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let is_busy = move || workflow.with(|s| s.is_busy());

    view! {
        <section class="home">
            <h2>"Translate a manga page"</h2>

            <Show when=move || !backend_online.get()>
                <div class="notice warning">
                    "The translation backend is offline. Uploads will fail until it is reachable."
                </div>
            </Show>

            <UploadArea
                disabled=Signal::derive(is_busy)
                file_name=file_name
                on_file_selected=on_file_selected
            />

            {move || error.get().map(|message| view! { <div class="notice error">{message}</div> })}

            <Show when=move || preview_url.with(|url| url.is_some())>
                <ImageViewer
                    src=preview_url
                    alt=Signal::derive(|| "Selected page preview".to_string())
                />
            </Show>

            <Show when=is_busy>
                <ProgressBar state=workflow />
            </Show>

            <button
                class="btn btn-primary"
                disabled=move || selected.with(|f| f.is_none()) || is_busy()
                on:click=on_translate
            >
                {move || workflow.with(|s| s.action_label())}
            </button>
        </section>
    }
}
