//! アップロードエリアコンポーネント

use leptos::html;
use leptos::prelude::*;
use mangalens_common::upload::ACCEPT_ATTRIBUTE;
use web_sys::{DragEvent, File};

#[component]
pub fn UploadArea<F>(
    /// 通信中は選択させない
    #[prop(into)]
    disabled: Signal<bool>,
    /// 選択中のファイル名
    #[prop(into)]
    file_name: Signal<Option<String>>,
    on_file_selected: F,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_drop = {
        let on_file_selected = on_file_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get_untracked() {
                return;
            }

            // 先頭の1枚だけ使う
            if let Some(file) = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0))
            {
                on_file_selected(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_selected(file);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept=ACCEPT_ATTRIBUTE
                class="hidden"
                node_ref=input_ref
                on:change=on_change
            />
            <div class="upload-icon">"📖"</div>
            {move || match file_name.get() {
                Some(name) => view! { <p class="file-name">{name}</p> }.into_any(),
                None => view! { <p>"Drag & drop a manga page here, or click to choose"</p> }.into_any(),
            }}
            <p class="text-muted">"PNG or JPEG, up to 5 MB"</p>
        </div>
    }
}
