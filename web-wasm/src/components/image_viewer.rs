//! ズーム・全画面対応の画像ビューア

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use mangalens_common::zoom::{centered_scroll, ZOOM_MAX, ZOOM_MIN, ZOOM_QUANTUM};
use mangalens_common::{FullscreenRequest, ZoomController};

/// ズーム変更後、新しいサイズが反映されてから中央へスクロールするまでの待ち時間
const RECENTER_DELAY_MS: u32 = 50;

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// この要素が今まさに全画面表示されているか
fn is_presented(element: &web_sys::Element) -> bool {
    document()
        .and_then(|d| d.fullscreen_element())
        .is_some_and(|current| &current == element)
}

/// スクロール領域を中央へ寄せる
///
/// ビューアが破棄済みなら何もしない
fn recenter(scroll_ref: NodeRef<html::Div>) {
    let Some(container) = scroll_ref.try_get_untracked().flatten() else {
        return;
    };
    let offset = centered_scroll(
        f64::from(container.scroll_width()),
        f64::from(container.scroll_height()),
        f64::from(container.client_width()),
        f64::from(container.client_height()),
    );
    container.set_scroll_left(offset.left as i32);
    container.set_scroll_top(offset.top as i32);
}

#[component]
pub fn ImageViewer(
    /// 表示する画像（Data URL / プレースホルダURL / object URL）
    #[prop(into)]
    src: Signal<Option<String>>,
    #[prop(into)] alt: Signal<String>,
    #[prop(optional, into)] loading: MaybeProp<bool>,
) -> impl IntoView {
    let zoom = RwSignal::new(ZoomController::new());
    let viewer_ref = NodeRef::<html::Div>::new();
    let scroll_ref = NodeRef::<html::Div>::new();

    // ズームが100以外に変わったら中央へスクロール
    Effect::new(move |previous: Option<u32>| {
        let level = zoom.with(|z| z.level());
        let needs_recenter = zoom.with(|z| z.needs_recenter());
        if previous.is_some_and(|p| p != level) && needs_recenter {
            Timeout::new(RECENTER_DELAY_MS, move || recenter(scroll_ref)).forget();
        }
        level
    });

    // Esc やブラウザ操作で全画面が解除されたら追従する
    let fullscreen_listener = document().map(|doc| {
        EventListener::new(&doc, "fullscreenchange", move |_| {
            let presented = viewer_ref
                .try_get_untracked()
                .flatten()
                .is_some_and(|el| is_presented(&el));
            zoom.try_update(|z| z.sync_fullscreen(presented));
        })
    });
    // 画面破棄時にリスナーも外れる
    StoredValue::new_local(fullscreen_listener);

    let toggle_fullscreen = move |_: leptos::ev::MouseEvent| {
        let Some(viewer) = viewer_ref.get_untracked() else {
            return;
        };
        let presented = is_presented(&viewer);
        let request = zoom.try_update(|z| z.toggle_fullscreen(presented));
        match request {
            Some(FullscreenRequest::Enter) => {
                if let Err(e) = viewer.request_fullscreen() {
                    tracing::error!(?e, "failed to enter fullscreen");
                    zoom.update(|z| z.sync_fullscreen(false));
                }
            }
            Some(FullscreenRequest::Exit) => {
                if let Some(doc) = document() {
                    doc.exit_fullscreen();
                }
            }
            None => {}
        }
    };

    let on_slider = move |ev: leptos::ev::Event| {
        if let Ok(value) = event_target_value(&ev).parse::<f64>() {
            zoom.update(|z| {
                z.set_level(value);
            });
        }
    };

    view! {
        <div
            class="image-viewer"
            class:fullscreen=move || zoom.with(|z| z.is_fullscreen())
            node_ref=viewer_ref
        >
            <div class="zoom-toolbar">
                <button
                    class="btn btn-icon"
                    title="Zoom out"
                    disabled=move || !zoom.with(|z| z.can_zoom_out())
                    on:click=move |_| {
                        zoom.update(|z| {
                            z.zoom_out();
                        })
                    }
                >
                    "−"
                </button>
                <input
                    type="range"
                    class="zoom-slider"
                    min=ZOOM_MIN.to_string()
                    max=ZOOM_MAX.to_string()
                    step=ZOOM_QUANTUM.to_string()
                    prop:value=move || zoom.with(|z| z.level()).to_string()
                    on:input=on_slider
                />
                <button
                    class="btn btn-icon"
                    title="Zoom in"
                    disabled=move || !zoom.with(|z| z.can_zoom_in())
                    on:click=move |_| {
                        zoom.update(|z| {
                            z.zoom_in();
                        })
                    }
                >
                    "+"
                </button>
                <span class="zoom-level">{move || format!("{}%", zoom.with(|z| z.level()))}</span>
                <button
                    class="btn btn-icon"
                    title="Reset zoom"
                    disabled=move || zoom.with(|z| z.is_default())
                    on:click=move |_| zoom.update(|z| z.reset())
                >
                    "1:1"
                </button>
                <button class="btn btn-icon" title="Fullscreen" on:click=toggle_fullscreen>
                    {move || if zoom.with(|z| z.is_fullscreen()) { "Exit fullscreen" } else { "Fullscreen" }}
                </button>
            </div>

            <div class="image-scroll" node_ref=scroll_ref>
                <div
                    class="image-canvas"
                    style=move || zoom.with(|z| z.layout().container_style())
                >
                    <Show
                        when=move || !loading.get().unwrap_or(false)
                        fallback=|| view! { <div class="spinner" aria-label="Loading"></div> }
                    >
                        {move || {
                            src.get()
                                .map(|src| {
                                    view! {
                                        <img
                                            src=src
                                            alt=move || alt.get()
                                            style=move || zoom.with(|z| z.layout().image_style())
                                        />
                                    }
                                })
                        }}
                    </Show>
                </div>
            </div>
        </div>
    }
}
