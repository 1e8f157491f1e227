//! 翻訳画像のダウンロード

use mangalens_common::{download_file_name, ImageHandle};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// `<a download>` を一時的に作ってクリックする
pub fn download_translated(handle: &ImageHandle, image_id: &str) {
    if handle.is_placeholder() {
        tracing::warn!(image_id, "translated image is not available; nothing to download");
        return;
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Some(link) = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
    else {
        return;
    };

    link.set_href(handle.as_str());
    link.set_download(&download_file_name(image_id));
    if body.append_child(&link).is_ok() {
        link.click();
        let _ = body.remove_child(&link);
    }
}
