//! 画面（ルートごと）

pub mod editor;
pub mod home;
pub mod view;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// ルートの `:image_id`
fn route_image_id() -> String {
    use_params_map()
        .with_untracked(|params| params.get("image_id"))
        .unwrap_or_default()
}
