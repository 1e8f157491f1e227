//! MangaLens Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod download;
mod logging;
mod pages;
mod theme;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    tracing::info!(api = %config::client_config().api_base, "starting MangaLens");
    leptos::mount::mount_to_body(app::App);
}
