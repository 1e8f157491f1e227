//! ヘッダーコンポーネント

use crate::theme::use_theme;
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let theme = use_theme();

    view! {
        <header class="header">
            <a href="/" class="brand">
                <h1>"MangaLens"</h1>
            </a>
            <button
                class="btn btn-icon theme-toggle"
                title="Toggle color scheme"
                on:click=move |_| theme.toggle()
            >
                {move || if theme.scheme().is_dark() { "☀️" } else { "🌙" }}
            </button>
        </header>
    }
}
