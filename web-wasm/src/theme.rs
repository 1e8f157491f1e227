//! ライト／ダークテーマ
//!
//! 設定は localStorage の `color-scheme` に保存し、`<html>` の `dark` クラスで切り替える

use gloo::events::EventListener;
use gloo::storage::{LocalStorage, Storage};
use leptos::prelude::*;
use mangalens_common::theme::{has_explicit_scheme, initial_scheme, persist_scheme};
use mangalens_common::{ColorScheme, PreferenceStore};
use wasm_bindgen::JsCast;
use web_sys::MediaQueryList;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// localStorage（使えない環境では何もしない）
pub struct BrowserPreferences;

impl PreferenceStore for BrowserPreferences {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn store(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            tracing::warn!(?e, "failed to persist preference");
        }
    }
}

fn dark_media_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

fn system_prefers_dark() -> bool {
    dark_media_query().is_some_and(|mql| mql.matches())
}

fn apply(scheme: ColorScheme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(e) = root.class_list().toggle_with_force("dark", scheme.is_dark()) {
        tracing::warn!(?e, "failed to apply color scheme");
    }
}

/// テーマの状態（アプリ全体で1つ）
#[derive(Clone, Copy)]
pub struct Theme {
    scheme: RwSignal<ColorScheme>,
}

impl Theme {
    pub fn scheme(&self) -> ColorScheme {
        self.scheme.get()
    }

    /// 唯一の変更口。保存と反映も行う
    pub fn set(&self, scheme: ColorScheme) {
        persist_scheme(&BrowserPreferences, scheme);
        apply(scheme);
        self.scheme.set(scheme);
    }

    pub fn toggle(&self) {
        self.set(self.scheme.get_untracked().toggled());
    }
}

/// 保存値またはOS設定で初期化してコンテキストに登録
pub fn provide_theme() -> Theme {
    let scheme = initial_scheme(&BrowserPreferences, system_prefers_dark());
    apply(scheme);
    let theme = Theme {
        scheme: RwSignal::new(scheme),
    };

    // 明示的に選ばれるまではOSの切り替えに追従
    if let Some(mql) = dark_media_query() {
        let listener = EventListener::new(&mql, "change", move |event| {
            if has_explicit_scheme(&BrowserPreferences) {
                return;
            }
            let Some(mql) = event.target().and_then(|t| t.dyn_into::<MediaQueryList>().ok()) else {
                return;
            };
            let scheme = if mql.matches() {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            };
            apply(scheme);
            theme.scheme.set(scheme);
        });
        listener.forget();
    }

    provide_context(theme);
    theme
}

pub fn use_theme() -> Theme {
    expect_context::<Theme>()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use mangalens_common::theme::THEME_STORAGE_KEY;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        BrowserPreferences.store(THEME_STORAGE_KEY, "dark");
        assert_eq!(BrowserPreferences.load(THEME_STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(initial_scheme(&BrowserPreferences, false), ColorScheme::Dark);

        BrowserPreferences.store(THEME_STORAGE_KEY, "light");
        assert_eq!(initial_scheme(&BrowserPreferences, true), ColorScheme::Light);
    }
}
