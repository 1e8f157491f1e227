//! カラースキーム設定
//!
//! 保存済みの設定があればそれを使い、なければOSの設定に従う。
//! 保存先はブラウザの localStorage などを [`PreferenceStore`] で差し替える。

use std::fmt;

/// 保存キー
pub const THEME_STORAGE_KEY: &str = "color-scheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == ColorScheme::Dark
    }

    /// 保存値（不正な値は無視）→ OS設定 の順で決定
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        stored.and_then(ColorScheme::parse).unwrap_or(if system_prefers_dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        })
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文字列キーバリューの設定保存先
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
}

/// 起動時の配色
pub fn initial_scheme(store: &impl PreferenceStore, system_prefers_dark: bool) -> ColorScheme {
    ColorScheme::resolve(store.load(THEME_STORAGE_KEY).as_deref(), system_prefers_dark)
}

/// ユーザーが明示的に選んだか（選んでいなければOSの変更に追従する）
pub fn has_explicit_scheme(store: &impl PreferenceStore) -> bool {
    store
        .load(THEME_STORAGE_KEY)
        .as_deref()
        .and_then(ColorScheme::parse)
        .is_some()
}

/// 配色を保存
pub fn persist_scheme(store: &impl PreferenceStore, scheme: ColorScheme) {
    tracing::debug!(%scheme, "persisting color scheme");
    store.store(THEME_STORAGE_KEY, scheme.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl PreferenceStore for MemoryStore {
        fn load(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn store(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn test_stored_value_wins() {
        let store = MemoryStore::default();
        store.store(THEME_STORAGE_KEY, "light");
        assert_eq!(initial_scheme(&store, true), ColorScheme::Light);
        assert!(has_explicit_scheme(&store));
    }

    #[test]
    fn test_system_default_without_preference() {
        let store = MemoryStore::default();
        assert_eq!(initial_scheme(&store, true), ColorScheme::Dark);
        assert_eq!(initial_scheme(&store, false), ColorScheme::Light);
        assert!(!has_explicit_scheme(&store));
    }

    #[test]
    fn test_invalid_stored_value_ignored() {
        let store = MemoryStore::default();
        store.store(THEME_STORAGE_KEY, "sepia");
        assert_eq!(initial_scheme(&store, true), ColorScheme::Dark);
        assert!(!has_explicit_scheme(&store));
    }

    #[test]
    fn test_persist_then_reload() {
        let store = MemoryStore::default();
        persist_scheme(&store, ColorScheme::Light.toggled());
        assert_eq!(store.load(THEME_STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(initial_scheme(&store, false), ColorScheme::Dark);
    }
}
