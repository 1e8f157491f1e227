//! 画面ルート
//!
//! - `/`                 アップロード画面
//! - `/editor/{imageId}` 翻訳エディタ
//! - `/view/{imageId}`   閲覧専用画面

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Editor { image_id: String },
    View { image_id: String },
}

impl AppRoute {
    pub fn editor(image_id: impl Into<String>) -> Self {
        AppRoute::Editor { image_id: image_id.into() }
    }

    pub fn view(image_id: impl Into<String>) -> Self {
        AppRoute::View { image_id: image_id.into() }
    }

    /// アプリ内パスを解釈（クエリ・フラグメントは無視）
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(|c| c == '?' || c == '#').next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(AppRoute::Home);
        }

        let mut segments = path.strip_prefix('/')?.split('/');
        let kind = segments.next()?;
        let image_id = segments.next().filter(|id| !id.is_empty())?;
        if segments.next().is_some() {
            return None;
        }

        match kind {
            "editor" => Some(AppRoute::editor(image_id)),
            "view" => Some(AppRoute::view(image_id)),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            AppRoute::Home => "/".to_string(),
            AppRoute::Editor { image_id } => format!("/editor/{}", image_id),
            AppRoute::View { image_id } => format!("/view/{}", image_id),
        }
    }

    pub fn image_id(&self) -> Option<&str> {
        match self {
            AppRoute::Home => None,
            AppRoute::Editor { image_id } | AppRoute::View { image_id } => Some(image_id),
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
