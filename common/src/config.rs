//! クライアント設定
//!
//! 設定ファイルは持たない。バックエンドURLのみ上書き可能
//! （Web: ビルド時の `MANGALENS_API_URL`、ネイティブ: 実行時の同名環境変数）

use crate::api::{ApiEndpoints, DEFAULT_API_BASE};

/// バックエンドURLを上書きする環境変数
pub const API_URL_ENV: &str = "MANGALENS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// 上書き値があればそれを、空なら既定値を使う
    pub fn from_override(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self::default(),
        }
    }

    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::new(self.api_base.clone())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
