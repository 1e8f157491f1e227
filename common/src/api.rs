//! バックエンドREST APIのエンドポイント
//!
//! | 呼び出し | メソッド・パス |
//! |---|---|
//! | health | GET /health |
//! | upload | POST /upload (multipart `image`) |
//! | process | POST /process/{imageId} |
//! | 画像取得 | GET /images/{variant}/{filename} |
//! | 翻訳更新 | PATCH /translations/{imageId} |

use crate::types::ImageVariant;

/// バックエンドの既定URL（`/api` を含む）
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// 画像取得に失敗したときに表示する画像
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=Image+Not+Found";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: String,
}

impl ApiEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }

    pub fn upload(&self) -> String {
        format!("{}/upload", self.base)
    }

    pub fn process(&self, image_id: &str) -> String {
        format!("{}/process/{}", self.base, image_id)
    }

    pub fn image(&self, variant: ImageVariant, filename: &str) -> String {
        format!("{}/images/{}/{}", self.base, variant.as_path_segment(), filename)
    }

    pub fn translations(&self, image_id: &str) -> String {
        format!("{}/translations/{}", self.base, image_id)
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
