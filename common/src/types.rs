//! バックエンドとやり取りするデータ型
//!
//! - ProcessedResult: `/process` の応答（画像バリアントのパスと翻訳一覧）
//! - TranslationEntry: 検出されたテキスト1件
//! - TranslationUpdate: `/translations` へ送る編集内容

use serde::{Deserialize, Serialize};
use std::fmt;

/// テキスト領域（元画像のピクセル座標）
///
/// JSON上は `[x, y, w, h]` の配列
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self { x, y, width, height }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// 翻訳エントリ
///
/// クライアントが変更できるのは `translated_text` のみ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub id: u32,

    #[serde(default)]
    pub original_text: String,

    #[serde(default)]
    pub translated_text: String,

    #[serde(rename = "bbox", default)]
    pub bounding_box: BoundingBox,
}

/// 画像バリアント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    Original,
    Inpainted,
    TextOnly,
    Boxed,
    Translated,
}

impl ImageVariant {
    /// レビュー画面で必ず表示する4種類（タブ順）
    pub const REVIEW: [ImageVariant; 4] = [
        ImageVariant::Translated,
        ImageVariant::Original,
        ImageVariant::Inpainted,
        ImageVariant::TextOnly,
    ];

    /// エディタのタブ（REVIEW + 検出枠）
    pub const EDITOR_TABS: [ImageVariant; 5] = [
        ImageVariant::Translated,
        ImageVariant::Original,
        ImageVariant::Inpainted,
        ImageVariant::TextOnly,
        ImageVariant::Boxed,
    ];

    /// `/images/{variant}/{filename}` の variant 部分
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            ImageVariant::Original => "uploads",
            ImageVariant::Inpainted => "inpainted",
            ImageVariant::TextOnly => "text_only",
            ImageVariant::Boxed => "boxed",
            ImageVariant::Translated => "translated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageVariant::Original => "Original",
            ImageVariant::Inpainted => "Inpainted",
            ImageVariant::TextOnly => "Text Only",
            ImageVariant::Boxed => "Detected Boxes",
            ImageVariant::Translated => "Translated",
        }
    }

    pub fn alt_text(&self) -> &'static str {
        match self {
            ImageVariant::Original => "Original manga",
            ImageVariant::Inpainted => "Inpainted manga",
            ImageVariant::TextOnly => "Text only",
            ImageVariant::Boxed => "Detected text regions",
            ImageVariant::Translated => "Translated manga",
        }
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

/// 翻訳済み画像のファイル名（バックエンドの命名規則）
pub fn translated_filename(image_id: &str) -> String {
    format!("{}_translated.png", image_id)
}

/// パスの最後のセグメント（"/api/images/uploads/abc.png" -> "abc.png"）
pub fn filename_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// `/process` の応答
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessedResult {
    /// バックエンドは省略することがあるので、要求したIDで補完する
    pub image_id: String,
    pub original_image: String,
    pub inpainted_image: String,
    pub text_only_image: String,
    pub boxed_image: String,
    pub translated_image: String,
    pub translations: Vec<TranslationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl ProcessedResult {
    /// バリアントのサーバー相対パス
    pub fn variant_path(&self, variant: ImageVariant) -> &str {
        match variant {
            ImageVariant::Original => &self.original_image,
            ImageVariant::Inpainted => &self.inpainted_image,
            ImageVariant::TextOnly => &self.text_only_image,
            ImageVariant::Boxed => &self.boxed_image,
            ImageVariant::Translated => &self.translated_image,
        }
    }

    /// 要求したIDで `image_id` を確定させる
    pub fn ensure_image_id(&mut self, requested: &str) {
        if self.image_id != requested {
            if !self.image_id.is_empty() {
                tracing::warn!(
                    returned = %self.image_id,
                    requested,
                    "backend returned a different image id; keeping the requested one"
                );
            }
            self.image_id = requested.to_string();
        }
    }

    /// 再レンダリング後の翻訳画像パスを差し替え
    pub fn replace_translated_image(&mut self, path: impl Into<String>) {
        self.translated_image = path.into();
    }
}

/// `/upload` の応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// 翻訳編集1件（PATCHのリクエスト要素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUpdate {
    pub id: u32,
    pub translated_text: String,
}

/// PATCH `/translations/{id}` のリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTranslationsRequest {
    pub translations: Vec<TranslationUpdate>,
}

/// PATCH `/translations/{id}` の応答
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTranslationsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub translated_image: String,
}

/// GET `/images/...` の応答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub data: String,
}

/// GET `/health` の応答
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
}
