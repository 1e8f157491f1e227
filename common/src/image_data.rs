//! 表示用画像ハンドルとData URL処理
//!
//! バックエンドの画像APIは `{"data": "data:image/png;base64,..."}` を返す。
//! ブラウザではそのまま `<img src>` に使い、ネイティブではデコードして保存する。

use crate::api::PLACEHOLDER_IMAGE_URL;
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 表示可能な画像（Data URL またはプレースホルダURL）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// 「画像が見つかりません」画像
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_IMAGE_URL.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_IMAGE_URL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 画像のバイト列を取り出す（Data URLのみ）
    pub fn decode(&self) -> Result<DecodedImage> {
        decode_data_url(&self.0)
    }
}

/// デコード済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Base64のData URLをデコード
pub fn decode_data_url(data_url: &str) -> Result<DecodedImage> {
    let (header, data) = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| Error::InvalidDataUrl("not a data URL".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(Error::InvalidDataUrl("only base64 data URLs are supported".to_string()));
    }

    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| Error::InvalidDataUrl(e.to_string()))?;

    // MIMEが無ければバックエンドの既定（PNG）
    let mime_type = match header.trim_end_matches(";base64") {
        "" => "image/png",
        mime => mime,
    };

    Ok(DecodedImage {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// ダウンロード時のファイル名
pub fn download_file_name(image_id: &str) -> String {
    format!("translated_manga_{}.png", image_id)
}
