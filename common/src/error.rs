//! エラー型定義
//!
//! - ValidationError: 通信前に弾くファイル（種類・サイズ）
//! - TransferError: upload/process/submit の通信失敗・非2xx応答
//! - VariantFetchError: 画像バリアント1件の取得失敗（プレースホルダで吸収する）

use crate::types::ImageVariant;
use thiserror::Error;

/// アップロード前の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Unsupported file type: {mime} (PNG or JPEG only)")]
    UnsupportedType { mime: String },

    #[error("File is too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("File is empty")]
    Empty,
}

/// バックエンド通信エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl TransferError {
    /// 非2xx応答をエラーに変換
    ///
    /// バックエンドは `{"error": "..."}` を返すので、あればそのメッセージを使う
    pub fn from_status(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
        }

        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => "request failed".to_string(),
        };
        TransferError::Status { status, message }
    }
}

/// 画像バリアント取得エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {variant} image '{filename}': {reason}")]
pub struct VariantFetchError {
    pub variant: ImageVariant,
    pub filename: String,
    pub reason: String,
}

impl VariantFetchError {
    pub fn new(variant: ImageVariant, filename: &str, reason: impl ToString) -> Self {
        Self {
            variant,
            filename: filename.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Translation {0} not found")]
    UnknownTranslation(u32),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Invalid workflow transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_backend_message() {
        let error = TransferError::from_status(404, r#"{"error": "Image not found"}"#);
        assert_eq!(
            error,
            TransferError::Status { status: 404, message: "Image not found".to_string() }
        );
    }

    #[test]
    fn test_from_status_plain_body() {
        let error = TransferError::from_status(502, "Bad Gateway\n");
        assert_eq!(error.to_string(), "Server returned 502: Bad Gateway");
    }

    #[test]
    fn test_from_status_empty_body() {
        let error = TransferError::from_status(500, "");
        assert_eq!(error.to_string(), "Server returned 500: request failed");
    }

    #[test]
    fn test_validation_display() {
        let error = ValidationError::TooLarge { size: 10, max: 5 };
        assert_eq!(error.to_string(), "File is too large: 10 bytes (max 5 bytes)");
    }

    #[test]
    fn test_error_from_transfer() {
        let error: Error = TransferError::Network("offline".to_string()).into();
        assert!(matches!(error, Error::Transfer(_)));
        assert_eq!(error.to_string(), "Network error: offline");
    }

    #[test]
    fn test_variant_fetch_display() {
        let error = VariantFetchError::new(ImageVariant::TextOnly, "a_text.png", "404");
        assert_eq!(error.to_string(), "Failed to fetch text_only image 'a_text.png': 404");
    }
}
