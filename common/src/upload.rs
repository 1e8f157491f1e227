//! アップロードファイルの検証
//!
//! 対応形式・サイズ上限を満たさないファイルは通信前に弾く

use crate::error::ValidationError;

/// アップロード上限（5 MiB）
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// 受け付けるMIMEタイプ
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// `<input accept=...>` 用
pub const ACCEPT_ATTRIBUTE: &str = "image/png,image/jpeg";

/// アップロード対象のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_upload(&self.mime_type, self.size())
    }
}

/// "image/jpeg; charset=..." のようなパラメータを除いて小文字化
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// MIMEタイプとサイズを検証
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::Empty);
    }

    let mime = essence(mime_type);
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime: if mime.is_empty() { "unknown".to_string() } else { mime },
        });
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size, max: MAX_UPLOAD_BYTES });
    }

    Ok(())
}
