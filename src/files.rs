//! ローカルファイルの読み込みと翻訳結果の保存

use crate::error::{MangaLensError, Result};
use mangalens_common::{download_file_name, ImageHandle, UploadFile};
use std::path::{Path, PathBuf};

/// 拡張子からMIMEタイプを推定（対応外は検証で弾かれる）
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 画像ファイルを読み込み、アップロード可能か検証する
pub fn load_upload_file(path: &Path) -> Result<UploadFile> {
    if !path.is_file() {
        return Err(MangaLensError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = UploadFile::new(file_name, mime_type_for(path), std::fs::read(path)?);
    file.validate()?;
    Ok(file)
}

/// 翻訳済み画像を `translated_manga_{image_id}.png` として保存
pub fn save_translated(handle: &ImageHandle, dir: &Path, image_id: &str) -> Result<PathBuf> {
    let decoded = handle.decode()?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(image_id));
    std::fs::write(&path, &decoded.bytes)?;

    tracing::info!(path = %path.display(), bytes = decoded.bytes.len(), "saved translated image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("page.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("page.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("page.gif")), "application/octet-stream");
        assert_eq!(mime_type_for(Path::new("page")), "application/octet-stream");
    }
}
