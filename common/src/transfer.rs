//! バックエンド通信の抽象化
//!
//! ブラウザ（fetch）とネイティブ（reqwest）で実装を差し替える。
//! リトライ・タイムアウトは持たず、各呼び出しは1回だけ試行する。

use crate::error::{TransferError, VariantFetchError};
use crate::image_data::ImageHandle;
use crate::types::{
    filename_of, ImageVariant, ProcessedResult, TranslationUpdate, UpdateTranslationsResponse,
};
use crate::upload::UploadFile;
use futures::future::join_all;
use std::collections::HashMap;

/// バックエンドAPIクライアント
#[allow(async_fn_in_trait)]
pub trait ImageTransfer {
    /// GET /health
    async fn health(&self) -> Result<(), TransferError>;

    /// POST /upload → image_id
    ///
    /// 呼び出し側で検証済みのファイルだけを渡すこと
    async fn upload(&self, file: &UploadFile) -> Result<String, TransferError>;

    /// POST /process/{image_id}
    ///
    /// 何度呼んでもよい（サーバー側の現在の結果を返す）。`image_id` は要求したIDで補完済み
    async fn process(&self, image_id: &str) -> Result<ProcessedResult, TransferError>;

    /// GET /images/{variant}/{filename}
    async fn fetch_image(
        &self,
        variant: ImageVariant,
        filename: &str,
    ) -> Result<ImageHandle, VariantFetchError>;

    /// PATCH /translations/{image_id}（常に全件を送る）
    async fn submit_translations(
        &self,
        image_id: &str,
        translations: &[TranslationUpdate],
    ) -> Result<UpdateTranslationsResponse, TransferError>;
}

/// バリアントを取得し、失敗時はプレースホルダを返す
///
/// `path` はサーバー相対パスでもファイル名でもよい
pub async fn fetch_or_placeholder<C: ImageTransfer>(
    client: &C,
    variant: ImageVariant,
    path: &str,
) -> ImageHandle {
    let filename = filename_of(path);
    if filename.is_empty() {
        tracing::warn!(%variant, "no image path in response; showing placeholder");
        return ImageHandle::placeholder();
    }

    match client.fetch_image(variant, filename).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "image fetch failed; showing placeholder");
            ImageHandle::placeholder()
        }
    }
}

/// バリアント別の表示画像
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantImages(HashMap<ImageVariant, ImageHandle>);

impl VariantImages {
    pub fn get(&self, variant: ImageVariant) -> Option<&ImageHandle> {
        self.0.get(&variant)
    }

    pub fn insert(&mut self, variant: ImageVariant, handle: ImageHandle) {
        self.0.insert(variant, handle);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 複数バリアントを並行取得
///
/// 各取得は独立しており、1件の失敗は他に影響しない。全件の完了を待つのはローディング表示のため
pub async fn fetch_variants<C: ImageTransfer>(
    client: &C,
    result: &ProcessedResult,
    variants: &[ImageVariant],
) -> VariantImages {
    let fetches = variants.iter().map(|&variant| async move {
        let handle = fetch_or_placeholder(client, variant, result.variant_path(variant)).await;
        (variant, handle)
    });

    VariantImages(join_all(fetches).await.into_iter().collect())
}
