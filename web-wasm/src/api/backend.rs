//! バックエンドAPI連携（fetch）
//!
//! 失敗時は `{"error": "..."}` のメッセージを TransferError に載せて返す

use js_sys::{Array, Uint8Array};
use mangalens_common::api::{ApiEndpoints, UPLOAD_FIELD};
use mangalens_common::types::{HealthStatus, ImagePayload, UpdateTranslationsRequest};
use mangalens_common::{
    ClientConfig, ImageHandle, ImageTransfer, ImageVariant, ProcessedResult, TransferError,
    TranslationUpdate, UpdateTranslationsResponse, UploadFile, UploadResponse, VariantFetchError,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, File, FormData, Request, RequestCache, RequestInit, RequestMode,
    Response,
};

/// fetch による ImageTransfer
#[derive(Debug, Clone)]
pub struct BrowserTransfer {
    endpoints: ApiEndpoints,
}

impl BrowserTransfer {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: config.endpoints(),
        }
    }
}

/// JsValue のエラーを文字列に
fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

fn network_error(value: JsValue) -> TransferError {
    TransferError::Network(describe(&value))
}

fn build_request(
    method: &str,
    url: &str,
    body: Option<&JsValue>,
    cache: Option<RequestCache>,
) -> Result<Request, TransferError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(body);
    }
    if let Some(cache) = cache {
        opts.set_cache(cache);
    }
    Request::new_with_str_and_init(url, &opts).map_err(network_error)
}

/// 送信してJSON応答をデコード
async fn fetch_json<T: DeserializeOwned>(request: Request) -> Result<T, TransferError> {
    let window = web_sys::window()
        .ok_or_else(|| TransferError::Network("window is not available".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    if !resp.ok() {
        let body = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        return Err(TransferError::from_status(resp.status(), &body));
    }

    let json = JsFuture::from(resp.json().map_err(network_error)?)
        .await
        .map_err(|e| TransferError::Decode(describe(&e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| TransferError::Decode(e.to_string()))
}

impl ImageTransfer for BrowserTransfer {
    async fn health(&self) -> Result<(), TransferError> {
        let request = build_request("GET", &self.endpoints.health(), None, Some(RequestCache::NoStore))?;
        let health: HealthStatus = fetch_json(request).await?;
        tracing::debug!(status = %health.status, "backend health");
        Ok(())
    }

    async fn upload(&self, file: &UploadFile) -> Result<String, TransferError> {
        tracing::debug!(file = %file.file_name, size = file.size(), "uploading image");

        let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(network_error)?;

        let form = FormData::new().map_err(network_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.file_name)
            .map_err(network_error)?;

        let request = build_request("POST", &self.endpoints.upload(), Some(form.as_ref()), None)?;
        let response: UploadResponse = fetch_json(request).await?;
        if response.image_id.is_empty() {
            return Err(TransferError::Decode("upload response has no image_id".to_string()));
        }
        Ok(response.image_id)
    }

    async fn process(&self, image_id: &str) -> Result<ProcessedResult, TransferError> {
        tracing::debug!(image_id, "processing image");

        let request = build_request("POST", &self.endpoints.process(image_id), None, None)?;
        let mut result: ProcessedResult = fetch_json(request).await?;
        result.ensure_image_id(image_id);
        Ok(result)
    }

    async fn fetch_image(
        &self,
        variant: ImageVariant,
        filename: &str,
    ) -> Result<ImageHandle, VariantFetchError> {
        // 保存後は同じファイル名で再レンダリングされるのでキャッシュしない
        let request = build_request(
            "GET",
            &self.endpoints.image(variant, filename),
            None,
            Some(RequestCache::NoStore),
        )
        .map_err(|e| VariantFetchError::new(variant, filename, e))?;

        let payload: ImagePayload = fetch_json(request)
            .await
            .map_err(|e| VariantFetchError::new(variant, filename, e))?;
        Ok(ImageHandle::new(payload.data))
    }

    async fn submit_translations(
        &self,
        image_id: &str,
        translations: &[TranslationUpdate],
    ) -> Result<UpdateTranslationsResponse, TransferError> {
        let body = serde_json::to_string(&UpdateTranslationsRequest {
            translations: translations.to_vec(),
        })
        .map_err(|e| TransferError::Decode(e.to_string()))?;

        let request = build_request(
            "PATCH",
            &self.endpoints.translations(image_id),
            Some(&JsValue::from_str(&body)),
            None,
        )?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network_error)?;

        fetch_json(request).await
    }
}

/// 選択されたファイルを読み込む
pub async fn read_upload_file(file: &File) -> Result<UploadFile, TransferError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| TransferError::Decode(format!("could not read {}: {}", file.name(), describe(&e))))?;

    Ok(UploadFile::new(
        file.name(),
        file.type_(),
        Uint8Array::new(&buffer).to_vec(),
    ))
}
