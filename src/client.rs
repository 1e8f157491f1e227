//! reqwest によるバックエンドクライアント

use crate::config::Config;
use mangalens_common::api::{ApiEndpoints, UPLOAD_FIELD};
use mangalens_common::types::{HealthStatus, ImagePayload, UpdateTranslationsRequest};
use mangalens_common::{
    ImageHandle, ImageTransfer, ImageVariant, ProcessedResult, TransferError, TranslationUpdate,
    UpdateTranslationsResponse, UploadFile, UploadResponse, VariantFetchError,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP経由の ImageTransfer
///
/// タイムアウト・リトライは設定しない（1回だけ試行）
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    http: Client,
    endpoints: ApiEndpoints,
}

impl HttpTransfer {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config.endpoints())
    }

    pub fn with_client(http: Client, endpoints: ApiEndpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }
}

/// 送信して本文を受け取る。非2xxはバックエンドのエラーメッセージ付きで返す
async fn send(request: RequestBuilder) -> Result<String, TransferError> {
    let response = request
        .send()
        .await
        .map_err(|e| TransferError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransferError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(TransferError::from_status(status.as_u16(), &body));
    }
    Ok(body)
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, TransferError> {
    serde_json::from_str(body).map_err(|e| TransferError::Decode(e.to_string()))
}

impl ImageTransfer for HttpTransfer {
    async fn health(&self) -> Result<(), TransferError> {
        let body = send(self.http.get(self.endpoints.health())).await?;
        let health: HealthStatus = parse(&body)?;
        tracing::debug!(status = %health.status, "backend health");
        Ok(())
    }

    async fn upload(&self, file: &UploadFile) -> Result<String, TransferError> {
        tracing::debug!(file = %file.file_name, size = file.size(), "uploading image");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| TransferError::Network(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let body = send(self.http.post(self.endpoints.upload()).multipart(form)).await?;
        let response: UploadResponse = parse(&body)?;
        if response.image_id.is_empty() {
            return Err(TransferError::Decode("upload response has no image_id".to_string()));
        }
        Ok(response.image_id)
    }

    async fn process(&self, image_id: &str) -> Result<ProcessedResult, TransferError> {
        tracing::debug!(image_id, "processing image");

        let body = send(self.http.post(self.endpoints.process(image_id))).await?;
        let mut result: ProcessedResult = parse(&body)?;
        result.ensure_image_id(image_id);
        Ok(result)
    }

    async fn fetch_image(
        &self,
        variant: ImageVariant,
        filename: &str,
    ) -> Result<ImageHandle, VariantFetchError> {
        let body = send(self.http.get(self.endpoints.image(variant, filename)))
            .await
            .map_err(|e| VariantFetchError::new(variant, filename, e))?;
        let payload: ImagePayload =
            parse(&body).map_err(|e| VariantFetchError::new(variant, filename, e))?;
        Ok(ImageHandle::new(payload.data))
    }

    async fn submit_translations(
        &self,
        image_id: &str,
        translations: &[TranslationUpdate],
    ) -> Result<UpdateTranslationsResponse, TransferError> {
        let request = UpdateTranslationsRequest {
            translations: translations.to_vec(),
        };
        let body = send(
            self.http
                .patch(self.endpoints.translations(image_id))
                .json(&request),
        )
        .await?;
        parse(&body)
    }
}
