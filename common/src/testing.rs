//! テスト用のインメモリ ImageTransfer

use crate::error::{TransferError, VariantFetchError};
use crate::image_data::ImageHandle;
use crate::transfer::ImageTransfer;
use crate::types::{
    BoundingBox, ImageVariant, ProcessedResult, TranslationEntry, TranslationUpdate,
    UpdateTranslationsResponse,
};
use crate::upload::UploadFile;
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Health,
    Upload { file_name: String, size: u64 },
    Process(String),
    FetchImage(ImageVariant, String),
    Submit(String, Vec<TranslationUpdate>),
}

pub struct MockTransfer {
    upload: Result<String, TransferError>,
    process: Result<ProcessedResult, TransferError>,
    submit: Result<UpdateTranslationsResponse, TransferError>,
    missing_images: Vec<String>,
    calls: RefCell<Vec<Call>>,
}

/// `translations` 件の翻訳を持つ処理結果
pub fn sample_result(image_id: &str, translations: u32) -> ProcessedResult {
    ProcessedResult {
        image_id: image_id.to_string(),
        original_image: format!("/api/images/uploads/{image_id}.png"),
        inpainted_image: format!("/api/images/inpainted/{image_id}_inpainted.png"),
        text_only_image: format!("/api/images/text_only/{image_id}_text.png"),
        boxed_image: format!("/api/images/boxed/{image_id}_boxed.png"),
        translated_image: format!("/api/images/translated/{image_id}_translated.png"),
        translations: (1..=translations)
            .map(|id| TranslationEntry {
                id,
                original_text: format!("原文{id}"),
                translated_text: format!("text {id}"),
                bounding_box: BoundingBox {
                    x: f64::from(id) * 10.0,
                    y: 5.0,
                    width: 40.0,
                    height: 20.0,
                },
            })
            .collect(),
        redirect_url: None,
    }
}

impl MockTransfer {
    pub fn new() -> Self {
        Self {
            upload: Ok("img-1".to_string()),
            process: Ok(sample_result("img-1", 3)),
            submit: Ok(UpdateTranslationsResponse {
                message: Some("Translations updated successfully".to_string()),
                translated_image: "/api/images/translated/img-1_translated.png".to_string(),
            }),
            missing_images: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_upload(mut self, result: Result<String, TransferError>) -> Self {
        self.upload = result;
        self
    }

    pub fn with_process(mut self, result: Result<ProcessedResult, TransferError>) -> Self {
        self.process = result;
        self
    }

    pub fn with_submit(mut self, result: Result<UpdateTranslationsResponse, TransferError>) -> Self {
        self.submit = result;
        self
    }

    pub fn missing_image(mut self, filename: &str) -> Self {
        self.missing_images.push(filename.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl ImageTransfer for MockTransfer {
    async fn health(&self) -> Result<(), TransferError> {
        self.record(Call::Health);
        Ok(())
    }

    async fn upload(&self, file: &UploadFile) -> Result<String, TransferError> {
        self.record(Call::Upload {
            file_name: file.file_name.clone(),
            size: file.size(),
        });
        self.upload.clone()
    }

    async fn process(&self, image_id: &str) -> Result<ProcessedResult, TransferError> {
        self.record(Call::Process(image_id.to_string()));
        let mut result = self.process.clone()?;
        result.ensure_image_id(image_id);
        Ok(result)
    }

    async fn fetch_image(
        &self,
        variant: ImageVariant,
        filename: &str,
    ) -> Result<ImageHandle, VariantFetchError> {
        self.record(Call::FetchImage(variant, filename.to_string()));
        if self.missing_images.iter().any(|m| m == filename) {
            return Err(VariantFetchError::new(variant, filename, "Server returned 404: Image not found"));
        }
        Ok(ImageHandle::new(format!("data:image/png;base64,{}", filename.len())))
    }

    async fn submit_translations(
        &self,
        image_id: &str,
        translations: &[TranslationUpdate],
    ) -> Result<UpdateTranslationsResponse, TransferError> {
        self.record(Call::Submit(image_id.to_string(), translations.to_vec()));
        self.submit.clone()
    }
}
