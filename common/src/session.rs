//! 翻訳編集セッション
//!
//! 処理結果の翻訳一覧を手元にコピーして編集し、保存時は全件をまとめて送る。
//! 保存後は再レンダリングされた翻訳画像を取り直す。

use crate::error::{Error, Result};
use crate::image_data::ImageHandle;
use crate::transfer::{fetch_or_placeholder, ImageTransfer};
use crate::types::{
    translated_filename, ImageVariant, ProcessedResult, TranslationEntry, TranslationUpdate,
};

/// 送信する保存内容（その時点の全件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub image_id: String,
    pub translations: Vec<TranslationUpdate>,
}

/// 保存結果
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    /// 再レンダリング後の翻訳画像パス
    pub translated_image: String,
    /// 表示用の翻訳画像（取得失敗時はプレースホルダ）
    pub handle: ImageHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEditSession {
    image_id: String,
    entries: Vec<TranslationEntry>,
    /// 最後に読み込んだ／保存した時点の訳文（entries と同じ順）
    saved_texts: Vec<String>,
    saving: bool,
}

impl TranslationEditSession {
    pub fn new(result: &ProcessedResult) -> Self {
        Self {
            image_id: result.image_id.clone(),
            entries: result.translations.clone(),
            saved_texts: result
                .translations
                .iter()
                .map(|entry| entry.translated_text.clone())
                .collect(),
            saving: false,
        }
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn entry(&self, id: u32) -> Option<&TranslationEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 訳文を置き換える
    ///
    /// 保存中でも編集は受け付ける（送信済みの内容には影響しない）
    pub fn edit_text(&mut self, id: u32, text: impl Into<String>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(Error::UnknownTranslation(id))?;
        entry.translated_text = text.into();
        Ok(())
    }

    /// 未保存の編集があるか
    pub fn is_modified(&self) -> bool {
        self.entries
            .iter()
            .zip(&self.saved_texts)
            .any(|(entry, saved)| entry.translated_text != *saved)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// PATCH で送る全件
    pub fn payload(&self) -> Vec<TranslationUpdate> {
        self.entries
            .iter()
            .map(|entry| TranslationUpdate {
                id: entry.id,
                translated_text: entry.translated_text.clone(),
            })
            .collect()
    }

    /// 保存を開始する（同時に2つの保存は走らせない）
    pub fn begin_save(&mut self) -> Result<SaveRequest> {
        if self.saving {
            return Err(Error::SaveInProgress);
        }
        self.saving = true;
        Ok(SaveRequest {
            image_id: self.image_id.clone(),
            translations: self.payload(),
        })
    }

    /// 保存成功を反映
    ///
    /// 送信後に入った編集は未保存のまま残る
    pub fn complete_save(&mut self, request: &SaveRequest, outcome: &SaveOutcome) {
        for update in &request.translations {
            if let Some(index) = self.entries.iter().position(|entry| entry.id == update.id) {
                self.saved_texts[index] = update.translated_text.clone();
            }
        }
        self.saving = false;
    }

    /// 保存失敗。編集内容はそのまま残るので再度保存できる
    pub fn abort_save(&mut self) {
        self.saving = false;
    }

    /// 全件を送信して再レンダリング後の翻訳画像を返す
    pub async fn save<C: ImageTransfer>(&mut self, client: &C) -> Result<ImageHandle> {
        let request = self.begin_save()?;
        match submit_save(client, &request).await {
            Ok(outcome) => {
                self.complete_save(&request, &outcome);
                Ok(outcome.handle)
            }
            Err(e) => {
                self.abort_save();
                Err(e)
            }
        }
    }
}

impl ProcessedResult {
    /// 保存した訳文と再レンダリング後の画像パスを書き戻す
    pub fn apply_save(&mut self, request: &SaveRequest, outcome: &SaveOutcome) {
        for update in &request.translations {
            if let Some(entry) = self.translations.iter_mut().find(|entry| entry.id == update.id) {
                entry.translated_text = update.translated_text.clone();
            }
        }
        self.replace_translated_image(outcome.translated_image.clone());
    }
}

/// PATCH を送り、翻訳画像を取り直す
pub async fn submit_save<C: ImageTransfer>(client: &C, request: &SaveRequest) -> Result<SaveOutcome> {
    tracing::debug!(
        image_id = %request.image_id,
        count = request.translations.len(),
        "submitting translations"
    );

    let response = client
        .submit_translations(&request.image_id, &request.translations)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to save translations"))?;

    let translated_image = if response.translated_image.is_empty() {
        translated_filename(&request.image_id)
    } else {
        response.translated_image
    };
    let handle = fetch_or_placeholder(client, ImageVariant::Translated, &translated_image).await;

    Ok(SaveOutcome {
        translated_image,
        handle,
    })
}
