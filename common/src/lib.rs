//! MangaLens Common Library
//!
//! ブラウザ(WASM)とネイティブで共有される型・クライアント状態・バックエンド契約

pub mod types;
pub mod error;
pub mod upload;
pub mod api;
pub mod config;
pub mod image_data;
pub mod transfer;
pub mod zoom;
pub mod route;
pub mod workflow;
pub mod session;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use types::{
    translated_filename, BoundingBox, ImageVariant, ProcessedResult, TranslationEntry,
    TranslationUpdate, UpdateTranslationsResponse, UploadResponse,
};
pub use error::{Error, Result, TransferError, ValidationError, VariantFetchError};
pub use upload::{validate_upload, UploadFile, ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES};
pub use api::{ApiEndpoints, PLACEHOLDER_IMAGE_URL};
pub use config::ClientConfig;
pub use image_data::{download_file_name, ImageHandle};
pub use transfer::{fetch_or_placeholder, fetch_variants, ImageTransfer, VariantImages};
pub use zoom::{FullscreenRequest, ZoomController, ZoomLayout};
pub use route::AppRoute;
pub use workflow::{upload_and_process, ReviewHandoff, ReviewWorkflow, WorkflowState};
pub use session::{submit_save, SaveOutcome, SaveRequest, TranslationEditSession};
pub use theme::{has_explicit_scheme, initial_scheme, persist_scheme, ColorScheme, PreferenceStore};
