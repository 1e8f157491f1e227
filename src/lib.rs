//! MangaLens ネイティブクライアント
//!
//! 共通ライブラリのワークフロー・編集セッションを reqwest で動かす

pub mod client;
pub mod config;
pub mod error;
pub mod files;

pub use client::HttpTransfer;
pub use config::Config;
pub use error::{MangaLensError, Result};
pub use files::{load_upload_file, save_translated};

pub use mangalens_common as common;
