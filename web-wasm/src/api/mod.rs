//! API連携モジュール

pub mod backend;

pub use backend::{read_upload_file, BrowserTransfer};
