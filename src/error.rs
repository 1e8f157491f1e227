use thiserror::Error;

#[derive(Error, Debug)]
pub enum MangaLensError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Client(#[from] mangalens_common::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<mangalens_common::TransferError> for MangaLensError {
    fn from(e: mangalens_common::TransferError) -> Self {
        MangaLensError::Client(e.into())
    }
}

impl From<mangalens_common::ValidationError> for MangaLensError {
    fn from(e: mangalens_common::ValidationError) -> Self {
        MangaLensError::Client(e.into())
    }
}

pub type Result<T> = std::result::Result<T, MangaLensError>;
