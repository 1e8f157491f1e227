//! ビルド時設定

use mangalens_common::ClientConfig;

/// `MANGALENS_API_URL` をビルド時に指定するとバックエンドURLを上書きできる
pub fn client_config() -> ClientConfig {
    ClientConfig::from_override(option_env!("MANGALENS_API_URL"))
}
