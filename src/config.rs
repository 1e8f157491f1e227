use crate::error::{MangaLensError, Result};
use mangalens_common::api::ApiEndpoints;
use mangalens_common::config::API_URL_ENV;
use mangalens_common::ClientConfig;

/// ネイティブクライアントの設定
///
/// 設定ファイルは持たず、環境変数 `MANGALENS_API_URL` だけを読む
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    client: ClientConfig,
}

impl Config {
    /// 環境変数から読み込む（未設定なら既定URL）
    pub fn load() -> Result<Self> {
        Self::from_env_value(std::env::var(API_URL_ENV).ok().as_deref())
    }

    pub fn new(api_base: &str) -> Result<Self> {
        Self::from_env_value(Some(api_base))
    }

    fn from_env_value(value: Option<&str>) -> Result<Self> {
        let client = ClientConfig::from_override(value);
        if !client.api_base.starts_with("http://") && !client.api_base.starts_with("https://") {
            return Err(MangaLensError::Config(format!(
                "{} は http:// または https:// で始まる必要があります: {}",
                API_URL_ENV, client.api_base
            )));
        }
        Ok(Self { client })
    }

    pub fn api_base(&self) -> &str {
        &self.client.api_base
    }

    pub fn endpoints(&self) -> ApiEndpoints {
        self.client.endpoints()
    }
}
