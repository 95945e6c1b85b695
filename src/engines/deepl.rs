//! DeepL 接口：静态 Key 请求头 + 表单编码请求体。

use crate::config::Config;
use crate::error::LingoGateError;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

const FAIL: &str = "DeepL 翻译失败";
const MISSING_KEY: &str = "请在设置中配置 DeepL API Key";
const TIMEOUT: Duration = Duration::from_secs(10);

fn map_lang(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "ZH",
        TargetLang::En => "EN-US",
    }
}

#[derive(Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Deserialize)]
struct DeeplTranslation {
    text: String,
}

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    let api_key = &config.deepl.api_key;
    if api_key.is_empty() {
        return Err(LingoGateError::MissingCredential { hint: MISSING_KEY });
    }

    let client = transports.resolve(config.deepl.proxy_mode)?;
    let response = client
        .post(&config.deepl.endpoint)
        .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
        .form(&[("text", text), ("target_lang", map_lang(target))])
        .timeout(TIMEOUT)
        .send()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?
        .error_for_status()
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    let body: DeeplResponse = response
        .json()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    body.translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| LingoGateError::bad_response(FAIL, "译文列表为空"))
}
