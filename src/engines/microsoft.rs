//! Microsoft 翻译接口：订阅 Key + 区域请求头，目标语言在查询串里。

use crate::config::Config;
use crate::error::LingoGateError;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

const FAIL: &str = "Microsoft 翻译失败";
const MISSING_KEY: &str = "请在设置中配置 Microsoft API Key";
const TIMEOUT: Duration = Duration::from_secs(10);

fn map_lang(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "zh-Hans",
        TargetLang::En => "en",
    }
}

#[derive(Deserialize)]
struct TranslateItem {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    if config.microsoft.api_key.is_empty() {
        return Err(LingoGateError::MissingCredential { hint: MISSING_KEY });
    }

    let client = transports.resolve(config.microsoft.proxy_mode)?;
    let body = serde_json::json!([{ "text": text }]);

    let response = client
        .post(&config.microsoft.endpoint)
        .query(&[("api-version", "3.0"), ("to", map_lang(target))])
        .header("Ocp-Apim-Subscription-Key", &config.microsoft.api_key)
        .header("Ocp-Apim-Subscription-Region", &config.microsoft.region)
        .json(&body)
        .timeout(TIMEOUT)
        .send()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?
        .error_for_status()
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    let items: Vec<TranslateItem> = response
        .json()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    items
        .into_iter()
        .next()
        .and_then(|item| item.translations.into_iter().next())
        .map(|t| t.text)
        .ok_or_else(|| LingoGateError::bad_response(FAIL, "译文列表为空"))
}
