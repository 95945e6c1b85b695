//! 火山引擎翻译接口：v4 风格签名，错误对象在 2xx 响应体内。

use super::{host_of, truncate_chars};
use crate::config::Config;
use crate::error::LingoGateError;
use crate::signing::volc;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "translate";
const ACTION: &str = "TranslateText";
const VERSION: &str = "2020-06-01";
const FAIL: &str = "火山翻译失败";
const HTTP_FAIL: &str = "火山翻译 HTTP 错误";
const MISSING_CREDS: &str = "请在设置中配置火山引擎 AccessKey 和 SecretKey";
const TIMEOUT: Duration = Duration::from_secs(10);

fn map_lang(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "zh",
        TargetLang::En => "en",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateTextRequest<'a> {
    target_language: &'a str,
    text_list: [&'a str; 1],
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "ResponseMetadata")]
    response_metadata: Option<Metadata>,
    #[serde(rename = "TranslationList")]
    translation_list: Option<Vec<Translation>>,
}

#[derive(Deserialize)]
struct Metadata {
    #[serde(rename = "Error")]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(rename = "Code", default = "default_error_code")]
    code: String,
    #[serde(rename = "Message", default = "default_error_message")]
    message: String,
}

fn default_error_code() -> String {
    "Unknown".to_string()
}

fn default_error_message() -> String {
    "未知错误".to_string()
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "Translation")]
    translation: String,
}

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    let access_key = config.volcano.access_key.trim();
    let secret_key = config.volcano.secret_key.trim();
    if access_key.is_empty() || secret_key.is_empty() {
        return Err(LingoGateError::MissingCredential {
            hint: MISSING_CREDS,
        });
    }

    let payload = serde_json::to_string(&TranslateTextRequest {
        target_language: map_lang(target),
        text_list: [text],
    })
    .map_err(|e| LingoGateError::bad_response(FAIL, e.to_string()))?;

    let host = host_of(&config.volcano.endpoint);
    let signed = volc::sign(
        access_key,
        secret_key,
        host,
        config.volcano.region.trim(),
        SERVICE,
        ACTION,
        VERSION,
        &payload,
        Utc::now(),
    );

    // 签名覆盖了查询串，URL 必须原样携带
    let url = format!(
        "{}/?{}",
        config.volcano.endpoint.trim_end_matches('/'),
        signed.query
    );

    let client = transports.resolve(config.volcano.proxy_mode)?;
    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .header("X-Date", signed.x_date)
        .header("Authorization", signed.authorization)
        .body(payload)
        .timeout(TIMEOUT)
        .send()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LingoGateError::UpstreamHttp {
            prefix: HTTP_FAIL,
            status: status.as_u16(),
            detail: truncate_chars(&body, 200),
        });
    }

    let raw = response
        .text()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?;
    let envelope: Envelope = serde_json::from_str(&raw).map_err(|_| {
        LingoGateError::bad_response(
            FAIL,
            format!("返回结果格式异常 - {}", truncate_chars(&raw, 200)),
        )
    })?;

    // 错误对象藏在 2xx 响应体里，必须先于成功路径检查
    if let Some(error) = envelope.response_metadata.and_then(|m| m.error) {
        return Err(LingoGateError::UpstreamError {
            prefix: FAIL,
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .translation_list
        .and_then(|list| list.into_iter().next())
        .map(|t| t.translation)
        .ok_or_else(|| {
            LingoGateError::bad_response(
                FAIL,
                format!("返回结果格式异常 - {}", truncate_chars(&raw, 200)),
            )
        })
}
