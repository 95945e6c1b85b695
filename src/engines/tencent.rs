//! 腾讯云机器翻译接口：TC3 签名，支持文本与图片两种动作。

use super::host_of;
use crate::config::Config;
use crate::error::LingoGateError;
use crate::signing::tc3;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "tmt";
const VERSION: &str = "2018-03-21";
const FAIL_TEXT: &str = "腾讯翻译失败";
const FAIL_IMAGE: &str = "腾讯图片翻译失败";
const MISSING_CREDS: &str = "请在设置中配置腾讯云 SecretId 和 SecretKey";
const TEXT_TIMEOUT: Duration = Duration::from_secs(10);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

fn map_lang(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "zh",
        TargetLang::En => "en",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TextTranslateRequest<'a> {
    source_text: &'a str,
    source: &'a str,
    target: &'a str,
    project_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ImageTranslateRequest<'a> {
    session_uuid: String,
    scene: &'a str,
    data: String,
    source: &'a str,
    target: &'a str,
    project_id: i64,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Response", default)]
    response: ResponseBody,
}

#[derive(Deserialize, Default)]
struct ResponseBody {
    #[serde(rename = "TargetText")]
    target_text: Option<String>,
    #[serde(rename = "ImageRecord")]
    image_record: Option<ImageRecord>,
    #[serde(rename = "Error")]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Deserialize)]
struct ImageRecord {
    #[serde(rename = "Value")]
    value: Vec<ImageBlock>,
}

#[derive(Deserialize)]
struct ImageBlock {
    #[serde(rename = "TargetText")]
    target_text: String,
}

/// 签名并发起一次 TMT 调用，返回解包后的 Response 体
async fn call(
    config: &Config,
    transports: &TransportCache,
    action: &str,
    payload: String,
    timeout: Duration,
    fail: &'static str,
) -> Result<ResponseBody> {
    let host = host_of(&config.tencent.endpoint);
    let signed = tc3::sign(
        &config.tencent.secret_id,
        &config.tencent.secret_key,
        host,
        SERVICE,
        &payload,
        Utc::now(),
    );

    let client = transports.resolve(config.tencent.proxy_mode)?;
    let response = client
        .post(&config.tencent.endpoint)
        .header("Authorization", signed.authorization)
        .header("Content-Type", "application/json")
        .header("X-TC-Action", action)
        .header("X-TC-Timestamp", signed.timestamp.to_string())
        .header("X-TC-Version", VERSION)
        .header("X-TC-Region", &config.tencent.region)
        .body(payload)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| LingoGateError::network(fail, e))?
        .error_for_status()
        .map_err(|e| LingoGateError::network(fail, e))?;

    let envelope: Envelope = response
        .json()
        .await
        .map_err(|e| LingoGateError::network(fail, e))?;
    Ok(envelope.response)
}

fn error_detail(body: ResponseBody) -> String {
    body.error
        .map(|e| e.message)
        .unwrap_or_else(|| "未知错误".to_string())
}

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    if config.tencent.secret_id.is_empty() || config.tencent.secret_key.is_empty() {
        return Err(LingoGateError::MissingCredential {
            hint: MISSING_CREDS,
        });
    }

    let payload = serde_json::to_string(&TextTranslateRequest {
        source_text: text,
        source: "auto",
        target: map_lang(target),
        project_id: 0,
    })
    .map_err(|e| LingoGateError::bad_response(FAIL_TEXT, e.to_string()))?;

    let body = call(
        config,
        transports,
        "TextTranslate",
        payload,
        TEXT_TIMEOUT,
        FAIL_TEXT,
    )
    .await?;

    match body.target_text {
        Some(target_text) => Ok(target_text),
        None => Err(LingoGateError::bad_response(FAIL_TEXT, error_detail(body))),
    }
}

pub async fn translate_image(
    config: &Config,
    transports: &TransportCache,
    image: &[u8],
    target: TargetLang,
) -> Result<String> {
    if config.tencent.secret_id.is_empty() || config.tencent.secret_key.is_empty() {
        return Err(LingoGateError::MissingCredential {
            hint: MISSING_CREDS,
        });
    }

    let payload = serde_json::to_string(&ImageTranslateRequest {
        session_uuid: format!("session-{}", uuid::Uuid::new_v4()),
        scene: "doc",
        data: STANDARD.encode(image),
        source: "auto",
        target: map_lang(target),
        project_id: 0,
    })
    .map_err(|e| LingoGateError::bad_response(FAIL_IMAGE, e.to_string()))?;

    let body = call(
        config,
        transports,
        "ImageTranslate",
        payload,
        IMAGE_TIMEOUT,
        FAIL_IMAGE,
    )
    .await?;

    match body.image_record {
        Some(record) => {
            // 识别出的文本块按原顺序逐行拼接
            let lines: Vec<String> = record.value.into_iter().map(|b| b.target_text).collect();
            Ok(lines.join("\n"))
        }
        None => Err(LingoGateError::bad_response(FAIL_IMAGE, error_detail(body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ProxyMode;
    use mockito::{Matcher, Server};

    fn test_config(endpoint: String) -> Config {
        let mut config = Config::default();
        config.tencent.endpoint = endpoint;
        config.tencent.secret_id = "test-secret-id".to_string();
        config.tencent.secret_key = "test-secret-key".to_string();
        config.tencent.proxy_mode = ProxyMode::Direct;
        config
    }

    #[test]
    fn test_lang_mapping() {
        assert_eq!(map_lang(TargetLang::ZhCn), "zh");
        assert_eq!(map_lang(TargetLang::En), "en");
    }

    #[tokio::test]
    async fn test_missing_credentials_without_network() {
        let mut config = test_config("http://127.0.0.1:1".to_string());
        config.tencent.secret_id = String::new();
        let transports = TransportCache::new(&config.proxy_url, false);

        let err = translate(&config, &transports, "hello", TargetLang::ZhCn)
            .await
            .unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "请在设置中配置腾讯云 SecretId 和 SecretKey");
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-tc-action", "TextTranslate")
            .match_header("x-tc-version", VERSION)
            .match_header("x-tc-region", "ap-beijing")
            .match_header(
                "authorization",
                Matcher::Regex("^TC3-HMAC-SHA256 Credential=test-secret-id/".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Response":{"TargetText":"你好","Source":"en","Target":"zh"}}"#)
            .create_async()
            .await;

        let config = test_config(server.url());
        let transports = TransportCache::new(&config.proxy_url, false);

        let result = translate(&config, &transports, "hello", TargetLang::ZhCn).await;
        assert_eq!(result.unwrap(), "你好");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_translate_error_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure","Message":"签名错误"}}}"#,
            )
            .create_async()
            .await;

        let config = test_config(server.url());
        let transports = TransportCache::new(&config.proxy_url, false);

        let err = translate(&config, &transports, "hello", TargetLang::ZhCn)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "腾讯翻译失败: 签名错误");
    }

    #[tokio::test]
    async fn test_translate_error_body_without_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"Response":{"RequestId":"x"}}"#)
            .create_async()
            .await;

        let config = test_config(server.url());
        let transports = TransportCache::new(&config.proxy_url, false);

        let err = translate(&config, &transports, "hello", TargetLang::ZhCn)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "腾讯翻译失败: 未知错误");
    }

    #[tokio::test]
    async fn test_image_translate_joins_blocks() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-tc-action", "ImageTranslate")
            .with_status(200)
            .with_body(
                r#"{"Response":{"ImageRecord":{"Value":[
                    {"SourceText":"hello","TargetText":"你好"},
                    {"SourceText":"world","TargetText":"世界"}
                ]}}}"#,
            )
            .create_async()
            .await;

        let config = test_config(server.url());
        let transports = TransportCache::new(&config.proxy_url, false);

        let result = translate_image(&config, &transports, &[1, 2, 3], TargetLang::ZhCn).await;
        assert_eq!(result.unwrap(), "你好\n世界");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_image_translate_missing_credentials() {
        let mut config = test_config("http://127.0.0.1:1".to_string());
        config.tencent.secret_key = String::new();
        let transports = TransportCache::new(&config.proxy_url, false);

        let err = translate_image(&config, &transports, &[1, 2, 3], TargetLang::ZhCn)
            .await
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
