//! OpenAI 兼容的大模型翻译接口，文本与视觉（图片）两种模式。

use super::truncate_chars;
use crate::config::Config;
use crate::error::LingoGateError;
use crate::transport::TransportCache;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, TargetLang};
use crate::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;

const FAIL_TEXT: &str = "AI 访问失败";
const FAIL_IMAGE: &str = "AI 图片翻译失败";
const ERR_TEXT: &str = "AI Error";
const ERR_IMAGE: &str = "AI 图片翻译错误";
const MISSING_KEY_TEXT: &str = "Please set AI API Key.";
const MISSING_KEY_IMAGE: &str = "请在设置中配置 AI API Key";
const TEXT_TIMEOUT: Duration = Duration::from_secs(30);
const VISION_TIMEOUT: Duration = Duration::from_secs(60);
const VISION_MAX_TOKENS: u32 = 1000;

/// endpoint 已含 /chat/completions 时原样使用，否则补全
pub(crate) fn resolve_api_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.contains("/chat/completions") {
        base.to_string()
    } else {
        format!("{}/chat/completions", base)
    }
}

fn text_instruction(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "Translate the following text to Chinese",
        TargetLang::En => "Translate the following text to English",
    }
}

fn vision_instruction(target: TargetLang) -> &'static str {
    match target {
        TargetLang::ZhCn => "请识别图片中的所有文字并翻译成中文，只输出翻译结果，不要有其他说明。",
        TargetLang::En => {
            "Please recognize all text in the image and translate it to English. \
             Output only the translation without any explanation."
        }
    }
}

async fn chat(
    config: &Config,
    transports: &TransportCache,
    request: &ChatRequest,
    timeout: Duration,
    fail: &'static str,
    err_prefix: &'static str,
) -> Result<String> {
    let url = resolve_api_url(&config.ai.endpoint);
    let client = transports.resolve(config.ai.proxy_mode)?;

    let response = client
        .post(&url)
        .bearer_auth(&config.ai.api_key)
        .json(request)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| LingoGateError::network(fail, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LingoGateError::UpstreamStatus {
            prefix: err_prefix,
            status: status.as_u16(),
            detail: truncate_chars(&body, 200),
        });
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| LingoGateError::network(fail, e))?;

    body.choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .ok_or_else(|| LingoGateError::bad_response(fail, "返回结果格式异常"))
}

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    if config.ai.api_key.is_empty() {
        return Err(LingoGateError::MissingCredential {
            hint: MISSING_KEY_TEXT,
        });
    }

    let request = ChatRequest {
        model: config.ai.model.clone(),
        messages: vec![
            ChatMessage::system(format!(
                "{}: {}",
                text_instruction(target),
                config.ai.prompt
            )),
            ChatMessage::user(text),
        ],
        max_tokens: None,
    };

    chat(
        config,
        transports,
        &request,
        TEXT_TIMEOUT,
        FAIL_TEXT,
        ERR_TEXT,
    )
    .await
}

pub async fn translate_image(
    config: &Config,
    transports: &TransportCache,
    image: &[u8],
    target: TargetLang,
) -> Result<String> {
    if config.ai.api_key.is_empty() {
        return Err(LingoGateError::MissingCredential {
            hint: MISSING_KEY_IMAGE,
        });
    }

    let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(image));
    let request = ChatRequest {
        model: config.ai.vision_model.clone(),
        messages: vec![ChatMessage::user_parts(vec![
            ContentPart::Text {
                text: vision_instruction(target).to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl { url: data_uri },
            },
        ])],
        max_tokens: Some(VISION_MAX_TOKENS),
    };

    chat(
        config,
        transports,
        &request,
        VISION_TIMEOUT,
        FAIL_IMAGE,
        ERR_IMAGE,
    )
    .await
}
