//! Google 网页翻译接口：免认证的 GET 请求，响应是嵌套数组。

use crate::config::Config;
use crate::error::LingoGateError;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use serde_json::Value;
use std::time::Duration;

const FAIL: &str = "Google 翻译失败";
const TIMEOUT: Duration = Duration::from_secs(10);

pub async fn translate(
    config: &Config,
    transports: &TransportCache,
    text: &str,
    target: TargetLang,
) -> Result<String> {
    let client = transports.resolve(config.google.proxy_mode)?;

    // 语言代码直接透传
    let response = client
        .get(&config.google.endpoint)
        .query(&[
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", target.code()),
            ("dt", "t"),
            ("q", text),
        ])
        .timeout(TIMEOUT)
        .send()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?
        .error_for_status()
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    let body: Value = response
        .json()
        .await
        .map_err(|e| LingoGateError::network(FAIL, e))?;

    // 形如 [[["你好","hello",...],["世界","world",...]], null, "en"]，
    // 译文是每个分段的第一个元素，按顺序拼接
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| LingoGateError::bad_response(FAIL, "返回结果格式异常"))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();

    Ok(translated)
}
