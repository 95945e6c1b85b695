//! TC3-HMAC-SHA256 签名（腾讯云风格）。

use super::{hmac_sha256, sha256_hex};
use chrono::{DateTime, Utc};

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host";

/// 签名结果，构造后立即用于一次 HTTP 调用
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub authorization: String,
    pub timestamp: i64,
}

/// 对 JSON 负载计算 TC3 签名。
///
/// 规范请求为固定的 `POST / ` 形式：空规范查询串，规范头只含小写的
/// content-type 与 host，头块之后保留一个空行。凭证范围为
/// `date/service/tc3_request`，派生键链以 `"TC3" + secretKey` 起始。
/// 服务端逐字节校验，任何偏差都会被拒绝。
pub fn sign(
    secret_id: &str,
    secret_key: &str,
    host: &str,
    service: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> SignedRequest {
    let timestamp = now.timestamp();
    let date = now.format("%Y-%m-%d").to_string();

    let canonical_headers = format!("content-type:application/json\nhost:{}\n", host);
    let canonical_request = format!(
        "POST\n/\n\n{}\n{}\n{}",
        canonical_headers,
        SIGNED_HEADERS,
        sha256_hex(payload.as_bytes())
    );

    let credential_scope = format!("{}/{}/tc3_request", date, service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{}", secret_key).as_bytes(), date.as_bytes());
    let secret_service = hmac_sha256(&secret_date, service.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, secret_id, credential_scope, SIGNED_HEADERS, signature
    );

    SignedRequest {
        authorization,
        timestamp,
    }
}
