//! HMAC-SHA256 v4 风格签名（火山引擎风格）。
//!
//! 与 TC3 的差异：规范查询串非空（Action/Version 随 URL 传递）、
//! 额外的 x-date 签名头、scope 含 region、派生键直接以原始
//! secret key 起始、方案名为 `HMAC-SHA256`。

use super::{hmac_sha256, sha256_hex};
use chrono::{DateTime, Utc};

const ALGORITHM: &str = "HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-date";

/// 签名结果。`query` 即参与签名的规范查询串，必须原样拼进请求 URL。
#[derive(Debug, Clone)]
pub struct VolcSignature {
    pub authorization: String,
    pub x_date: String,
    pub query: String,
}

#[allow(clippy::too_many_arguments)]
pub fn sign(
    access_key: &str,
    secret_key: &str,
    host: &str,
    region: &str,
    service: &str,
    action: &str,
    version: &str,
    payload: &str,
    now: DateTime<Utc>,
) -> VolcSignature {
    let x_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = &x_date[..8];

    let canonical_query = format!("Action={}&Version={}", action, version);
    let canonical_headers = format!(
        "content-type:application/json\nhost:{}\nx-date:{}\n",
        host, x_date
    );
    let canonical_request = format!(
        "POST\n/\n{}\n{}\n{}\n{}",
        canonical_query,
        canonical_headers,
        SIGNED_HEADERS,
        sha256_hex(payload.as_bytes())
    );

    let credential_scope = format!("{}/{}/{}/request", date, region, service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        x_date,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let k_date = hmac_sha256(secret_key.as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    let k_signing = hmac_sha256(&k_service, b"request");
    let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, access_key, credential_scope, SIGNED_HEADERS, signature
    );

    VolcSignature {
        authorization,
        x_date,
        query: canonical_query,
    }
}
