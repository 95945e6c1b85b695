//! 云厂商请求签名。
//!
//! 两套签名算法结构相似但细节互不兼容（规范查询串、scope 组成、
//! 派生键种子、方案名均不同），必须保持独立实现，混用会产生
//! 服务端拒绝的签名。

pub mod tc3;
pub mod volc;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub(crate) fn hmac_sha256(key: &[u8], msg: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC 支持任意长度密钥");
    mac.update(msg);
    mac.finalize().into_bytes().to_vec()
}

pub(crate) fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
