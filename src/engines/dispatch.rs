//! 翻译调度：引擎解析、统一的字符串结果边界、后台任务派发。

use super::{ai, deepl, google, microsoft, tencent, volcano, Engine};
use crate::config::Config;
use crate::error::LingoGateError;
use crate::transport::TransportCache;
use crate::types::TargetLang;
use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// 后台翻译完成通知。
///
/// `seq` 单调递增：界面侧记录最近一次派发的序号，丢弃更小序号的
/// 迟到结果，避免慢请求覆盖快请求（并发重译不排队，晚到即过期）。
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: String,
}

/// 翻译调度器。
///
/// 持有配置与按代理模式缓存的 HTTP 客户端，自身无其他可变状态，
/// 可放进 `Arc` 跨任务并发使用。每次调用只尝试一次，不做重试。
pub struct Translator {
    config: Arc<Config>,
    transports: Arc<TransportCache>,
    seq: AtomicU64,
}

impl Translator {
    pub fn new(config: Arc<Config>) -> Self {
        let transports = Arc::new(TransportCache::new(
            config.proxy_url.clone(),
            config.accept_invalid_certs,
        ));
        Self {
            config,
            transports,
            seq: AtomicU64::new(0),
        }
    }

    pub fn transports(&self) -> &TransportCache {
        &self.transports
    }

    /// 文本翻译，结构化错误版本。engine 为空时取配置的默认引擎。
    pub async fn translate_checked(
        &self,
        text: &str,
        target: TargetLang,
        engine: Option<&str>,
    ) -> Result<String> {
        if text.is_empty() {
            return Err(LingoGateError::EmptyText);
        }

        let id = engine.unwrap_or(&self.config.engine);
        let engine =
            Engine::parse(id).ok_or_else(|| LingoGateError::UnknownEngine(id.to_string()))?;
        tracing::debug!(engine = engine.as_str(), lang = %target, "文本翻译");

        match engine {
            Engine::Google => google::translate(&self.config, &self.transports, text, target).await,
            Engine::Deepl => deepl::translate(&self.config, &self.transports, text, target).await,
            Engine::Tencent => {
                tencent::translate(&self.config, &self.transports, text, target).await
            }
            Engine::Microsoft => {
                microsoft::translate(&self.config, &self.transports, text, target).await
            }
            Engine::Volcano => {
                volcano::translate(&self.config, &self.transports, text, target).await
            }
            Engine::Ai => ai::translate(&self.config, &self.transports, text, target).await,
        }
    }

    /// 文本翻译，UI 约定的单字符串边界：错误渲染成历史格式文案
    pub async fn translate(
        &self,
        text: &str,
        target: TargetLang,
        engine: Option<&str>,
    ) -> String {
        match self.translate_checked(text, target, engine).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("文本翻译失败: {}", e);
                e.to_string()
            }
        }
    }

    /// 图片翻译，结构化错误版本。只有部分引擎支持图片，
    /// 其余（含未知 id）统一返回引导文案。
    pub async fn translate_image_checked(
        &self,
        image: &[u8],
        target: TargetLang,
        engine: Option<&str>,
    ) -> Result<String> {
        if image.is_empty() {
            return Err(LingoGateError::EmptyImage);
        }

        let id = engine.unwrap_or(&self.config.image_engine);
        tracing::debug!(engine = id, lang = %target, "图片翻译");

        // 支持与否只由 Engine::supports_image 判定，match 只负责路由
        match Engine::parse(id).filter(|e| e.supports_image()) {
            Some(Engine::Tencent) => {
                tencent::translate_image(&self.config, &self.transports, image, target).await
            }
            Some(Engine::Ai) => {
                ai::translate_image(&self.config, &self.transports, image, target).await
            }
            _ => Err(LingoGateError::UnsupportedImageEngine(id.to_string())),
        }
    }

    pub async fn translate_image(
        &self,
        image: &[u8],
        target: TargetLang,
        engine: Option<&str>,
    ) -> String {
        match self.translate_image_checked(image, target, engine).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("图片翻译失败: {}", e);
                e.to_string()
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 派发一次后台文本翻译（即发即忘），返回本次请求的序号。
    /// 完成通知通过 channel 送回，调用方自行比较序号丢弃过期结果。
    pub fn spawn_translate(
        self: &Arc<Self>,
        text: String,
        target: TargetLang,
        engine: Option<String>,
        tx: UnboundedSender<Completion>,
    ) -> u64 {
        let seq = self.next_seq();
        let translator = Arc::clone(self);
        tokio::spawn(async move {
            let result = translator
                .translate(&text, target, engine.as_deref())
                .await;
            // 接收端已关闭说明界面不再关心，丢弃即可
            let _ = tx.send(Completion { seq, result });
        });
        seq
    }

    /// 派发一次后台图片翻译，语义同 [`spawn_translate`]
    pub fn spawn_translate_image(
        self: &Arc<Self>,
        image: Vec<u8>,
        target: TargetLang,
        engine: Option<String>,
        tx: UnboundedSender<Completion>,
    ) -> u64 {
        let seq = self.next_seq();
        let translator = Arc::clone(self);
        tokio::spawn(async move {
            let result = translator
                .translate_image(&image, target, engine.as_deref())
                .await;
            let _ = tx.send(Completion { seq, result });
        });
        seq
    }
}
