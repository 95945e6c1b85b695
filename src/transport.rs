use crate::error::LingoGateError;
use crate::Result;
use reqwest::{Client, Proxy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 出网代理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// 直连，忽略系统代理环境
    Direct,
    /// 跟随系统代理环境
    Auto,
    /// 强制走配置的代理地址
    Manual,
}

/// 按代理模式缓存 HTTP 客户端。
///
/// 每种模式至多构建一个客户端，相同模式的引擎共享连接池。
/// 由调度器在启动时构建并持有，构建后只读，可跨任务并发使用。
pub struct TransportCache {
    manual_proxy_url: String,
    accept_invalid_certs: bool,
    clients: Mutex<HashMap<ProxyMode, Client>>,
    built: AtomicUsize,
}

impl TransportCache {
    pub fn new(manual_proxy_url: impl Into<String>, accept_invalid_certs: bool) -> Self {
        Self {
            manual_proxy_url: manual_proxy_url.into(),
            accept_invalid_certs,
            clients: Mutex::new(HashMap::new()),
            built: AtomicUsize::new(0),
        }
    }

    /// 取得指定模式的客户端，首次调用时构建并缓存。
    /// 超时不在这里设置，由各引擎按调用类别在请求级指定。
    pub fn resolve(&self, mode: ProxyMode) -> Result<Client> {
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(client) = clients.get(&mode) {
            return Ok(client.clone());
        }

        let mut builder = Client::builder()
            .user_agent("Mozilla/5.0")
            .pool_max_idle_per_host(10);

        // 证书校验默认开启，accept_invalid_certs 是显式的调试豁免
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder = match mode {
            ProxyMode::Direct => builder.no_proxy(),
            ProxyMode::Auto => builder,
            ProxyMode::Manual => {
                let proxy = Proxy::all(&self.manual_proxy_url)
                    .map_err(|e| LingoGateError::Transport(e.to_string()))?;
                builder.proxy(proxy)
            }
        };

        let client = builder
            .build()
            .map_err(|e| LingoGateError::Transport(e.to_string()))?;
        clients.insert(mode, client.clone());
        self.built.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(?mode, "构建 HTTP 客户端");
        Ok(client)
    }

    /// 已构建的客户端数量
    pub fn built_count(&self) -> usize {
        self.built.load(Ordering::Relaxed)
    }
}
