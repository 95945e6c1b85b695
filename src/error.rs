use thiserror::Error;

/// 翻译核心的结构化错误。
///
/// `Display` 输出即 UI 期望的单字符串结果（与桌面端的历史格式兼容），
/// 内部调用方可按变体分支处理（日志、重试判断等）。
#[derive(Error, Debug)]
pub enum LingoGateError {
    #[error("No text selected.")]
    EmptyText,

    #[error("No image provided.")]
    EmptyImage,

    #[error("Unknown Engine")]
    UnknownEngine(String),

    #[error("引擎 {0} 不支持图片翻译，请选择腾讯/AI")]
    UnsupportedImageEngine(String),

    /// 缺少密钥等用户配置问题，hint 为面向用户的引导文案
    #[error("{hint}")]
    MissingCredential { hint: &'static str },

    /// 配置文件读取/解析/校验失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 传输层构建失败（代理 URL 非法等）
    #[error("代理配置错误: {0}")]
    Transport(String),

    /// 网络异常、超时、非 2xx 状态（reqwest 侧错误）
    #[error("{prefix}: {detail}")]
    Network { prefix: &'static str, detail: String },

    /// 上游返回了非 2xx 状态码且响应体需要原样透出
    #[error("{prefix} {status}: {detail}")]
    UpstreamStatus {
        prefix: &'static str,
        status: u16,
        detail: String,
    },

    /// 同上，但按“前缀: 状态码 - 响应体”的历史格式渲染（火山接口）
    #[error("{prefix}: {status} - {detail}")]
    UpstreamHttp {
        prefix: &'static str,
        status: u16,
        detail: String,
    },

    /// 上游在 2xx 响应体内携带的结构化错误对象
    #[error("{prefix} [{code}]: {message}")]
    UpstreamError {
        prefix: &'static str,
        code: String,
        message: String,
    },

    /// 响应能解析但形状不符合预期
    #[error("{prefix}: {detail}")]
    BadResponse { prefix: &'static str, detail: String },
}

impl LingoGateError {
    pub fn network(prefix: &'static str, err: impl std::fmt::Display) -> Self {
        LingoGateError::Network {
            prefix,
            detail: err.to_string(),
        }
    }

    pub fn bad_response(prefix: &'static str, detail: impl Into<String>) -> Self {
        LingoGateError::BadResponse {
            prefix,
            detail: detail.into(),
        }
    }

    /// 是否属于用户配置问题（区别于网络/上游故障）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LingoGateError::MissingCredential { .. }
                | LingoGateError::Config(_)
                | LingoGateError::Transport(_)
        )
    }
}
