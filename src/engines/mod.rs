pub mod ai;
pub mod deepl;
pub mod dispatch;
pub mod google;
pub mod microsoft;
pub mod tencent;
pub mod volcano;

/// 支持的翻译引擎集合，引擎 id 在启动时解析一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Google,
    Deepl,
    Tencent,
    Microsoft,
    Volcano,
    Ai,
}

impl Engine {
    pub fn parse(id: &str) -> Option<Engine> {
        match id {
            "google" => Some(Engine::Google),
            "deepl" => Some(Engine::Deepl),
            "tencent" => Some(Engine::Tencent),
            "microsoft" => Some(Engine::Microsoft),
            "volcano" => Some(Engine::Volcano),
            "ai" => Some(Engine::Ai),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Deepl => "deepl",
            Engine::Tencent => "tencent",
            Engine::Microsoft => "microsoft",
            Engine::Volcano => "volcano",
            Engine::Ai => "ai",
        }
    }

    /// 是否支持图片翻译
    pub fn supports_image(self) -> bool {
        matches!(self, Engine::Tencent | Engine::Ai)
    }
}

/// 截断上游响应体，避免把超长报文整段透出给用户
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// 从 endpoint URL 中取出 host（签名的规范头使用）
pub(crate) fn host_of(endpoint: &str) -> &str {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_parse_known_ids() {
        assert_eq!(Engine::parse("google"), Some(Engine::Google));
        assert_eq!(Engine::parse("deepl"), Some(Engine::Deepl));
        assert_eq!(Engine::parse("tencent"), Some(Engine::Tencent));
        assert_eq!(Engine::parse("microsoft"), Some(Engine::Microsoft));
        assert_eq!(Engine::parse("volcano"), Some(Engine::Volcano));
        assert_eq!(Engine::parse("ai"), Some(Engine::Ai));
    }

    #[test]
    fn test_engine_parse_unknown() {
        assert_eq!(Engine::parse("baidu"), None);
        assert_eq!(Engine::parse(""), None);
        assert_eq!(Engine::parse("Google"), None);
    }

    #[test]
    fn test_engine_roundtrip() {
        for engine in [
            Engine::Google,
            Engine::Deepl,
            Engine::Tencent,
            Engine::Microsoft,
            Engine::Volcano,
            Engine::Ai,
        ] {
            assert_eq!(Engine::parse(engine.as_str()), Some(engine));
        }
    }

    #[test]
    fn test_supports_image() {
        assert!(Engine::Tencent.supports_image());
        assert!(Engine::Ai.supports_image());
        assert!(!Engine::Google.supports_image());
        assert!(!Engine::Deepl.supports_image());
        assert!(!Engine::Microsoft.supports_image());
        assert!(!Engine::Volcano.supports_image());
    }

    #[test]
    fn test_truncate_chars_char_boundaries() {
        assert_eq!(truncate_chars("hello", 200), "hello");
        assert_eq!(truncate_chars("你好世界", 2), "你好");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://tmt.tencentcloudapi.com"),
            "tmt.tencentcloudapi.com"
        );
        assert_eq!(host_of("http://127.0.0.1:1234"), "127.0.0.1:1234");
        assert_eq!(
            host_of("https://open.volcengineapi.com/extra/path"),
            "open.volcengineapi.com"
        );
    }
}
