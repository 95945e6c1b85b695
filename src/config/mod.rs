use crate::error::LingoGateError;
use crate::transport::ProxyMode;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 主配置结构，字段缺省值与桌面端 config.json 保持一致
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// 默认文本翻译引擎
    pub engine: String,
    /// 默认图片翻译引擎
    pub image_engine: String,
    /// manual 代理模式使用的代理地址
    pub proxy_url: String,
    /// 跳过 TLS 证书校验（调试代理用，默认关闭）
    pub accept_invalid_certs: bool,
    pub google: GoogleConfig,
    pub deepl: DeeplConfig,
    pub tencent: TencentConfig,
    pub microsoft: MicrosoftConfig,
    pub volcano: VolcanoConfig,
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: "google".to_string(),
            image_engine: "tencent".to_string(),
            proxy_url: "http://127.0.0.1:7897".to_string(),
            accept_invalid_certs: false,
            google: GoogleConfig::default(),
            deepl: DeeplConfig::default(),
            tencent: TencentConfig::default(),
            microsoft: MicrosoftConfig::default(),
            volcano: VolcanoConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub endpoint: String,
    pub proxy_mode: ProxyMode,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            proxy_mode: ProxyMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeeplConfig {
    pub api_key: String,
    pub endpoint: String,
    pub proxy_mode: ProxyMode,
}

impl Default for DeeplConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api-free.deepl.com/v2/translate".to_string(),
            proxy_mode: ProxyMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TencentConfig {
    pub secret_id: String,
    pub secret_key: String,
    pub region: String,
    pub endpoint: String,
    pub proxy_mode: ProxyMode,
}

impl Default for TencentConfig {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: String::new(),
            region: "ap-beijing".to_string(),
            endpoint: "https://tmt.tencentcloudapi.com".to_string(),
            proxy_mode: ProxyMode::Direct,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MicrosoftConfig {
    pub api_key: String,
    pub region: String,
    pub endpoint: String,
    pub proxy_mode: ProxyMode,
}

impl Default for MicrosoftConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            region: "eastasia".to_string(),
            endpoint: "https://api.cognitive.microsofttranslator.com/translate".to_string(),
            proxy_mode: ProxyMode::Direct,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VolcanoConfig {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub endpoint: String,
    pub proxy_mode: ProxyMode,
}

impl Default for VolcanoConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            region: "cn-north-1".to_string(),
            endpoint: "https://open.volcengineapi.com".to_string(),
            proxy_mode: ProxyMode::Direct,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub vision_model: String,
    pub prompt: String,
    pub proxy_mode: ProxyMode,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            vision_model: "gpt-4-vision-preview".to_string(),
            prompt: "You are a professional translator. Translate the following text to \
                     Chinese, maintaining the original tone and context: "
                .to_string(),
            proxy_mode: ProxyMode::Direct,
        }
    }
}

impl Config {
    /// 从 JSON 文件加载配置，缺失字段取默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LingoGateError::Config(format!("读取配置文件失败: {}", e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| LingoGateError::Config(format!("解析配置文件失败: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 配置文件不存在时退回默认配置（与桌面端行为一致）
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        if path.as_ref().exists() {
            match Self::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("配置加载失败，使用默认配置: {}", e);
                    Config::default()
                }
            }
        } else {
            Config::default()
        }
    }

    fn validate(&self) -> Result<()> {
        let manual_in_use = [
            self.google.proxy_mode,
            self.deepl.proxy_mode,
            self.tencent.proxy_mode,
            self.microsoft.proxy_mode,
            self.volcano.proxy_mode,
            self.ai.proxy_mode,
        ]
        .iter()
        .any(|m| *m == ProxyMode::Manual);

        if manual_in_use && self.proxy_url.is_empty() {
            return Err(LingoGateError::Config(
                "manual 代理模式需要配置 proxy_url".to_string(),
            ));
        }
        Ok(())
    }
}
