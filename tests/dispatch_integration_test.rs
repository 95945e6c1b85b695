//! 调度器端到端测试：走完整的引擎解析 → 传输缓存 → 适配器 → 字符串边界链路。

use lingogate::config::Config;
use lingogate::transport::ProxyMode;
use lingogate::types::TargetLang;
use lingogate::Translator;
use mockito::{Matcher, Server};
use std::sync::Arc;

#[tokio::test]
async fn test_google_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/translate_a/single")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "hello".into()),
            Matcher::UrlEncoded("tl".into(), "zh-CN".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[[["你好","hello",null,null,10]],null,"en"]"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.google.endpoint = format!("{}/translate_a/single", server.url());
    config.google.proxy_mode = ProxyMode::Direct;
    let translator = Translator::new(Arc::new(config));

    let result = translator
        .translate("hello", TargetLang::ZhCn, Some("google"))
        .await;
    assert_eq!(result, "你好");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_tencent_missing_secret_id_no_http() {
    // SecretId 为空：返回固定引导文案，且不构建任何 HTTP 客户端
    let mut config = Config::default();
    config.tencent.secret_key = "only-key".to_string();
    let translator = Translator::new(Arc::new(config));

    let result = translator
        .translate("hello", TargetLang::ZhCn, Some("tencent"))
        .await;
    assert_eq!(result, "请在设置中配置腾讯云 SecretId 和 SecretKey");
    assert_eq!(translator.transports().built_count(), 0);
}

#[tokio::test]
async fn test_volcano_error_body_surfaces_code_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ResponseMetadata":{"Error":{"Code":"X","Message":"Y"}}}"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.volcano.endpoint = server.url();
    config.volcano.access_key = "ak".to_string();
    config.volcano.secret_key = "sk".to_string();
    let translator = Translator::new(Arc::new(config));

    let result = translator
        .translate("hello", TargetLang::ZhCn, Some("volcano"))
        .await;
    assert!(result.contains("X"), "结果应包含错误码: {}", result);
    assert!(result.contains("Y"), "结果应包含错误信息: {}", result);
}

#[tokio::test]
async fn test_default_engine_comes_from_config() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/translate_a/single")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[[["世界","world",null]],null,"en"]"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.engine = "google".to_string();
    config.google.endpoint = format!("{}/translate_a/single", server.url());
    config.google.proxy_mode = ProxyMode::Direct;
    let translator = Translator::new(Arc::new(config));

    // 不指定引擎时使用配置的默认引擎
    let result = translator.translate("world", TargetLang::ZhCn, None).await;
    assert_eq!(result, "世界");
}

#[tokio::test]
async fn test_same_proxy_mode_shares_transport_across_engines() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/translate_a/single")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[[["你好","hello",null]],null,"en"]"#)
        .create_async()
        .await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"你好"}}]}"#)
        .create_async()
        .await;

    // google 与 ai 都配置 direct 模式，两次调用只构建一个客户端
    let mut config = Config::default();
    config.google.endpoint = format!("{}/translate_a/single", server.url());
    config.google.proxy_mode = ProxyMode::Direct;
    config.ai.endpoint = server.url();
    config.ai.api_key = "sk-test".to_string();
    config.ai.proxy_mode = ProxyMode::Direct;
    let translator = Translator::new(Arc::new(config));

    translator
        .translate("hello", TargetLang::ZhCn, Some("google"))
        .await;
    translator
        .translate("hello", TargetLang::ZhCn, Some("ai"))
        .await;
    assert_eq!(translator.transports().built_count(), 1);
}
