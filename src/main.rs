use anyhow::{bail, Context, Result};
use clap::Parser;
use lingogate::config::Config;
use lingogate::types::TargetLang;
use lingogate::Translator;
use std::io::Read;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "lingogate")]
#[command(about = "多引擎划词翻译核心", long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// 翻译引擎（缺省取配置文件中的默认引擎）
    #[arg(short, long)]
    engine: Option<String>,

    /// 目标语言：zh-CN 或 en
    #[arg(short, long, default_value = "zh-CN")]
    lang: String,

    /// 图片翻译模式：读取该路径的图片文件
    #[arg(short, long)]
    image: Option<String>,

    /// 待翻译文本（省略时从标准输入读取）
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let Some(target) = TargetLang::parse(&args.lang) else {
        bail!("不支持的目标语言: {}（可选 zh-CN / en）", args.lang);
    };

    let config = Config::load_or_default(&args.config);
    let translator = Arc::new(Translator::new(Arc::new(config)));

    let result = match args.image {
        Some(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("读取图片失败: {}", path))?;
            translator
                .translate_image(&bytes, target, args.engine.as_deref())
                .await
        }
        None => {
            let text = match args.text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("读取标准输入失败")?;
                    buf.trim_end_matches('\n').to_string()
                }
            };
            translator
                .translate(&text, target, args.engine.as_deref())
                .await
        }
    };

    println!("{}", result);
    Ok(())
}
