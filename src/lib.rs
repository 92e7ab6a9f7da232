pub mod config;
pub mod highlight;
pub mod nlp;
pub mod report;
pub mod session;
pub mod suggest;
pub mod validator;
pub mod vocabulary;
mod web;

use std::sync::Arc;

use anyhow::Context;

use config::{AppConfig, TaggerConfig};
use nlp::{Lexicon, SpanishTagger, Tagger};
use session::AppState;
use validator::Validator;

pub use web::create_router;

fn load_persisted_config() -> anyhow::Result<AppConfig> {
    let (config, needs_save) = AppConfig::load().context("加载配置失败")?;
    if needs_save {
        // 默认配置写盘失败不影响启动
        if let Err(e) = config.save() {
            tracing::warn!("保存默认配置失败: {}", e);
        }
    }
    Ok(config)
}

/// 构建标注器
///
/// 只在启动时调用一次，失败即终止启动
pub fn build_tagger(config: &TaggerConfig) -> anyhow::Result<Arc<dyn Tagger>> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load(path).context("加载词法模型失败")?,
        None => {
            tracing::info!("使用内置西语词法模型");
            Lexicon::builtin()
        }
    };
    Ok(Arc::new(SpanishTagger::new(lexicon)))
}

pub async fn run() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let config = load_persisted_config()?;
    config.validate().context("配置无效")?;

    let tagger = build_tagger(&config.tagger)?;
    tracing::info!("标注器已就绪: {}", tagger.name());

    let validator = Validator::new(tagger).with_suggestions(config.suggestions.enabled);
    let state = AppState::new(Arc::new(validator), &config);
    let app = create_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("监听 {} 失败", addr))?;
    tracing::info!("Spanish Text Validator 已启动: http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
